//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Konfiguration, die zwischen `core`, `render` und dem
//! Host geteilt wird, um direkte Abhängigkeiten zu vermeiden.

pub mod options;

pub use options::EditorOptions;
pub use options::{ARROW_EDIT_TOLERANCE_DEG, CUSTOM_YAW_TOLERANCE_DEG, REORDER_REAPPLY_DELAY_MS};
