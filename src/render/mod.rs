//! Präsentations-Schicht: Grafik-Spiegelung des Flugplans auf der Karte.

mod draw_order;
mod graphic;
mod overlay;
mod surface;

pub use draw_order::compute_draw_order;
pub use graphic::{Graphic, GraphicId, GraphicKind};
pub use overlay::{DeferredReorder, FlightPlanOverlay};
pub use surface::{MapSurface, RecordingSurface, SurfaceOp};
