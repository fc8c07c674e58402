//! Zentrale Konfiguration für den Flugplan-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Yaw / Orientierung ──────────────────────────────────────────────

/// Toleranz in Grad: ein Nutzer-Yaw innerhalb dieser Spanne um den
/// berechneten Wert gilt nicht als Custom-Yaw.
pub const CUSTOM_YAW_TOLERANCE_DEG: f64 = 5.0;
/// Toleranz in Grad für touch-basiertes Editieren des Orientierungs-Pfeils.
pub const ARROW_EDIT_TOLERANCE_DEG: f64 = 30.0;

// ── Wegpunkte ───────────────────────────────────────────────────────

/// Standard-Fluggeschwindigkeit neuer Wegpunkte in m/s.
pub const DEFAULT_WAY_POINT_SPEED: f64 = 2.0;
/// Standard-Flughöhe neuer Wegpunkte in Metern.
pub const DEFAULT_WAY_POINT_ALTITUDE: f64 = 50.0;
/// Standard-Höhe neuer POIs in Metern.
pub const DEFAULT_POI_ALTITUDE: f64 = 0.0;

// ── Overlay ─────────────────────────────────────────────────────────

/// Verzögerung in Millisekunden für das einmalige Neu-Anwenden der
/// Zeichenreihenfolge (die Render-Oberfläche übernimmt eine Umsortierung
/// im selben Frame nicht immer zuverlässig).
pub const REORDER_REAPPLY_DELAY_MS: u64 = 100;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `flightplan_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Orientierung ────────────────────────────────────────────
    /// Toleranz für die Custom-Yaw-Erkennung in Grad
    pub custom_yaw_tolerance_deg: f64,
    /// Toleranz für touch-basiertes Pfeil-Editieren in Grad
    pub arrow_edit_tolerance_deg: f64,

    // ── Wegpunkte ───────────────────────────────────────────────
    /// Standard-Geschwindigkeit neuer Wegpunkte in m/s
    pub default_way_point_speed: f64,
    /// Standard-Flughöhe neuer Wegpunkte in Metern
    pub default_way_point_altitude: f64,
    /// Standard-Höhe neuer POIs in Metern
    #[serde(default = "default_poi_altitude")]
    pub default_poi_altitude: f64,

    // ── Overlay ─────────────────────────────────────────────────
    /// Verzögerung für das Reorder-Reapply in Millisekunden
    #[serde(default = "default_reorder_reapply_delay_ms")]
    pub reorder_reapply_delay_ms: u64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            custom_yaw_tolerance_deg: CUSTOM_YAW_TOLERANCE_DEG,
            arrow_edit_tolerance_deg: ARROW_EDIT_TOLERANCE_DEG,

            default_way_point_speed: DEFAULT_WAY_POINT_SPEED,
            default_way_point_altitude: DEFAULT_WAY_POINT_ALTITUDE,
            default_poi_altitude: DEFAULT_POI_ALTITUDE,

            reorder_reapply_delay_ms: REORDER_REAPPLY_DELAY_MS,
        }
    }
}

/// Serde-Default für `default_poi_altitude` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_poi_altitude() -> f64 {
    DEFAULT_POI_ALTITUDE
}

/// Serde-Default für `reorder_reapply_delay_ms` (Abwärtskompatibilität).
fn default_reorder_reapply_delay_ms() -> u64 {
    REORDER_REAPPLY_DELAY_MS
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("flightplan_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("flightplan_editor.toml")
    }
}
