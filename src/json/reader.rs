//! Reader für gespeicherte Flugpläne.

use super::SavedFlightPlan;
use anyhow::{Context, Result};
use std::path::Path;

/// Parsed einen gespeicherten Flugplan aus einem JSON-String.
///
/// Alles-oder-nichts: bei einem Dekodier-Fehler wird kein Teil-Plan
/// herausgegeben. Die Laufzeit-Relationen (POI-Rückreferenzen) werden
/// direkt nach dem Dekodieren rekonstruiert.
pub fn parse_saved_flight_plan(json_content: &str) -> Result<SavedFlightPlan> {
    let mut saved: SavedFlightPlan =
        serde_json::from_str(json_content).context("Flugplan-JSON konnte nicht dekodiert werden")?;
    saved.plan.set_relations();
    log::info!(
        "Flugplan '{}' geladen: {} Wegpunkte, {} POIs",
        saved.title,
        saved.plan.way_point_count(),
        saved.plan.poi_count()
    );
    Ok(saved)
}

/// Lädt einen gespeicherten Flugplan aus einer Datei.
pub fn read_saved_flight_plan(path: &Path) -> Result<SavedFlightPlan> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Flugplan-Datei nicht lesbar: {}", path.display()))?;
    parse_saved_flight_plan(&content)
        .with_context(|| format!("Flugplan-Datei ungültig: {}", path.display()))
}
