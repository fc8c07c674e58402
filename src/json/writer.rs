//! Writer für gespeicherte Flugpläne.

use super::SavedFlightPlan;
use anyhow::{Context, Result};
use std::path::Path;

/// Serialisiert einen gespeicherten Flugplan als JSON-String.
pub fn write_saved_flight_plan(saved: &SavedFlightPlan) -> Result<String> {
    serde_json::to_string_pretty(saved).context("Flugplan konnte nicht serialisiert werden")
}

/// Schreibt einen gespeicherten Flugplan in eine Datei.
pub fn write_saved_flight_plan_to_file(saved: &SavedFlightPlan, path: &Path) -> Result<()> {
    let content = write_saved_flight_plan(saved)?;
    std::fs::write(path, content)
        .with_context(|| format!("Flugplan-Datei nicht schreibbar: {}", path.display()))?;
    log::info!("Flugplan '{}' gespeichert nach: {}", saved.title, path.display());
    Ok(())
}
