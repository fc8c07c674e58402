//! Flugplan-Editor CLI.
//!
//! Lädt einen gespeicherten Flugplan, zeigt eine Zusammenfassung und
//! exportiert auf Wunsch die projizierte Kommandoliste.

use anyhow::{bail, Result};
use flightplan_editor::{project_commands, read_saved_flight_plan};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Flugplan-Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, export_commands) = match args.as_slice() {
        [path] => (PathBuf::from(path), false),
        [path, flag] if flag == "--commands" => (PathBuf::from(path), true),
        _ => bail!("Aufruf: flightplan-editor <plan.json> [--commands]"),
    };

    let saved = read_saved_flight_plan(&path)?;
    let plan = &saved.plan;

    println!("Flugplan:   {} (uuid {})", saved.title, saved.uuid);
    println!("Wegpunkte:  {}", plan.way_point_count());
    println!("POIs:       {}", plan.poi_count());

    let estimations = plan.estimations();
    println!("Distanz:    {:.0} m", estimations.distance);
    println!("Dauer:      {:.0} s", estimations.duration);
    println!("Max. Höhe:  {:.0} m", plan.max_altitude());
    if plan.photo_count() > 0 || plan.video_count() > 0 {
        println!(
            "Aufnahmen:  {} Foto, {} Video",
            plan.photo_count(),
            plan.video_count()
        );
    }

    if export_commands {
        println!();
        for (i, command) in project_commands(plan).iter().enumerate() {
            println!("{:3}  {:?}", i, command);
        }
    }

    Ok(())
}
