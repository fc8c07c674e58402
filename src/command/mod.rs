//! Projektion eines fertigen Flugplans auf eine Drohnen-Kommandoliste.
//!
//! Reine Lese-Projektion: der Plan wird nicht verändert. Das konkrete
//! Funk-Protokoll (Encoding, Acknowledgements) liegt außerhalb — hier
//! entsteht nur die geordnete Kommando-Folge.

use crate::core::{Action, ActionType, FlightPlan};

/// Wartezeit in Sekunden vor dem abschließenden Return-to-Home.
const RTH_DELAY_SECONDS: f64 = 2.0;

/// Blickrichtungs-Modus der Drohne zwischen zwei Wegpunkten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Fester Yaw pro Wegpunkt
    Absolute,
    /// Weicher Übergang zwischen den Wegpunkt-Yaws
    Continue,
    /// Kamera auf einen POI verriegelt
    Roi { poi_index: usize },
}

/// Ein Kommando der projizierten Flug-Sequenz.
#[derive(Debug, Clone, PartialEq)]
pub enum DroneCommand {
    TakeOff,
    Land,
    ReturnToLaunch,
    ChangeSpeed {
        /// Geschwindigkeit in m/s
        speed: f64,
    },
    SetViewMode {
        mode: ViewMode,
    },
    NavigateToWayPoint {
        latitude: f64,
        longitude: f64,
        altitude: f64,
        /// `None` bedeutet: automatisch auf den nächsten Wegpunkt ausrichten.
        /// Darf nie mit 0° verwechselt werden.
        yaw: Option<f64>,
    },
    /// Kamera-Tilt in Grad
    MountControl {
        tilt: f64,
    },
    StartPhotoCapture,
    StopPhotoCapture,
    StartVideoCapture,
    StopVideoCapture,
    Delay {
        seconds: f64,
    },
}

/// Projiziert einen fertigen Flugplan auf die geordnete Kommandoliste.
///
/// Pro Wegpunkt: Geschwindigkeits- und Blickmodus-Kommando nur bei
/// Änderung gegenüber dem Vorgänger, dann das Navigations-Kommando,
/// dann die angehängten Aktionen in Listen-Reihenfolge. Abschließend
/// Return-to-Home, falls der Plan es verlangt.
pub fn project_commands(plan: &FlightPlan) -> Vec<DroneCommand> {
    let mut commands: Vec<DroneCommand> = plan
        .takeoff_actions
        .iter()
        .map(action_command)
        .collect();

    let mut last_speed: Option<f64> = None;
    let mut last_view_mode: Option<ViewMode> = None;

    for wp in &plan.way_points {
        if last_speed != Some(wp.speed) {
            commands.push(DroneCommand::ChangeSpeed { speed: wp.speed });
            last_speed = Some(wp.speed);
        }

        let view_mode = match wp.poi_index {
            Some(poi_index) if wp.should_follow_poi => ViewMode::Roi { poi_index },
            _ if wp.should_continue => ViewMode::Continue,
            _ => ViewMode::Absolute,
        };
        if last_view_mode != Some(view_mode) {
            commands.push(DroneCommand::SetViewMode { mode: view_mode });
            last_view_mode = Some(view_mode);
        }

        // Automatischer Yaw bleibt "unbestimmt" — die Drohne richtet sich
        // zur Laufzeit selbst auf den nächsten Wegpunkt aus
        let yaw = if wp.has_custom_yaw { wp.yaw } else { None };
        commands.push(DroneCommand::NavigateToWayPoint {
            latitude: wp.latitude,
            longitude: wp.longitude,
            altitude: wp.altitude,
            yaw,
        });

        commands.extend(wp.actions.iter().map(action_command));
    }

    if plan.last_point_rth {
        commands.push(DroneCommand::Delay {
            seconds: RTH_DELAY_SECONDS,
        });
        commands.push(DroneCommand::ReturnToLaunch);
    }

    commands
}

/// Übersetzt eine Wegpunkt-Aktion in ihr Kommando.
fn action_command(action: &Action) -> DroneCommand {
    match action.action_type {
        ActionType::TakeOff => DroneCommand::TakeOff,
        ActionType::Landing => DroneCommand::Land,
        ActionType::Rth => DroneCommand::ReturnToLaunch,
        ActionType::Tilt => DroneCommand::MountControl {
            tilt: action.angle.unwrap_or(0.0),
        },
        ActionType::Delay => DroneCommand::Delay {
            seconds: action.delay.unwrap_or(0.0),
        },
        ActionType::ImageStartCapture => DroneCommand::StartPhotoCapture,
        ActionType::ImageStopCapture => DroneCommand::StopPhotoCapture,
        ActionType::VideoStartCapture => DroneCommand::StartVideoCapture,
        ActionType::VideoStopCapture => DroneCommand::StopVideoCapture,
    }
}
