//! Aktionen, die an Wegpunkten (oder beim Start) ausgeführt werden.

use serde::{Deserialize, Serialize};

/// Typ einer Wegpunkt-Aktion (Wire-Namen entsprechen dem persistierten Schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Start
    TakeOff,
    /// Landung
    Landing,
    /// Return-to-Home
    #[serde(rename = "RTH")]
    Rth,
    /// Kamera-Tilt setzen
    Tilt,
    /// Wartezeit
    Delay,
    /// Foto-Serie starten
    ImageStartCapture,
    /// Foto-Serie stoppen
    ImageStopCapture,
    /// Video-Aufnahme starten
    VideoStartCapture,
    /// Video-Aufnahme stoppen
    VideoStopCapture,
}

/// Eine einzelne Aktion mit typabhängigen Parametern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Typ der Aktion
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Winkel in Grad (Tilt)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Geschwindigkeit in m/s (Tilt-Rotation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Wartezeit in Sekunden (Delay)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
}

impl Action {
    /// Erstellt eine parameterlose Aktion.
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            angle: None,
            speed: None,
            delay: None,
        }
    }

    /// Erstellt eine Tilt-Aktion mit Winkel.
    pub fn tilt(angle: f64) -> Self {
        Self {
            angle: Some(angle),
            ..Self::new(ActionType::Tilt)
        }
    }

    /// Erstellt eine Delay-Aktion.
    pub fn delay(seconds: f64) -> Self {
        Self {
            delay: Some(seconds),
            ..Self::new(ActionType::Delay)
        }
    }
}
