//! Repräsentiert einen einzelnen Wegpunkt des Flugplans.

use super::action::{Action, ActionType};
use super::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Standard-Fluggeschwindigkeit in m/s, falls keine angegeben.
pub const DEFAULT_SPEED: f64 = 2.0;

/// Ein Wegpunkt mit Position, Orientierung und angehängten Aktionen.
///
/// Vorgänger/Nachfolger ergeben sich aus der Array-Position im
/// [`FlightPlan`](super::FlightPlan); die POI-Relation ist ein reiner Index.
/// Der Kamera-Tilt wird als synthetische [`ActionType::Tilt`]-Aktion in der
/// Aktionsliste gehalten (Schema-Kompatibilität).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Geographische Breite in Grad
    pub latitude: f64,
    /// Geographische Länge in Grad
    pub longitude: f64,
    /// Flughöhe in Metern
    pub altitude: f64,
    /// Orientierung in Grad [0, 360); None = noch nie berechnet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaw: Option<f64>,
    /// Ob der Yaw vom Nutzer fixiert wurde (keine automatische Neuberechnung)
    #[serde(default, rename = "hasCustomYaw")]
    pub has_custom_yaw: bool,
    /// Zielgeschwindigkeit in m/s
    pub speed: f64,
    /// Ob die Drohne ohne Stopp weiterfliegen soll
    #[serde(rename = "continue")]
    pub should_continue: bool,
    /// Ob Orientierung dem zugewiesenen POI folgen soll
    #[serde(default, rename = "followPOI")]
    pub should_follow_poi: bool,
    /// Index des zugewiesenen POI, falls vorhanden
    #[serde(rename = "poi", skip_serializing_if = "Option::is_none")]
    pub poi_index: Option<usize>,
    /// Angehängte Aktionen in Ausführungsreihenfolge
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl Waypoint {
    /// Erstellt einen neuen Wegpunkt ohne Relationen.
    pub fn new(coordinate: GeoPoint, altitude: f64, speed: f64, should_continue: bool) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            altitude,
            yaw: None,
            has_custom_yaw: false,
            speed,
            should_continue,
            should_follow_poi: false,
            poi_index: None,
            actions: Vec::new(),
        }
    }

    /// Geodätische Position des Wegpunkts.
    pub fn coordinate(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Setzt die Position (ohne Yaw-Neuberechnung — siehe
    /// [`FlightPlan::set_way_point_coordinate`](super::FlightPlan::set_way_point_coordinate)).
    pub fn set_coordinate(&mut self, coordinate: GeoPoint) {
        self.latitude = coordinate.latitude;
        self.longitude = coordinate.longitude;
    }

    /// Aktueller Kamera-Tilt in Grad (aus der synthetischen Tilt-Aktion).
    pub fn tilt(&self) -> f64 {
        self.actions
            .iter()
            .find(|a| a.action_type == ActionType::Tilt)
            .and_then(|a| a.angle)
            .unwrap_or(0.0)
    }

    /// Setzt den Kamera-Tilt (legt die Tilt-Aktion an oder aktualisiert sie).
    pub fn set_tilt(&mut self, angle: f64) {
        if let Some(action) = self
            .actions
            .iter_mut()
            .find(|a| a.action_type == ActionType::Tilt)
        {
            action.angle = Some(angle);
        } else {
            self.actions.insert(0, Action::tilt(angle));
        }
    }

    /// Hängt eine Aktion an die Aktionsliste an.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Ob eine Lande-Aktion gesetzt ist.
    pub fn has_landing_action(&self) -> bool {
        self.actions
            .iter()
            .any(|a| a.action_type == ActionType::Landing)
    }

    /// Schaltet die Lande-Aktion an/aus.
    pub fn set_landing(&mut self, should_land: bool) {
        match (should_land, self.has_landing_action()) {
            (true, false) => self.add_action(Action::new(ActionType::Landing)),
            (false, true) => self
                .actions
                .retain(|a| a.action_type != ActionType::Landing),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_ueber_synthetische_aktion() {
        let mut wp = Waypoint::new(GeoPoint::new(48.0, 2.0), 50.0, DEFAULT_SPEED, false);
        assert_eq!(wp.tilt(), 0.0);

        wp.set_tilt(25.0);
        assert_eq!(wp.tilt(), 25.0);
        assert_eq!(wp.actions.len(), 1);

        // Zweites Setzen aktualisiert die bestehende Aktion
        wp.set_tilt(-10.0);
        assert_eq!(wp.tilt(), -10.0);
        assert_eq!(wp.actions.len(), 1);
    }

    #[test]
    fn test_landing_aktion_toggle() {
        let mut wp = Waypoint::new(GeoPoint::new(48.0, 2.0), 50.0, DEFAULT_SPEED, false);
        assert!(!wp.has_landing_action());

        wp.set_landing(true);
        assert!(wp.has_landing_action());
        // Idempotent
        wp.set_landing(true);
        assert_eq!(wp.actions.len(), 1);

        wp.set_landing(false);
        assert!(!wp.has_landing_action());
    }
}
