//! JSON Import/Export für gespeicherte Flugpläne.
//!
//! Das Format ist das Dokument-Schema der Drohnen-App: ein äußerer
//! Umschlag mit Metadaten (Titel, UUID, Produkt, Karten-Ausschnitt)
//! und dem eigentlichen Plan unter `plan`.

pub mod reader;
pub mod writer;

pub use reader::{parse_saved_flight_plan, read_saved_flight_plan};
pub use writer::{write_saved_flight_plan, write_saved_flight_plan_to_file};

use crate::core::FlightPlan;
use serde::{Deserialize, Serialize};

/// Ein Eckpunkt des optionalen Missions-Polygons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Eine leichtgewichtige Einstellung im gespeicherten Plan (Schlüssel
/// plus optionaler Wert, Semantik liegt beim Host).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSetting {
    pub key: String,
    #[serde(
        rename = "currentValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_value: Option<i64>,
}

/// Ein auf Platte gespeicherter Flugplan: Umschlag + Plan.
///
/// Nach dem Deserialisieren müssen die Laufzeit-Relationen des Plans
/// über [`FlightPlan::set_relations`] rekonstruiert werden — der Reader
/// erledigt das bereits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFlightPlan {
    pub version: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    pub uuid: String,
    /// Speicherzeitpunkt in Millisekunden seit der Unix-Epoche
    pub date: i64,
    /// Letzte Änderung in Millisekunden seit der Unix-Epoche (0 = unbekannt)
    #[serde(default, rename = "lastModified")]
    pub last_modified: i64,
    /// Anzeigename des Drohnen-Modells
    pub product: String,
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub plan: FlightPlan,
    #[serde(default)]
    pub settings: Vec<LightSetting>,
    #[serde(default, rename = "polygonPoints")]
    pub polygon_points: Vec<PolygonPoint>,
    pub dirty: bool,

    // ── Gespeicherter Karten-Ausschnitt ─────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, rename = "zoomLevel", skip_serializing_if = "Option::is_none")]
    pub zoom_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt: Option<f64>,

    #[serde(
        default,
        rename = "canGenerateMavlink",
        skip_serializing_if = "Option::is_none"
    )]
    pub can_generate_mavlink: Option<bool>,
    #[serde(
        default,
        rename = "remoteFlightPlanId",
        skip_serializing_if = "Option::is_none"
    )]
    pub remote_flight_plan_id: Option<i64>,
    #[serde(
        default,
        rename = "obstacleAvoidanceActivated",
        skip_serializing_if = "Option::is_none"
    )]
    pub obstacle_avoidance_activated: Option<bool>,
}

impl SavedFlightPlan {
    /// Erstellt einen frischen Umschlag um einen Plan.
    pub fn new(version: i64, title: String, uuid: String, plan: FlightPlan) -> Self {
        Self {
            version,
            title,
            r#type: None,
            uuid,
            date: 0,
            last_modified: 0,
            product: String::new(),
            product_id: 0,
            plan,
            settings: Vec::new(),
            polygon_points: Vec::new(),
            dirty: false,
            longitude: None,
            latitude: None,
            zoom_level: None,
            rotation: None,
            tilt: None,
            can_generate_mavlink: None,
            remote_flight_plan_id: None,
            obstacle_avoidance_activated: Some(true),
        }
    }
}
