//! Core-Domänentypen: Wegpunkte, POIs, FlightPlan, Geo-Geometrie.

/// Geodätische Hilfsfunktionen (Bearing, Distanz, Tilt-Quantisierung)
pub mod geo;

pub mod action;
/// Core-Datenmodelle für Flugpläne
///
/// Dieses Modul definiert die Haupt-Datenstrukturen:
/// - FlightPlan: Container für alle Wegpunkte und POIs
/// - Waypoint: Einzelner Wegpunkt mit Position, Yaw und Aktionen
/// - PoiPoint: Point of Interest, auf den Wegpunkte zielen können
pub mod flight_plan;
pub mod poi;
pub mod waypoint;

pub use action::{Action, ActionType};
pub use flight_plan::{FlightPlan, FlightPlanEstimations, CUSTOM_YAW_TOLERANCE_DEG};
pub use geo::GeoPoint;
pub use poi::PoiPoint;
pub use waypoint::{Waypoint, DEFAULT_SPEED};
