//! Repräsentiert einen Point of Interest (POI) des Flugplans.

use super::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Ein POI, auf den Wegpunkte ihre Kamera/Orientierung ausrichten können.
///
/// `index` entspricht immer der Position in der POI-Liste des
/// [`FlightPlan`](super::FlightPlan). Die Rückreferenzen in
/// `way_point_indices` werden nicht persistiert, sondern beim Laden über
/// `set_relations` aus den `poi`-Feldern der Wegpunkte rekonstruiert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiPoint {
    /// Position in der POI-Liste
    pub index: usize,
    /// Farb-Index für die Karten-Darstellung
    pub color: usize,
    /// Geographische Breite in Grad
    pub latitude: f64,
    /// Geographische Länge in Grad
    pub longitude: f64,
    /// Höhe in Metern
    pub altitude: f64,
    /// Indizes aller Wegpunkte, die aktuell auf diesen POI zielen (Laufzeit-Relation)
    #[serde(skip)]
    pub way_point_indices: Vec<usize>,
}

impl PoiPoint {
    /// Erstellt einen neuen POI ohne Rückreferenzen.
    pub fn new(coordinate: GeoPoint, altitude: f64, color: usize) -> Self {
        Self {
            index: 0,
            color,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            altitude,
            way_point_indices: Vec::new(),
        }
    }

    /// Geodätische Position des POI.
    pub fn coordinate(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Setzt die Position.
    pub fn set_coordinate(&mut self, coordinate: GeoPoint) {
        self.latitude = coordinate.latitude;
        self.longitude = coordinate.longitude;
    }

    /// Registriert die Rückreferenz eines Wegpunkts.
    pub fn assign_way_point(&mut self, way_point_index: usize) {
        if !self.way_point_indices.contains(&way_point_index) {
            self.way_point_indices.push(way_point_index);
        }
    }

    /// Entfernt die Rückreferenz eines Wegpunkts.
    pub fn unassign_way_point(&mut self, way_point_index: usize) {
        self.way_point_indices.retain(|&i| i != way_point_index);
    }
}
