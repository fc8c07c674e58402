//! Die zentrale FlightPlan-Datenstruktur mit Wegpunkten, POIs und Relationen.

use super::action::Action;
use super::geo::{self, GeoPoint};
use super::poi::PoiPoint;
use super::waypoint::{Waypoint, DEFAULT_SPEED};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Toleranz in Grad: liegt ein Nutzer-Yaw näher am berechneten Wert,
/// bleibt der Wegpunkt im Automatik-Modus.
pub const CUSTOM_YAW_TOLERANCE_DEG: f64 = 5.0;

/// Container für den gesamten Flugplan-Graphen.
///
/// Wegpunkt- und POI-Indizes sind immer lückenlos `[0, count)`; Vorgänger/
/// Nachfolger ergeben sich aus der Array-Reihenfolge, POI-Relationen sind
/// reine Indizes. Nach dem Deserialisieren muss [`set_relations`] die
/// Rückreferenzen rekonstruieren (sie werden nicht persistiert).
///
/// [`set_relations`]: FlightPlan::set_relations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    /// Aktionen, die beim Start ausgeführt werden
    #[serde(default, rename = "takeoff")]
    pub takeoff_actions: Vec<Action>,
    /// Alle Wegpunkte in Flug-Reihenfolge
    #[serde(default, rename = "wayPoints")]
    pub way_points: Vec<Waypoint>,
    /// Alle POIs
    #[serde(default, rename = "poi")]
    pub pois: Vec<PoiPoint>,
    /// Globaler Continue-Modus (Voreinstellung für neue Wegpunkte)
    #[serde(default, rename = "continue")]
    pub should_continue: bool,
    /// Ob die Drohne am letzten Punkt Return-to-Home ausführt
    #[serde(default = "default_true", rename = "RTH")]
    pub last_point_rth: bool,
    /// Ob der Plan abgeschlossen/verriegelt ist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buckled: Option<bool>,
    /// Aufnahme-Modus (opak durchgereicht)
    #[serde(rename = "captureMode", skip_serializing_if = "Option::is_none")]
    pub capture_mode: Option<String>,
    /// Aufnahme-Einstellungen (opak durchgereicht)
    #[serde(rename = "captureSettings", skip_serializing_if = "Option::is_none")]
    pub capture_settings: Option<HashMap<String, String>>,
}

fn default_true() -> bool {
    true
}

/// Distanz- und Dauer-Schätzung für einen Flugplan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightPlanEstimations {
    /// Gesamtdistanz in Metern
    pub distance: f64,
    /// Gesamtdauer in Sekunden
    pub duration: f64,
}

impl FlightPlan {
    /// Erstellt einen leeren Flugplan.
    pub fn new() -> Self {
        Self {
            last_point_rth: true,
            ..Self::default()
        }
    }

    /// Anzahl der Wegpunkte.
    pub fn way_point_count(&self) -> usize {
        self.way_points.len()
    }

    /// Anzahl der POIs.
    pub fn poi_count(&self) -> usize {
        self.pois.len()
    }

    /// Wegpunkt an Index (read-only).
    pub fn way_point(&self, index: usize) -> Option<&Waypoint> {
        self.way_points.get(index)
    }

    /// POI an Index (read-only).
    pub fn poi(&self, index: usize) -> Option<&PoiPoint> {
        self.pois.get(index)
    }

    // ── Automatischer Yaw ───────────────────────────────────────────

    /// Berechnet den automatischen Yaw eines Wegpunkts.
    ///
    /// Präferenz: zugewiesener POI, sonst Nachfolger, sonst Vorgänger.
    /// Ein isolierter Wegpunkt ohne Relationen liefert 0°.
    pub fn computed_yaw(&self, index: usize) -> f64 {
        let Some(wp) = self.way_points.get(index) else {
            return 0.0;
        };

        if let Some(poi) = wp.poi_index.and_then(|i| self.pois.get(i)) {
            return geo::bearing(wp.coordinate(), poi.coordinate());
        }
        if let Some(next) = self.way_points.get(index + 1) {
            return geo::bearing(wp.coordinate(), next.coordinate());
        }
        if index > 0 {
            if let Some(previous) = self.way_points.get(index - 1) {
                return geo::bearing(previous.coordinate(), wp.coordinate());
            }
        }
        0.0
    }

    /// Berechnet den Yaw eines Wegpunkts neu, sofern er nicht fixiert ist.
    pub fn update_yaw(&mut self, index: usize) {
        if self
            .way_points
            .get(index)
            .is_some_and(|wp| !wp.has_custom_yaw)
        {
            let yaw = self.computed_yaw(index);
            self.way_points[index].yaw = Some(yaw);
        }
    }

    /// Berechnet den Yaw eines Wegpunkts sowie seiner beiden Nachbarn neu.
    fn update_yaw_and_neighbors(&mut self, index: usize) {
        self.update_yaw(index);
        if index > 0 {
            self.update_yaw(index - 1);
        }
        self.update_yaw(index + 1);
    }

    /// Setzt einen Nutzer-Yaw.
    ///
    /// Liegt der Wert innerhalb der 5°-Toleranz des berechneten Yaws,
    /// bleibt der Wegpunkt im Automatik-Modus (kein unnötiger Custom-Zustand).
    pub fn set_custom_yaw(&mut self, index: usize, yaw: f64) {
        self.set_custom_yaw_with_tolerance(index, yaw, CUSTOM_YAW_TOLERANCE_DEG);
    }

    /// Wie [`set_custom_yaw`], mit konfigurierbarer Toleranz.
    ///
    /// [`set_custom_yaw`]: FlightPlan::set_custom_yaw
    pub fn set_custom_yaw_with_tolerance(&mut self, index: usize, yaw: f64, tolerance: f64) {
        if self.way_points.get(index).is_none() {
            return;
        }

        let computed = self.computed_yaw(index);
        if geo::is_close_to(yaw, computed, tolerance) {
            self.way_points[index].has_custom_yaw = false;
            self.way_points[index].yaw = Some(computed);
        } else {
            self.way_points[index].has_custom_yaw = true;
            self.way_points[index].yaw = Some(geo::bounded_degrees(yaw));
        }
    }

    // ── Wegpunkt-Edits ──────────────────────────────────────────────

    /// Hängt einen Wegpunkt ans Ende an und aktualisiert die Yaws
    /// des neuen und des bisherigen letzten Wegpunkts.
    ///
    /// Gibt den Index des neuen Wegpunkts zurück.
    pub fn add_way_point(&mut self, way_point: Waypoint) -> usize {
        self.way_points.push(way_point);
        let index = self.way_points.len() - 1;
        self.update_yaw(index);
        if index > 0 {
            self.update_yaw(index - 1);
        }
        index
    }

    /// Fügt einen Wegpunkt strikt zwischen zwei bestehenden ein.
    ///
    /// Nur gültig für `0 < index < count`; Einfügen vor dem ersten oder
    /// hinter dem letzten Wegpunkt ist hier nicht vorgesehen und liefert None.
    /// Der Tilt wird als gerundeter Mittelwert der Nachbarn gesetzt, die
    /// Geschwindigkeit vom Nachfolger übernommen.
    pub fn insert_way_point(
        &mut self,
        coordinate: GeoPoint,
        altitude: f64,
        index: usize,
    ) -> Option<usize> {
        if index == 0 || index >= self.way_points.len() {
            return None;
        }

        let previous = &self.way_points[index - 1];
        let next = &self.way_points[index];
        let tilt = ((previous.tilt() + next.tilt()) / 2.0).round();
        let speed = next.speed;

        let mut way_point = Waypoint::new(coordinate, altitude, speed, self.should_continue);
        way_point.set_tilt(tilt);
        self.way_points.insert(index, way_point);

        // Verschobene Wegpunkt-Indizes in den POI-Rückreferenzen nachziehen
        self.shift_way_point_back_references(index, 1);

        self.update_yaw_and_neighbors(index);
        Some(index)
    }

    /// Entfernt den Wegpunkt an gegebenem Index.
    ///
    /// Repariert die Kette über die Lücke hinweg (Yaw-Neuberechnung der
    /// neuen Nachbarn) und zieht alle POI-Rückreferenzen nach.
    pub fn remove_way_point(&mut self, index: usize) -> Option<Waypoint> {
        if index >= self.way_points.len() {
            return None;
        }

        let removed = self.way_points.remove(index);
        if let Some(poi) = removed.poi_index.and_then(|i| self.pois.get_mut(i)) {
            poi.unassign_way_point(index);
        }
        self.shift_way_point_back_references(index, -1);

        // Neue Nachbarn über die Lücke hinweg aktualisieren
        if index > 0 {
            self.update_yaw(index - 1);
        }
        self.update_yaw(index);

        Some(removed)
    }

    /// Setzt die Position eines Wegpunkts und berechnet die Yaws des
    /// Drei-Punkte-Fensters (Wegpunkt + beide Nachbarn) neu.
    pub fn set_way_point_coordinate(&mut self, index: usize, coordinate: GeoPoint) {
        let Some(wp) = self.way_points.get_mut(index) else {
            return;
        };
        wp.set_coordinate(coordinate);
        self.update_yaw_and_neighbors(index);
    }

    /// Setzt die Flughöhe eines Wegpunkts.
    pub fn set_way_point_altitude(&mut self, index: usize, altitude: f64) {
        if let Some(wp) = self.way_points.get_mut(index) {
            wp.altitude = altitude;
        }
    }

    // ── POI-Edits ───────────────────────────────────────────────────

    /// Hängt einen POI ans Ende der POI-Liste an und vergibt dessen Index.
    pub fn add_poi(&mut self, mut poi: PoiPoint) -> usize {
        let index = self.pois.len();
        poi.index = index;
        self.pois.push(poi);
        index
    }

    /// Entfernt den POI an gegebenem Index.
    ///
    /// Wegpunkte mit genau diesem POI verlieren ihre Relation, Wegpunkte
    /// mit höherem `poi`-Index werden dekrementiert; nachfolgende POIs
    /// rücken auf (Index-Lückenlosigkeit).
    pub fn remove_poi(&mut self, index: usize) -> Option<PoiPoint> {
        if index >= self.pois.len() {
            return None;
        }

        // Relationen der Wegpunkte anpassen
        let affected: Vec<usize> = self
            .way_points
            .iter()
            .enumerate()
            .filter(|(_, wp)| wp.poi_index == Some(index))
            .map(|(i, _)| i)
            .collect();
        for wp_index in affected {
            self.unassign_poi(wp_index);
        }
        for wp in &mut self.way_points {
            if let Some(poi_index) = wp.poi_index {
                if poi_index > index {
                    wp.poi_index = Some(poi_index - 1);
                }
            }
        }

        let removed = self.pois.remove(index);
        for poi in self.pois.iter_mut().skip(index) {
            poi.index -= 1;
        }
        Some(removed)
    }

    /// Weist einem Wegpunkt einen POI zu.
    ///
    /// Eine bestehende Relation wird zuerst gelöst (idempotente Neuzuweisung).
    /// Yaw wechselt in den Automatik-Modus und zeigt auf den POI, der Tilt
    /// wird aus der Geometrie abgeleitet.
    pub fn assign_poi(&mut self, way_point_index: usize, poi_index: usize) {
        if way_point_index >= self.way_points.len() || poi_index >= self.pois.len() {
            return;
        }

        self.unassign_poi(way_point_index);

        let wp = &mut self.way_points[way_point_index];
        wp.has_custom_yaw = false;
        wp.poi_index = Some(poi_index);
        wp.should_follow_poi = true;

        let tilt = geo::tilt_from_geometry(
            wp.coordinate(),
            wp.altitude,
            self.pois[poi_index].coordinate(),
            self.pois[poi_index].altitude,
        );
        self.way_points[way_point_index].set_tilt(tilt);
        self.pois[poi_index].assign_way_point(way_point_index);
        self.update_yaw(way_point_index);
    }

    /// Löst die POI-Relation eines Wegpunkts.
    ///
    /// Yaw zeigt danach wieder auf Nachfolger/Vorgänger, Tilt wird auf 0 gesetzt.
    pub fn unassign_poi(&mut self, way_point_index: usize) {
        let Some(wp) = self.way_points.get_mut(way_point_index) else {
            return;
        };
        let Some(poi_index) = wp.poi_index.take() else {
            return;
        };
        wp.should_follow_poi = false;
        wp.set_tilt(0.0);
        if let Some(poi) = self.pois.get_mut(poi_index) {
            poi.unassign_way_point(way_point_index);
        }
        self.update_yaw(way_point_index);
    }

    /// Setzt die Position eines POI und berechnet die Yaws aller
    /// darauf zielenden Wegpunkte neu.
    pub fn set_poi_coordinate(&mut self, index: usize, coordinate: GeoPoint) {
        let Some(poi) = self.pois.get_mut(index) else {
            return;
        };
        poi.set_coordinate(coordinate);
        let targets = self.pois[index].way_point_indices.clone();
        for wp_index in targets {
            self.update_yaw(wp_index);
        }
    }

    /// Setzt die Höhe eines POI.
    pub fn set_poi_altitude(&mut self, index: usize, altitude: f64) {
        if let Some(poi) = self.pois.get_mut(index) {
            poi.altitude = altitude;
        }
    }

    // ── Globale Flags ───────────────────────────────────────────────

    /// Setzt den globalen Continue-Modus und propagiert ihn auf alle Wegpunkte.
    pub fn set_should_continue(&mut self, should_continue: bool) {
        self.should_continue = should_continue;
        for wp in &mut self.way_points {
            wp.should_continue = should_continue;
        }
    }

    // ── Relationen ──────────────────────────────────────────────────

    /// Baut alle Laufzeit-Relationen aus der Array-Reihenfolge neu auf.
    ///
    /// Muss nach dem Deserialisieren aufgerufen werden: POI-Indizes werden
    /// vergeben, Rückreferenzen rekonstruiert. Ein `poi`-Index hinter dem
    /// Ende der POI-Liste (defekte Datei) wird als "keine Relation" bereinigt.
    pub fn set_relations(&mut self) {
        for (index, poi) in self.pois.iter_mut().enumerate() {
            poi.index = index;
            poi.way_point_indices.clear();
        }

        for wp_index in 0..self.way_points.len() {
            match self.way_points[wp_index].poi_index {
                Some(poi_index) if poi_index < self.pois.len() => {
                    self.pois[poi_index].assign_way_point(wp_index);
                }
                Some(_) => {
                    self.way_points[wp_index].poi_index = None;
                    self.way_points[wp_index].should_follow_poi = false;
                }
                None => {}
            }
        }
    }

    // ── Schätzungen & Fortschritt ───────────────────────────────────

    /// Distanz- und Dauer-Schätzung über alle Segmente.
    pub fn estimations(&self) -> FlightPlanEstimations {
        let mut estimations = FlightPlanEstimations::default();
        for pair in self.way_points.windows(2) {
            let distance = geo::distance_3d(
                pair[0].coordinate(),
                pair[0].altitude,
                pair[1].coordinate(),
                pair[1].altitude,
            );
            let speed = if pair[0].speed > 0.0 {
                pair[0].speed
            } else {
                DEFAULT_SPEED
            };
            estimations.distance += distance;
            estimations.duration += distance / speed;
        }
        estimations
    }

    /// Anteil jedes Segments an der geschätzten Gesamtdauer.
    ///
    /// Eintrag `i` gewichtet das Segment von Wegpunkt `i` nach `i + 1`;
    /// der letzte Wegpunkt hat Gewicht 0.
    fn segment_weights(&self) -> Vec<f64> {
        let total = self.estimations().duration;
        if total <= 0.0 {
            return vec![0.0; self.way_points.len()];
        }

        (0..self.way_points.len())
            .map(|i| match (self.way_points.get(i), self.way_points.get(i + 1)) {
                (Some(a), Some(b)) => {
                    let distance =
                        geo::distance_3d(a.coordinate(), a.altitude, b.coordinate(), b.altitude);
                    let speed = if a.speed > 0.0 { a.speed } else { DEFAULT_SPEED };
                    (distance / speed) / total
                }
                _ => 0.0,
            })
            .collect()
    }

    /// Linearer Fortschritt innerhalb des Segments ab Wegpunkt `index`.
    fn navigate_to_next_progress(&self, index: usize, current_location: GeoPoint) -> f64 {
        let (Some(origin), Some(next)) =
            (self.way_points.get(index), self.way_points.get(index + 1))
        else {
            return 0.0;
        };

        let total = geo::distance(origin.coordinate(), next.coordinate());
        if total <= 0.0 {
            return 0.0;
        }
        (geo::distance(origin.coordinate(), current_location) / total).clamp(0.0, 1.0)
    }

    /// Globaler Flugplan-Fortschritt in [0, 1].
    ///
    /// Summiert die Dauer-Gewichte aller vollständig passierten Segmente und
    /// addiert den anteiligen Fortschritt im aktuellen Segment. Wird auch bei
    /// degenerierter Positionseingabe auf [0, 1] geklemmt.
    pub fn completion_progress(
        &self,
        current_location: GeoPoint,
        last_passed_way_point_index: usize,
    ) -> f64 {
        if self.way_points.is_empty() || last_passed_way_point_index >= self.way_points.len() {
            return 0.0;
        }

        let weights = self.segment_weights();
        let current_segment_progress =
            self.navigate_to_next_progress(last_passed_way_point_index, current_location);
        let progress_at_way_point: f64 =
            weights.iter().take(last_passed_way_point_index).sum();

        (progress_at_way_point + weights[last_passed_way_point_index] * current_segment_progress)
            .clamp(0.0, 1.0)
    }

    // ── Kennzahlen ──────────────────────────────────────────────────

    /// Höchste Wegpunkt-Flughöhe in Metern.
    pub fn max_altitude(&self) -> f64 {
        self.way_points
            .iter()
            .map(|wp| wp.altitude)
            .fold(0.0, f64::max)
    }

    /// Anzahl der Foto-Start-Aktionen im Plan.
    pub fn photo_count(&self) -> usize {
        self.count_actions(super::action::ActionType::ImageStartCapture)
    }

    /// Anzahl der Video-Start-Aktionen im Plan.
    pub fn video_count(&self) -> usize {
        self.count_actions(super::action::ActionType::VideoStartCapture)
    }

    fn count_actions(&self, action_type: super::action::ActionType) -> usize {
        self.way_points
            .iter()
            .flat_map(|wp| wp.actions.iter())
            .filter(|a| a.action_type == action_type)
            .count()
    }

    // ── Interne Helfer ──────────────────────────────────────────────

    /// Verschiebt alle Wegpunkt-Rückreferenzen ab `from_index` um `delta`.
    ///
    /// Beim Einfügen (`delta = 1`) betrifft das Referenzen `>= from_index`,
    /// beim Entfernen (`delta = -1`) Referenzen `> from_index`.
    fn shift_way_point_back_references(&mut self, from_index: usize, delta: isize) {
        for poi in &mut self.pois {
            for wp_ref in &mut poi.way_point_indices {
                let shift = if delta > 0 {
                    *wp_ref >= from_index
                } else {
                    *wp_ref > from_index
                };
                if shift {
                    *wp_ref = wp_ref.wrapping_add_signed(delta);
                }
            }
        }
        // Die poi-Indizes der Wegpunkte selbst bleiben unberührt — nur die
        // Wegpunkt-Seiten der Relation verschieben sich.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::ActionType;

    fn wp(lat: f64, lon: f64) -> Waypoint {
        Waypoint::new(GeoPoint::new(lat, lon), 50.0, DEFAULT_SPEED, false)
    }

    /// Plan mit drei Wegpunkten Richtung Osten.
    fn plan_a_b_c() -> FlightPlan {
        let mut plan = FlightPlan::new();
        plan.add_way_point(wp(48.0, 2.0));
        plan.add_way_point(wp(48.0, 2.001));
        plan.add_way_point(wp(48.0, 2.002));
        plan
    }

    #[test]
    fn test_add_way_point_berechnet_yaws() {
        let plan = plan_a_b_c();
        // Alle zeigen nach Osten (der letzte auf den Vorgänger-Kurs)
        for index in 0..3 {
            let yaw = plan.way_points[index].yaw.expect("Yaw muss gesetzt sein");
            assert!((yaw - 90.0).abs() < 1.0, "Yaw[{index}] war {yaw}");
        }
    }

    #[test]
    fn test_computed_yaw_isolierter_wegpunkt_ist_null() {
        let mut plan = FlightPlan::new();
        plan.add_way_point(wp(48.0, 2.0));
        assert_eq!(plan.computed_yaw(0), 0.0);
    }

    #[test]
    fn test_insert_way_point_randindizes_unzulaessig() {
        let mut plan = plan_a_b_c();
        assert!(plan
            .insert_way_point(GeoPoint::new(48.0, 1.999), 50.0, 0)
            .is_none());
        assert!(plan
            .insert_way_point(GeoPoint::new(48.0, 2.003), 50.0, 3)
            .is_none());
        assert_eq!(plan.way_point_count(), 3);
    }

    #[test]
    fn test_insert_way_point_mittelt_tilt() {
        let mut plan = plan_a_b_c();
        plan.way_points[0].set_tilt(10.0);
        plan.way_points[1].set_tilt(25.0);

        let index = plan
            .insert_way_point(GeoPoint::new(48.0, 2.0005), 50.0, 1)
            .expect("Einfügen zwischen 0 und 1 muss gelingen");
        assert_eq!(index, 1);
        assert_eq!(plan.way_point_count(), 4);
        assert_eq!(plan.way_points[1].tilt(), 18.0); // (10 + 25) / 2 gerundet
        assert_eq!(plan.way_points[1].speed, DEFAULT_SPEED);
    }

    #[test]
    fn test_remove_way_point_out_of_bounds_ist_none() {
        let mut plan = plan_a_b_c();
        assert!(plan.remove_way_point(3).is_none());
        assert_eq!(plan.way_point_count(), 3);
    }

    #[test]
    fn test_assign_poi_setzt_yaw_und_tilt() {
        let mut plan = plan_a_b_c();
        // POI nördlich von Wegpunkt 1, deutlich höher
        let poi_index = plan.add_poi(PoiPoint::new(GeoPoint::new(48.01, 2.001), 200.0, 0));
        plan.assign_poi(1, poi_index);

        let wp = &plan.way_points[1];
        assert_eq!(wp.poi_index, Some(poi_index));
        assert!(wp.should_follow_poi);
        assert!(!wp.has_custom_yaw);
        let yaw = wp.yaw.expect("Yaw muss gesetzt sein");
        assert!(yaw < 1.0 || yaw > 359.0, "Yaw muss nach Norden zeigen: {yaw}");
        assert!(wp.tilt() > 0.0, "Tilt muss aufwärts zeigen");
        assert_eq!(plan.pois[poi_index].way_point_indices, vec![1]);
    }

    #[test]
    fn test_assign_poi_idempotente_neuzuweisung() {
        let mut plan = plan_a_b_c();
        let p0 = plan.add_poi(PoiPoint::new(GeoPoint::new(48.01, 2.0), 100.0, 0));
        let p1 = plan.add_poi(PoiPoint::new(GeoPoint::new(47.99, 2.0), 100.0, 1));

        plan.assign_poi(1, p0);
        plan.assign_poi(1, p1);

        assert_eq!(plan.way_points[1].poi_index, Some(p1));
        assert!(plan.pois[p0].way_point_indices.is_empty());
        assert_eq!(plan.pois[p1].way_point_indices, vec![1]);
    }

    #[test]
    fn test_unassign_poi_setzt_tilt_zurueck() {
        let mut plan = plan_a_b_c();
        let poi_index = plan.add_poi(PoiPoint::new(GeoPoint::new(48.01, 2.001), 200.0, 0));
        plan.assign_poi(1, poi_index);
        assert!(plan.way_points[1].tilt() != 0.0);

        plan.unassign_poi(1);

        let wp = &plan.way_points[1];
        assert_eq!(wp.poi_index, None);
        assert!(!wp.should_follow_poi);
        assert_eq!(wp.tilt(), 0.0);
        // Yaw zeigt wieder auf den Nachfolger (Osten)
        let yaw = wp.yaw.expect("Yaw muss gesetzt sein");
        assert!((yaw - 90.0).abs() < 1.0, "Yaw war {yaw}");
        assert!(plan.pois[poi_index].way_point_indices.is_empty());
    }

    #[test]
    fn test_set_custom_yaw_innerhalb_toleranz_bleibt_automatik() {
        let mut plan = plan_a_b_c();
        let computed = plan.computed_yaw(0);

        plan.set_custom_yaw(0, computed + 3.0);
        assert!(!plan.way_points[0].has_custom_yaw);
        assert_eq!(plan.way_points[0].yaw, Some(computed));

        plan.set_custom_yaw(0, computed + 20.0);
        assert!(plan.way_points[0].has_custom_yaw);
    }

    #[test]
    fn test_custom_yaw_ueberlebt_koordinaten_update() {
        let mut plan = plan_a_b_c();
        plan.set_custom_yaw(1, 200.0);
        assert!(plan.way_points[1].has_custom_yaw);

        plan.set_way_point_coordinate(1, GeoPoint::new(48.0005, 2.001));
        assert_eq!(plan.way_points[1].yaw, Some(200.0), "fixierter Yaw darf nicht neu berechnet werden");
    }

    #[test]
    fn test_remove_poi_reindiziert_relationen() {
        let mut plan = plan_a_b_c();
        let p0 = plan.add_poi(PoiPoint::new(GeoPoint::new(48.01, 2.0), 100.0, 0));
        let _p1 = plan.add_poi(PoiPoint::new(GeoPoint::new(48.02, 2.0), 100.0, 1));
        let p2 = plan.add_poi(PoiPoint::new(GeoPoint::new(48.03, 2.0), 100.0, 2));
        plan.assign_poi(0, p0);
        plan.assign_poi(2, p2);

        let removed = plan.remove_poi(0).expect("POI 0 muss entfernbar sein");
        assert_eq!(removed.way_point_indices, Vec::<usize>::new());

        assert_eq!(plan.poi_count(), 2);
        assert_eq!(plan.pois[0].index, 0);
        assert_eq!(plan.pois[1].index, 1);
        assert_eq!(plan.way_points[0].poi_index, None, "Relation auf entfernten POI muss gelöst sein");
        assert_eq!(plan.way_points[2].poi_index, Some(1), "höherer poi-Index muss dekrementiert sein");
        assert_eq!(plan.pois[1].way_point_indices, vec![2]);
    }

    #[test]
    fn test_set_relations_bereinigt_defekte_poi_indizes() {
        let mut plan = plan_a_b_c();
        plan.add_poi(PoiPoint::new(GeoPoint::new(48.01, 2.0), 100.0, 0));
        plan.way_points[0].poi_index = Some(0);
        plan.way_points[1].poi_index = Some(7); // hinter dem Listenende

        plan.set_relations();

        assert_eq!(plan.way_points[0].poi_index, Some(0));
        assert_eq!(plan.pois[0].way_point_indices, vec![0]);
        assert_eq!(plan.way_points[1].poi_index, None);
        assert!(!plan.way_points[1].should_follow_poi);
    }

    #[test]
    fn test_estimations_summiert_segmente() {
        let plan = plan_a_b_c();
        let estimations = plan.estimations();
        assert!(estimations.distance > 0.0);
        // distance / speed
        let expected = estimations.distance / DEFAULT_SPEED;
        assert!((estimations.duration - expected).abs() < 1e-9);
    }

    #[test]
    fn test_completion_progress_grenzen() {
        let plan = plan_a_b_c();
        // Out-of-bounds Index
        assert_eq!(plan.completion_progress(GeoPoint::new(48.0, 2.0), 5), 0.0);
        // Leerer Plan
        let empty = FlightPlan::new();
        assert_eq!(empty.completion_progress(GeoPoint::new(48.0, 2.0), 0), 0.0);
    }

    #[test]
    fn test_completion_progress_monoton_entlang_der_route() {
        let plan = plan_a_b_c();
        let mut last = 0.0;
        // Position wandert auf gerader Linie von Wegpunkt 0 nach 1
        for step in 0..=10 {
            let lon = 2.0 + 0.001 * (step as f64) / 10.0;
            let progress = plan.completion_progress(GeoPoint::new(48.0, lon), 0);
            assert!(progress >= last, "Fortschritt darf nicht sinken");
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
        // Zweites Segment schließt an
        for step in 0..=10 {
            let lon = 2.001 + 0.001 * (step as f64) / 10.0;
            let progress = plan.completion_progress(GeoPoint::new(48.0, lon), 1);
            assert!(progress >= last, "Fortschritt darf nicht sinken");
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
        assert!((last - 1.0).abs() < 1e-9, "am Ende muss 1.0 erreicht sein");
    }

    #[test]
    fn test_completion_progress_degenerierte_position_geklemmt() {
        let plan = plan_a_b_c();
        // Position weit hinter dem Segment → Segmentfortschritt wird auf 1 geklemmt
        let progress = plan.completion_progress(GeoPoint::new(52.0, 30.0), 0);
        assert!((0.0..=1.0).contains(&progress));
    }

    #[test]
    fn test_set_should_continue_propagiert() {
        let mut plan = plan_a_b_c();
        plan.set_should_continue(true);
        assert!(plan.should_continue);
        assert!(plan.way_points.iter().all(|wp| wp.should_continue));
    }

    #[test]
    fn test_remove_way_point_zieht_rueckreferenzen_nach() {
        let mut plan = plan_a_b_c();
        let poi_index = plan.add_poi(PoiPoint::new(GeoPoint::new(48.01, 2.0), 100.0, 0));
        plan.assign_poi(2, poi_index);

        plan.remove_way_point(0);

        // Wegpunkt 2 ist jetzt Wegpunkt 1; die Rückreferenz muss folgen
        assert_eq!(plan.way_points[1].poi_index, Some(poi_index));
        assert_eq!(plan.pois[poi_index].way_point_indices, vec![1]);
    }

    #[test]
    fn test_zaehler_fuer_capture_aktionen() {
        let mut plan = plan_a_b_c();
        plan.way_points[0].add_action(Action::new(ActionType::ImageStartCapture));
        plan.way_points[1].add_action(Action::new(ActionType::ImageStopCapture));
        plan.way_points[1].add_action(Action::new(ActionType::VideoStartCapture));
        assert_eq!(plan.photo_count(), 1);
        assert_eq!(plan.video_count(), 1);
    }
}
