//! Integrationstests für die Graph-Edits:
//! - Index-Lückenlosigkeit über Edit-Sequenzen
//! - Bidirektionale Konsistenz der POI-Relationen
//! - Automatik- vs. Custom-Yaw

use flightplan_editor::{FlightPlan, GeoPoint, PoiPoint, Waypoint};

const SPEED: f64 = 2.0;

fn wp(lat: f64, lon: f64) -> Waypoint {
    Waypoint::new(GeoPoint::new(lat, lon), 50.0, SPEED, false)
}

fn poi(lat: f64, lon: f64) -> PoiPoint {
    PoiPoint::new(GeoPoint::new(lat, lon), 30.0, 0)
}

/// Prüft beide Richtungen der POI-Relation sowie die Index-Felder.
fn assert_konsistent(plan: &FlightPlan) {
    for (wp_index, wp) in plan.way_points.iter().enumerate() {
        if let Some(poi_index) = wp.poi_index {
            let poi = plan
                .poi(poi_index)
                .unwrap_or_else(|| panic!("Wegpunkt {} zeigt auf fehlenden POI {}", wp_index, poi_index));
            assert!(
                poi.way_point_indices.contains(&wp_index),
                "POI {} kennt Wegpunkt {} nicht",
                poi_index,
                wp_index
            );
        }
    }
    for (poi_index, poi) in plan.pois.iter().enumerate() {
        assert_eq!(poi.index, poi_index, "POI-Index-Feld weicht von Position ab");
        for &wp_index in &poi.way_point_indices {
            assert_eq!(
                plan.way_points[wp_index].poi_index,
                Some(poi_index),
                "Rückreferenz von POI {} auf Wegpunkt {} ist einseitig",
                poi_index,
                wp_index
            );
        }
    }
}

// ─── Index-Lückenlosigkeit ──────────────────────────────────────────────────

#[test]
fn test_edit_sequenz_erhaelt_kontiguitaet_und_konsistenz() {
    let mut plan = FlightPlan::new();
    for i in 0..5 {
        plan.add_way_point(wp(48.0, 2.0 + 0.001 * i as f64));
    }
    let p0 = plan.add_poi(poi(48.01, 2.0));
    let p1 = plan.add_poi(poi(48.01, 2.002));
    plan.assign_poi(1, p0);
    plan.assign_poi(3, p1);
    plan.assign_poi(4, p1);
    assert_konsistent(&plan);

    plan.insert_way_point(GeoPoint::new(48.0, 2.0015), 50.0, 2);
    assert_konsistent(&plan);
    assert_eq!(plan.way_point_count(), 6);
    // Die Zuweisungen an alte Wegpunkte 3 und 4 sind jetzt auf 4 und 5 gerückt
    assert_eq!(plan.way_points[4].poi_index, Some(p1));
    assert_eq!(plan.way_points[5].poi_index, Some(p1));

    plan.remove_way_point(1);
    assert_konsistent(&plan);
    assert_eq!(plan.way_point_count(), 5);
    assert!(plan.pois[p0].way_point_indices.is_empty(), "Relation des entfernten Wegpunkts muss weg sein");

    plan.remove_poi(p0);
    assert_konsistent(&plan);
    assert_eq!(plan.poi_count(), 1);

    plan.remove_way_point(0);
    plan.remove_way_point(plan.way_point_count() - 1);
    assert_konsistent(&plan);
}

// ─── Spezifische Szenarien ──────────────────────────────────────────────────

#[test]
fn test_einfuegen_zwischen_a_und_b() {
    let mut plan = FlightPlan::new();
    plan.add_way_point(wp(48.0, 2.0)); // A
    plan.add_way_point(wp(48.0, 2.002)); // B

    let index = plan
        .insert_way_point(GeoPoint::new(48.0, 2.001), 50.0, 1)
        .expect("Einfügen zwischen A und B muss gelingen");

    assert_eq!(index, 1);
    assert_eq!(plan.way_point_count(), 3);
    assert_eq!(plan.way_points[1].coordinate().longitude, 2.001);
    // B ist nach hinten gerückt
    assert_eq!(plan.way_points[2].coordinate().longitude, 2.002);
}

#[test]
fn test_poi_entfernen_reindiziert() {
    let mut plan = FlightPlan::new();
    plan.add_way_point(wp(48.0, 2.0)); // W1
    plan.add_way_point(wp(48.0, 2.001)); // W2
    let p0 = plan.add_poi(poi(48.01, 2.0));
    let _p1 = plan.add_poi(poi(48.02, 2.0));
    let p2 = plan.add_poi(poi(48.03, 2.0));
    plan.assign_poi(0, p0);
    plan.assign_poi(1, p2);

    plan.remove_poi(0);

    assert_eq!(plan.poi_count(), 2);
    assert_eq!(plan.way_points[0].poi_index, None);
    assert_eq!(plan.way_points[1].poi_index, Some(1));
    assert_konsistent(&plan);
}

// ─── Yaw-Verhalten ──────────────────────────────────────────────────────────

#[test]
fn test_yaw_automatik_folgt_poi_vor_nachbarn() {
    let mut plan = FlightPlan::new();
    plan.add_way_point(wp(48.0, 2.0));
    plan.add_way_point(wp(48.0, 2.001));

    // Ohne POI: Yaw zeigt nach Osten auf den Nachfolger
    let yaw = plan.way_points[0].yaw.expect("Yaw muss gesetzt sein");
    assert!((yaw - 90.0).abs() < 1.0);

    // Mit POI im Norden: Yaw schwenkt auf den POI
    let p = plan.add_poi(poi(48.01, 2.0));
    plan.assign_poi(0, p);
    let yaw = plan.way_points[0].yaw.expect("Yaw muss gesetzt sein");
    assert!(yaw < 1.0 || yaw > 359.0, "Yaw muss nach Norden zeigen: {yaw}");

    // Nach dem Lösen wieder auf den Nachfolger
    plan.unassign_poi(0);
    let yaw = plan.way_points[0].yaw.expect("Yaw muss gesetzt sein");
    assert!((yaw - 90.0).abs() < 1.0);
}

#[test]
fn test_custom_yaw_friert_neuberechnung_ein() {
    let mut plan = FlightPlan::new();
    plan.add_way_point(wp(48.0, 2.0));
    plan.add_way_point(wp(48.0, 2.001));
    plan.add_way_point(wp(48.0, 2.002));

    plan.set_custom_yaw(1, 180.0);
    assert!(plan.way_points[1].has_custom_yaw);

    // Nachbar verschieben: der fixierte Yaw bleibt stehen
    plan.set_way_point_coordinate(2, GeoPoint::new(48.001, 2.002));
    assert_eq!(plan.way_points[1].yaw, Some(180.0));

    // Zurück in die Automatik: Wert nahe am berechneten Yaw
    let computed = plan.computed_yaw(1);
    plan.set_custom_yaw(1, computed + 2.0);
    assert!(!plan.way_points[1].has_custom_yaw);
    assert_eq!(plan.way_points[1].yaw, Some(computed));

    // Jetzt folgt der Yaw Bewegungen wieder
    plan.set_way_point_coordinate(2, GeoPoint::new(48.002, 2.0025));
    assert_ne!(plan.way_points[1].yaw, Some(computed));
}

#[test]
fn test_yaw_wrap_around_toleranz() {
    let mut plan = FlightPlan::new();
    plan.add_way_point(wp(48.0, 2.0));
    plan.add_way_point(wp(48.01, 2.0)); // Nachfolger im Norden → Yaw ~0°

    // 358° liegt über die 0°-Grenze hinweg innerhalb der 5°-Toleranz
    plan.set_custom_yaw(0, 358.0);
    assert!(!plan.way_points[0].has_custom_yaw, "Wrap-around muss in der Toleranz liegen");
}
