//! Roundtrip-Tests für das JSON-Format gespeicherter Flugpläne.

use flightplan_editor::{
    parse_saved_flight_plan, write_saved_flight_plan, FlightPlan, GeoPoint, PoiPoint,
    SavedFlightPlan, Waypoint,
};

fn beispiel_plan() -> FlightPlan {
    let mut plan = FlightPlan::new();
    plan.add_way_point(Waypoint::new(GeoPoint::new(48.8584, 2.2945), 80.0, 2.0, false));
    plan.add_way_point(Waypoint::new(GeoPoint::new(48.8590, 2.2950), 60.0, 4.0, false));
    plan.add_way_point(Waypoint::new(GeoPoint::new(48.8600, 2.2960), 50.0, 4.0, false));

    let poi = plan.add_poi(PoiPoint::new(GeoPoint::new(48.8592, 2.2930), 20.0, 3));
    plan.assign_poi(1, poi);
    plan.set_custom_yaw(2, 270.0);
    plan.set_should_continue(true);
    plan
}

#[test]
fn test_roundtrip_reproduziert_den_graphen() {
    let original = beispiel_plan();
    let saved = SavedFlightPlan::new(1, "Eiffel-Runde".into(), "uuid-42".into(), original.clone());

    let json = write_saved_flight_plan(&saved).expect("muss serialisieren");
    let restored = parse_saved_flight_plan(&json).expect("muss parsen");
    let plan = &restored.plan;

    assert_eq!(plan.way_point_count(), original.way_point_count());
    assert_eq!(plan.poi_count(), original.poi_count());

    for (restored_wp, original_wp) in plan.way_points.iter().zip(&original.way_points) {
        assert_eq!(restored_wp.latitude, original_wp.latitude);
        assert_eq!(restored_wp.longitude, original_wp.longitude);
        assert_eq!(restored_wp.altitude, original_wp.altitude);
        assert_eq!(restored_wp.speed, original_wp.speed);
        assert_eq!(restored_wp.yaw, original_wp.yaw);
        assert_eq!(restored_wp.has_custom_yaw, original_wp.has_custom_yaw);
        assert_eq!(restored_wp.poi_index, original_wp.poi_index);
        assert_eq!(restored_wp.should_continue, original_wp.should_continue);
        assert_eq!(restored_wp.should_follow_poi, original_wp.should_follow_poi);
        assert_eq!(restored_wp.actions, original_wp.actions);
    }

    // Rückreferenzen wurden nach dem Laden rekonstruiert
    assert_eq!(plan.pois[0].way_point_indices, vec![1]);
    assert_eq!(plan.pois[0].color, 3);
    assert!(plan.should_continue);
    assert!(plan.last_point_rth);
}

#[test]
fn test_custom_yaw_ueberlebt_den_roundtrip() {
    let saved = SavedFlightPlan::new(1, "t".into(), "u".into(), beispiel_plan());
    let json = write_saved_flight_plan(&saved).expect("muss serialisieren");
    let restored = parse_saved_flight_plan(&json).expect("muss parsen");

    assert!(restored.plan.way_points[2].has_custom_yaw);
    assert_eq!(restored.plan.way_points[2].yaw, Some(270.0));
}

#[test]
fn test_umschlag_felder_bleiben_erhalten() {
    let mut saved = SavedFlightPlan::new(3, "Titel".into(), "uuid-7".into(), beispiel_plan());
    saved.product = "ANAFI 4K".into();
    saved.product_id = 2324;
    saved.zoom_level = Some(17.5);
    saved.dirty = true;

    let json = write_saved_flight_plan(&saved).expect("muss serialisieren");
    let restored = parse_saved_flight_plan(&json).expect("muss parsen");

    assert_eq!(restored.version, 3);
    assert_eq!(restored.title, "Titel");
    assert_eq!(restored.uuid, "uuid-7");
    assert_eq!(restored.product, "ANAFI 4K");
    assert_eq!(restored.zoom_level, Some(17.5));
    assert!(restored.dirty);
    assert_eq!(restored.obstacle_avoidance_activated, Some(true));
}
