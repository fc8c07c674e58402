//! Reine Geodäsie-Funktionen: Peilung, Distanz, Tilt-Ableitung.
//!
//! Layer-neutral: wird von `core::flight_plan` für die automatische
//! Yaw/Tilt-Berechnung und von `render` für Segment-Mittelpunkte benutzt.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Erdradius in Metern (WGS84-Mittelwert).
const EARTH_RADIUS_M: f64 = 6_371_008.8;
/// Schrittweite der Kamera-Tilt-Quantisierung in Grad.
const TILT_STEP_DEG: f64 = 5.0;

/// Geodätische Position (Breite/Länge in Grad).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Geographische Breite in Grad
    pub latitude: f64,
    /// Geographische Länge in Grad
    pub longitude: f64,
}

impl GeoPoint {
    /// Erstellt einen neuen GeoPoint.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Linearer Mittelpunkt zweier Positionen.
    ///
    /// Für die kurzen Segmente eines Flugplans ist die lineare Interpolation
    /// der Breiten/Längen-Werte ausreichend genau (kein Großkreis-Midpoint nötig).
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        let a = DVec2::new(self.latitude, self.longitude);
        let b = DVec2::new(other.latitude, other.longitude);
        let mid = a.lerp(b, 0.5);
        GeoPoint::new(mid.x, mid.y)
    }
}

/// Normalisiert einen Winkel auf [0, 360) Grad.
pub fn bounded_degrees(value: f64) -> f64 {
    let bounded = value % 360.0;
    if bounded < 0.0 {
        bounded + 360.0
    } else {
        bounded
    }
}

/// Anfangs-Peilung des Großkreises von `from` nach `to` in Grad [0, 360).
///
/// Deckungsgleiche Punkte liefern 0.0 — nachgelagerte Konsumenten
/// (Grafik-Rotation) vertragen kein NaN.
pub fn bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    if y == 0.0 && x == 0.0 {
        return 0.0;
    }

    bounded_degrees(y.atan2(x).to_degrees())
}

/// Großkreis-Distanz zwischen zwei Positionen in Metern (Haversine).
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Distanz zwischen zwei Positionen inkl. Höhendifferenz in Metern.
pub fn distance_3d(a: GeoPoint, altitude_a: f64, b: GeoPoint, altitude_b: f64) -> f64 {
    let planar = distance(a, b);
    let vertical = altitude_b - altitude_a;
    (planar * planar + vertical * vertical).sqrt()
}

/// Prüft ob zwei Winkel (Grad) höchstens `delta` auseinander liegen.
///
/// Die Differenz wird auf dem Kreis gemessen (359° und 1° liegen 2° auseinander).
pub fn is_close_to(a: f64, b: f64, delta: f64) -> bool {
    let diff = (bounded_degrees(a) - bounded_degrees(b)).abs();
    diff.min(360.0 - diff) <= delta
}

/// Rundet einen Tilt-Winkel auf das nächste 5°-Vielfache (Kamera-Quantisierung).
pub fn closest_angle(value: f64) -> f64 {
    (value / TILT_STEP_DEG).round() * TILT_STEP_DEG
}

/// Leitet den Kamera-Tilt aus der Geometrie zwischen Wegpunkt und POI ab.
///
/// `atan2(Höhendifferenz, planare Distanz)` in Grad, quantisiert auf 5°-Schritte.
pub fn tilt_from_geometry(
    self_point: GeoPoint,
    self_altitude: f64,
    poi_point: GeoPoint,
    poi_altitude: f64,
) -> f64 {
    let planar = distance(self_point, poi_point);
    let tilt = (poi_altitude - self_altitude).atan2(planar).to_degrees();
    closest_angle(tilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bearing_kardinalrichtungen() {
        let origin = GeoPoint::new(48.0, 2.0);

        // Norden
        assert_relative_eq!(
            bearing(origin, GeoPoint::new(48.1, 2.0)),
            0.0,
            epsilon = 0.01
        );
        // Osten
        assert_relative_eq!(
            bearing(origin, GeoPoint::new(48.0, 2.1)),
            90.0,
            epsilon = 0.1
        );
        // Süden
        assert_relative_eq!(
            bearing(origin, GeoPoint::new(47.9, 2.0)),
            180.0,
            epsilon = 0.01
        );
        // Westen
        assert_relative_eq!(
            bearing(origin, GeoPoint::new(48.0, 1.9)),
            270.0,
            epsilon = 0.1
        );
    }

    #[test]
    fn test_bearing_deckungsgleiche_punkte_liefert_null() {
        let p = GeoPoint::new(48.0, 2.0);
        assert_eq!(bearing(p, p), 0.0);
    }

    #[test]
    fn test_distance_ein_breitengrad() {
        // Ein Breitengrad entspricht ca. 111.2 km
        let d = distance(GeoPoint::new(48.0, 2.0), GeoPoint::new(49.0, 2.0));
        assert!((d - 111_195.0).abs() < 200.0, "Distanz war {d}");
    }

    #[test]
    fn test_distance_selber_punkt_ist_null() {
        let p = GeoPoint::new(48.0, 2.0);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn test_is_close_to_mit_wrap_around() {
        assert!(is_close_to(359.0, 1.0, 5.0));
        assert!(is_close_to(1.0, 359.0, 5.0));
        assert!(!is_close_to(10.0, 350.0, 5.0));
        assert!(is_close_to(90.0, 92.0, 5.0));
        assert!(!is_close_to(90.0, 96.0, 5.0));
    }

    #[test]
    fn test_closest_angle_quantisierung() {
        assert_eq!(closest_angle(0.0), 0.0);
        assert_eq!(closest_angle(2.4), 0.0);
        assert_eq!(closest_angle(2.6), 5.0);
        assert_eq!(closest_angle(-12.4), -10.0);
        assert_eq!(closest_angle(-12.6), -15.0);
        assert_eq!(closest_angle(44.9), 45.0);
    }

    #[test]
    fn test_tilt_from_geometry_poi_ueber_wegpunkt() {
        let wp = GeoPoint::new(48.0, 2.0);
        // POI ca. 111 m östlich, 111 m höher → 45° aufwärts
        let poi = GeoPoint::new(48.0, 2.0 + 1.0 / 669.0);
        let planar = distance(wp, poi);
        let tilt = tilt_from_geometry(wp, 0.0, poi, planar);
        assert_eq!(tilt, 45.0);
    }

    #[test]
    fn test_tilt_from_geometry_gleiche_hoehe_ist_null() {
        let wp = GeoPoint::new(48.0, 2.0);
        let poi = GeoPoint::new(48.001, 2.001);
        assert_eq!(tilt_from_geometry(wp, 50.0, poi, 50.0), 0.0);
    }

    #[test]
    fn test_bounded_degrees() {
        assert_eq!(bounded_degrees(0.0), 0.0);
        assert_eq!(bounded_degrees(360.0), 0.0);
        assert_eq!(bounded_degrees(-90.0), 270.0);
        assert_eq!(bounded_degrees(450.0), 90.0);
    }

    #[test]
    fn test_midpoint_linear() {
        let a = GeoPoint::new(48.0, 2.0);
        let b = GeoPoint::new(48.2, 2.4);
        let mid = a.midpoint(&b);
        assert_relative_eq!(mid.latitude, 48.1);
        assert_relative_eq!(mid.longitude, 2.2);
    }
}
