//! Great-circle distance on a spherical Earth.

use revnroll_types::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
///
/// Symmetric in its arguments and zero for identical points. Inputs are
/// not range-checked.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = to.longitude.to_radians() - from.longitude.to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    // Rounding can push `a` a hair past 1 for near-antipodal points.
    let a = half_lat
        .mul_add(half_lat, lat1.cos() * lat2.cos() * half_lon * half_lon)
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDAPEST: GeoPoint = GeoPoint::new(47.4979, 19.0402);
    const SZEGED: GeoPoint = GeoPoint::new(46.2530, 20.1414);

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_km(BUDAPEST, BUDAPEST).abs() < 1e-12);
        assert!(haversine_km(SZEGED, SZEGED).abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (BUDAPEST, SZEGED),
            (GeoPoint::new(0.0, 0.0), GeoPoint::new(-45.0, 170.0)),
            (GeoPoint::new(89.9, -179.9), GeoPoint::new(-89.9, 179.9)),
        ];
        for (a, b) in pairs {
            assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        }
    }

    #[test]
    fn one_degree_along_equator_and_meridian() {
        // 2 * PI * R / 360
        let expected = 111.194_926_644_558_73;
        let along_equator = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        let along_meridian = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((along_equator - expected).abs() < 1e-6);
        assert!((along_meridian - expected).abs() < 1e-6);
    }

    #[test]
    fn budapest_to_szeged() {
        let d = haversine_km(BUDAPEST, SZEGED);
        assert!((d - 161.76).abs() < 0.05, "got {d}");
    }

    #[test]
    fn antipodes_are_half_circumference_apart() {
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - core::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
