/// Great-circle distance between two coordinates.
///
/// Uses the haversine formula on a spherical Earth of mean radius
/// 6371.0088 km. Over the distances this service cares about (< 1000 km)
/// the difference from an ellipsoidal geodesic stays under 0.5%.

use crate::model::Coordinate;

/// IUGG mean Earth radius, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Distance in kilometres between `a` and `b` along the Earth's surface.
///
/// Always non-negative and symmetric in its arguments.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::{find_city, REFERENCE_POINT};

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_km(REFERENCE_POINT, REFERENCE_POINT), 0.0);
    }

    #[test]
    fn test_istanbul_to_bursa_is_about_91_km() {
        let bursa = find_city("Bursa").expect("Bursa should be in the catalog");
        let d = distance_km(REFERENCE_POINT, bursa.coordinate);
        assert!((88.0..95.0).contains(&d), "Istanbul-Bursa distance was {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let tekirdag = find_city("Tekirdağ").unwrap().coordinate;
        let sakarya = find_city("Sakarya").unwrap().coordinate;
        assert_eq!(distance_km(tekirdag, sakarya), distance_km(sakarya, tekirdag));
    }

    #[test]
    fn test_antipodal_points_do_not_produce_nan() {
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
