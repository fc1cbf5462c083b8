use shared_types::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const KM_PER_MILE: f64 = 1.6093;

pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

/// Great-circle distance in kilometers (haversine).
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let dlat = (to.lat - from.lat).to_radians();
    let dlng = (to.long - from.long).to_radians();

    // Rounding can push `a` past 1 for near-antipodal points.
    let a = ((dlat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2))
    .min(1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance to a point that may not exist; an unplaceable record is infinitely far.
pub fn distance_to(from: GeoPoint, to: Option<GeoPoint>) -> f64 {
    to.map_or(f64::INFINITY, |to| distance_km(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hartford_to_new_haven() {
        let hartford = GeoPoint::new(41.7658, -72.6734);
        let new_haven = GeoPoint::new(41.3083, -72.9279);

        let distance = distance_km(hartford, new_haven);
        assert!(distance > 54.0 && distance < 56.0, "{distance}");
        assert!(distance_km(hartford, hartford) < 1e-9);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference_apart() {
        let pairs = [
            (GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0)),
            (GeoPoint::new(41.7658, -72.6734), GeoPoint::new(-41.7658, 107.3266)),
            (GeoPoint::new(90.0, 0.0), GeoPoint::new(-90.0, 0.0)),
        ];
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        for (from, to) in pairs {
            let distance = distance_km(from, to);
            assert!(!distance.is_nan(), "{from:?} -> {to:?}");
            assert!((distance - half).abs() < 1.0, "{distance}");
        }
    }

    #[test]
    fn missing_point_is_infinitely_far() {
        assert_eq!(distance_to(GeoPoint::default(), None), f64::INFINITY);
        assert!((miles_to_km(10.0) - 16.093).abs() < 1e-9);
    }
}
