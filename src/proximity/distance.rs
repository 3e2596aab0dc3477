use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Kilometers, rounded to 2 decimal places
    pub distance_km: f64,
    pub formatted: String,
}

impl DistanceResult {
    pub fn from_km(distance_km: f64) -> Self {
        Self {
            distance_km,
            formatted: format_distance(distance_km),
        }
    }

    pub fn zero() -> Self {
        Self::from_km(0.0)
    }
}

/// Calculate distance between two coordinates using Haversine formula
/// Returns unrounded distance in kilometers
pub fn haversine_km(origin: &Coordinate, target: &Coordinate) -> f64 {
    let (lat1_rad, lng1_rad) = origin.to_radians();
    let (lat2_rad, lng2_rad) = target.to_radians();
    let delta_lat = lat2_rad - lat1_rad;
    let delta_lng = lng2_rad - lng1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 near antipodal points
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance, rounded to 2 decimals only once at the end.
pub fn distance(origin: &Coordinate, target: &Coordinate) -> DistanceResult {
    DistanceResult::from_km(round_to(haversine_km(origin, target), 2))
}

/// Distance between two possibly-absent locations.
///
/// An absent side yields a zero distance, not an error. Callers that care
/// about the difference between "same place" and "unknown place" must check
/// for `None` before trusting a 0 km result.
pub fn distance_between(origin: Option<&Coordinate>, target: Option<&Coordinate>) -> DistanceResult {
    match (origin, target) {
        (Some(origin), Some(target)) => distance(origin, target),
        _ => DistanceResult::zero(),
    }
}

/// "850 m" below one kilometer, "12.3 km" otherwise.
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{} m", (distance_km * 1000.0).round() as i64)
    } else {
        format!("{:.1} km", round_to(distance_km, 1))
    }
}

/// Round half away from zero to `decimals` places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUAYAQUIL_MECHANIC: Coordinate = Coordinate::new(-2.12992, -79.90804);
    const GUAYAQUIL_SERVICE: Coordinate = Coordinate::new(-2.1894, -79.8837);
    const MANTA: Coordinate = Coordinate::new(-0.9536, -80.7381);
    const PORTOVIEJO: Coordinate = Coordinate::new(-1.0582, -80.7081);
    const CHONE: Coordinate = Coordinate::new(-1.3928, -80.4564);

    #[test]
    fn test_guayaquil_mechanic_to_service() {
        let result = distance(&GUAYAQUIL_MECHANIC, &GUAYAQUIL_SERVICE);
        assert_eq!(result.distance_km, 7.15);
        assert_eq!(result.formatted, "7.2 km");
    }

    #[test]
    fn test_manta_portoviejo() {
        let result = distance(&MANTA, &PORTOVIEJO);
        assert_eq!(result.distance_km, 12.1);
        assert_eq!(result.formatted, "12.1 km");
    }

    #[test]
    fn test_same_point_is_zero() {
        let result = distance(&MANTA, &MANTA);
        assert_eq!(result.distance_km, 0.0);
        assert_eq!(result.formatted, "0 m");
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (MANTA, PORTOVIEJO),
            (MANTA, CHONE),
            (GUAYAQUIL_MECHANIC, CHONE),
            (Coordinate::new(52.52, 13.405), Coordinate::new(-33.8688, 151.2093)),
        ];
        for (a, b) in pairs {
            let ab = haversine_km(&a, &b);
            let ba = haversine_km(&b, &a);
            assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0), "{} vs {}", ab, ba);
            assert_eq!(distance(&a, &b), distance(&b, &a));
        }
    }

    #[test]
    fn test_triangle_inequality() {
        let points = [MANTA, PORTOVIEJO, CHONE, GUAYAQUIL_SERVICE];
        for a in &points {
            for b in &points {
                for c in &points {
                    let direct = haversine_km(a, c);
                    let via = haversine_km(a, b) + haversine_km(b, c);
                    assert!(direct <= via + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_result_has_two_decimals() {
        let points = [MANTA, PORTOVIEJO, CHONE, GUAYAQUIL_MECHANIC, GUAYAQUIL_SERVICE];
        for a in &points {
            for b in &points {
                let km = distance(a, b).distance_km;
                assert_eq!(round_to(km, 2), km);
            }
        }
    }

    #[test]
    fn test_missing_side_is_zero() {
        assert_eq!(distance_between(Some(&MANTA), None), DistanceResult::zero());
        assert_eq!(distance_between(None, Some(&MANTA)), DistanceResult::zero());
        assert_eq!(
            distance_between(Some(&MANTA), Some(&PORTOVIEJO)),
            distance(&MANTA, &PORTOVIEJO)
        );
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.5), "500 m");
        assert_eq!(format_distance(0.85), "850 m");
        assert_eq!(format_distance(2.34), "2.3 km");
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(12.0), "12.0 km");
    }
}
