use serde::{Deserialize, Serialize};

use super::distance::EARTH_RADIUS_KM;

/// A point on the Earth's surface in decimal degrees. Fixed once built.
///
/// Range checks are the caller's job; the engine trusts what it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Build a coordinate from nullable columns. Both parts must be present;
    /// there is no such thing as half a location.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }

    /// Whether the values fall inside the valid latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }

    /// Smallest lat/lng box containing every point within `radius_km`.
    ///
    /// Meant for narrowing a database query before exact distances are
    /// computed. The longitude range is `None` when the circle reaches a pole
    /// or wraps the antimeridian.
    pub fn bounding_box(&self, radius_km: f64) -> BoundingBox {
        let angular = radius_km.max(0.0) / EARTH_RADIUS_KM;
        let (lat, lng) = self.to_radians();
        let min_lat = lat - angular;
        let max_lat = lat + angular;
        let half_pi = std::f64::consts::FRAC_PI_2;

        if min_lat <= -half_pi || max_lat >= half_pi {
            return BoundingBox {
                min_latitude: min_lat.max(-half_pi).to_degrees(),
                max_latitude: max_lat.min(half_pi).to_degrees(),
                longitude_range: None,
            };
        }

        let delta_lng = (angular.sin() / lat.cos()).asin();
        let min_lng = (lng - delta_lng).to_degrees();
        let max_lng = (lng + delta_lng).to_degrees();
        let longitude_range = (min_lng >= -180.0 && max_lng <= 180.0).then_some((min_lng, max_lng));

        BoundingBox {
            min_latitude: min_lat.to_degrees(),
            max_latitude: max_lat.to_degrees(),
            longitude_range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub longitude_range: Option<(f64, f64)>,
}

impl BoundingBox {
    pub fn contains(&self, point: &Coordinate) -> bool {
        let lat_ok = (self.min_latitude..=self.max_latitude).contains(&point.latitude);
        let lng_ok = self
            .longitude_range
            .is_none_or(|(min, max)| (min..=max).contains(&point.longitude));
        lat_ok && lng_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both() {
        assert_eq!(
            Coordinate::from_parts(Some(-0.9536), Some(-80.7381)),
            Some(Coordinate::new(-0.9536, -80.7381))
        );
        assert_eq!(Coordinate::from_parts(Some(-0.9536), None), None);
        assert_eq!(Coordinate::from_parts(None, Some(-80.7381)), None);
        assert_eq!(Coordinate::from_parts(None, None), None);
    }

    #[test]
    fn test_zero_is_a_real_coordinate() {
        // Gulf of Guinea, not "missing"
        assert_eq!(
            Coordinate::from_parts(Some(0.0), Some(0.0)),
            Some(Coordinate::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_accessors() {
        let chone = Coordinate::new(-1.3928, -80.4564);
        assert_eq!(chone.latitude(), -1.3928);
        assert_eq!(chone.longitude(), -80.4564);
    }

    #[test]
    fn test_is_valid() {
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_bounding_box_contains_points_inside_radius() {
        let manta = Coordinate::new(-0.9536, -80.7381);
        let chone = Coordinate::new(-1.3928, -80.4564); // ~58 km
        let el_carmen = Coordinate::new(-1.6756, -80.3624); // well past 60 km

        let bbox = manta.bounding_box(60.0);
        assert!(bbox.longitude_range.is_some());
        assert!(bbox.contains(&manta));
        assert!(bbox.contains(&chone));
        assert!(!bbox.contains(&el_carmen));
    }

    #[test]
    fn test_bounding_box_near_pole_drops_longitude() {
        let bbox = Coordinate::new(89.9, 10.0).bounding_box(50.0);
        assert_eq!(bbox.longitude_range, None);
        assert!((bbox.max_latitude - 90.0).abs() < 1e-9);
        assert!(bbox.contains(&Coordinate::new(89.9, -170.0)));
    }

    #[test]
    fn test_bounding_box_across_antimeridian_drops_longitude() {
        let bbox = Coordinate::new(-17.7, 179.9).bounding_box(30.0);
        assert_eq!(bbox.longitude_range, None);
    }
}
