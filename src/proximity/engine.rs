use serde::Serialize;

use super::classifier::{RadiusAssessment, RadiusThresholds};
use super::coordinate::Coordinate;
use super::distance::{self, DistanceResult};
use super::ranker::{self, Candidate, ProximityEntry, RankOptions};
use super::travel_time::{self, TravelTime};
use super::ProximityError;
use crate::config::ProximityConfig;

/// Everything a caller wants to show about one mechanic/location pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelInfo {
    pub distance_km: f64,
    pub distance_formatted: String,
    pub travel_time: TravelTime,
    pub radius_km: f64,
    pub radius_check: RadiusAssessment,
}

/// Configured entry point to the proximity calculations.
///
/// Holds the threshold table and average speed so that every caller
/// classifies with the same numbers.
#[derive(Debug, Clone)]
pub struct ProximityEngine {
    thresholds: RadiusThresholds,
    average_speed_kmh: f64,
}

impl ProximityEngine {
    pub fn new(config: &ProximityConfig) -> Result<Self, ProximityError> {
        let thresholds =
            RadiusThresholds::new(config.optimal_max_percent, config.good_max_percent)?;
        if !(config.average_speed_kmh > 0.0 && config.average_speed_kmh.is_finite()) {
            return Err(ProximityError::InvalidSpeed(config.average_speed_kmh));
        }

        Ok(Self {
            thresholds,
            average_speed_kmh: config.average_speed_kmh,
        })
    }

    pub fn thresholds(&self) -> &RadiusThresholds {
        &self.thresholds
    }

    pub fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    pub fn distance(&self, origin: &Coordinate, target: &Coordinate) -> DistanceResult {
        distance::distance(origin, target)
    }

    pub fn classify(&self, distance_km: f64, radius_km: f64) -> RadiusAssessment {
        self.thresholds.classify(distance_km, radius_km)
    }

    pub fn travel_time(&self, distance_km: f64) -> TravelTime {
        travel_time::travel_time(distance_km, self.average_speed_kmh)
    }

    pub fn travel_info(&self, origin: &Coordinate, target: &Coordinate, radius_km: f64) -> TravelInfo {
        let distance = self.distance(origin, target);

        TravelInfo {
            distance_km: distance.distance_km,
            travel_time: self.travel_time(distance.distance_km),
            radius_km,
            radius_check: self.classify(distance.distance_km, radius_km),
            distance_formatted: distance.formatted,
        }
    }

    /// Travel info for an already-ranked entry
    pub fn entry_travel_info<K, P>(&self, entry: &ProximityEntry<K, P>) -> TravelInfo {
        TravelInfo {
            distance_km: entry.distance.distance_km,
            distance_formatted: entry.distance.formatted.clone(),
            travel_time: self.travel_time(entry.distance.distance_km),
            radius_km: entry.radius_km,
            radius_check: entry.assessment.clone(),
        }
    }

    pub fn rank<K, P>(
        &self,
        origin: &Coordinate,
        candidates: Vec<Candidate<K, P>>,
        options: &RankOptions,
    ) -> Vec<ProximityEntry<K, P>>
    where
        K: Ord + Send,
        P: Send,
    {
        ranker::rank(&self.thresholds, origin, candidates, options)
    }
}

impl Default for ProximityEngine {
    fn default() -> Self {
        Self {
            thresholds: RadiusThresholds::default(),
            average_speed_kmh: travel_time::DEFAULT_AVERAGE_SPEED_KMH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proximity::RadiusStatus;

    #[test]
    fn test_travel_info_for_guayaquil_service() {
        let engine = ProximityEngine::default();
        let info = engine.travel_info(
            &Coordinate::new(-2.12992, -79.90804),
            &Coordinate::new(-2.1894, -79.8837),
            10.0,
        );

        assert_eq!(info.distance_km, 7.15);
        assert_eq!(info.distance_formatted, "7.2 km");
        // 7.15 km at 30 km/h is 14.3 minutes
        assert_eq!(info.travel_time.formatted, "14 min");
        assert_eq!(info.radius_check.status, RadiusStatus::Good);
        assert!(info.radius_check.within_radius);
    }

    #[test]
    fn test_config_thresholds_are_applied() {
        let config = ProximityConfig {
            good_max_percent: 80.0,
            ..ProximityConfig::default()
        };
        let engine = ProximityEngine::new(&config).unwrap();
        assert_eq!(engine.classify(7.8, 10.0).status, RadiusStatus::Good);
        assert_eq!(ProximityEngine::default().classify(7.8, 10.0).status, RadiusStatus::Limit);
    }

    #[test]
    fn test_rejects_bad_config() {
        let bad_speed = ProximityConfig {
            average_speed_kmh: 0.0,
            ..ProximityConfig::default()
        };
        assert_eq!(
            ProximityEngine::new(&bad_speed).unwrap_err(),
            ProximityError::InvalidSpeed(0.0)
        );

        let bad_thresholds = ProximityConfig {
            optimal_max_percent: 90.0,
            good_max_percent: 80.0,
            ..ProximityConfig::default()
        };
        assert!(matches!(
            ProximityEngine::new(&bad_thresholds),
            Err(ProximityError::InvalidThresholds(_))
        ));
    }
}
