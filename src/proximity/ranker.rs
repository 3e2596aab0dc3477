use rayon::prelude::*;
use serde::Serialize;

use super::classifier::{RadiusAssessment, RadiusStatus, RadiusThresholds};
use super::coordinate::Coordinate;
use super::distance::{distance, DistanceResult};

/// Something that can be matched by location: a mechanic, a service request.
#[derive(Debug, Clone)]
pub struct Candidate<K, P> {
    pub id: K,
    pub location: Option<Coordinate>,
    /// The candidate's own travel radius, if it has one
    pub travel_radius_km: Option<f64>,
    pub payload: P,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProximityEntry<K, P> {
    pub id: K,
    pub payload: P,
    pub distance: DistanceResult,
    pub assessment: RadiusAssessment,
    /// Radius the assessment was made against
    pub radius_km: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    /// Used for candidates that carry no radius of their own
    pub radius_km: f64,
    /// Keep only these statuses (applied after sorting)
    pub statuses: Option<Vec<RadiusStatus>>,
    pub within_radius_only: bool,
    pub limit: Option<usize>,
}

impl RankOptions {
    pub fn new(radius_km: f64) -> Self {
        Self {
            radius_km,
            ..Default::default()
        }
    }

    pub fn within_radius_only(mut self) -> Self {
        self.within_radius_only = true;
        self
    }

    pub fn with_statuses(mut self, statuses: Vec<RadiusStatus>) -> Self {
        self.statuses = Some(statuses);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn keeps(&self, assessment: &RadiusAssessment) -> bool {
        if self.within_radius_only && !assessment.within_radius {
            return false;
        }
        match &self.statuses {
            Some(statuses) => statuses.contains(&assessment.status),
            None => true,
        }
    }
}

/// Rank candidates by distance from `origin`, nearest first.
///
/// Candidates without a location are dropped entirely. Ties on distance are
/// broken by id so the output order is stable across runs.
pub fn rank<K, P>(
    thresholds: &RadiusThresholds,
    origin: &Coordinate,
    candidates: Vec<Candidate<K, P>>,
    options: &RankOptions,
) -> Vec<ProximityEntry<K, P>>
where
    K: Ord + Send,
    P: Send,
{
    let total = candidates.len();

    let mut entries: Vec<ProximityEntry<K, P>> = candidates
        .into_par_iter()
        .filter_map(|candidate| {
            let location = candidate.location?;
            let radius_km = candidate.travel_radius_km.unwrap_or(options.radius_km);
            let distance = distance(origin, &location);
            let assessment = thresholds.classify(distance.distance_km, radius_km);

            Some(ProximityEntry {
                id: candidate.id,
                payload: candidate.payload,
                distance,
                assessment,
                radius_km,
            })
        })
        .collect();
    let located = entries.len();

    entries.sort_by(|a, b| {
        a.distance
            .distance_km
            .total_cmp(&b.distance.distance_km)
            .then_with(|| a.id.cmp(&b.id))
    });
    entries.retain(|entry| options.keeps(&entry.assessment));
    if let Some(limit) = options.limit {
        entries.truncate(limit);
    }

    tracing::debug!(
        candidates = total,
        without_location = total - located,
        returned = entries.len(),
        radius_km = options.radius_km,
        "Ranked candidates by proximity"
    );

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Coordinate = Coordinate::new(-2.12992, -79.90804);

    fn candidate(id: i32, location: Option<Coordinate>) -> Candidate<i32, &'static str> {
        Candidate {
            id,
            location,
            travel_radius_km: None,
            payload: "service",
        }
    }

    fn ids<P>(entries: &[ProximityEntry<i32, P>]) -> Vec<i32> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_nearest_first_and_missing_excluded() {
        let candidates = vec![
            // ~7.15 km
            candidate(1, Some(Coordinate::new(-2.1894, -79.8837))),
            // ~2 km due north
            candidate(2, Some(Coordinate::new(-2.11193, -79.90804))),
            candidate(3, None),
        ];

        let ranked = rank(
            &RadiusThresholds::default(),
            &ORIGIN,
            candidates,
            &RankOptions::new(10.0),
        );

        assert_eq!(ids(&ranked), vec![2, 1]);
        assert_eq!(ranked[0].distance.distance_km, 2.0);
        assert_eq!(ranked[1].distance.distance_km, 7.15);
        assert!(ranked.iter().all(|e| e.assessment.within_radius));
    }

    #[test]
    fn test_missing_location_excluded_regardless_of_radius() {
        let partial = Coordinate::from_parts(Some(-2.1894), None);
        let ranked = rank(
            &RadiusThresholds::default(),
            &ORIGIN,
            vec![candidate(7, partial)],
            &RankOptions::new(10_000.0),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_ties_broken_by_id() {
        let spot = Some(Coordinate::new(-2.15, -79.9));
        let candidates = vec![candidate(9, spot), candidate(4, spot), candidate(6, spot)];
        let ranked = rank(
            &RadiusThresholds::default(),
            &ORIGIN,
            candidates,
            &RankOptions::new(10.0),
        );
        assert_eq!(ids(&ranked), vec![4, 6, 9]);
    }

    #[test]
    fn test_status_filter_keeps_order() {
        let candidates: Vec<_> = (0..20)
            .map(|i| candidate(i, Some(Coordinate::new(-2.12992 - i as f64 * 0.01, -79.90804))))
            .rev()
            .collect();

        let ranked = rank(
            &RadiusThresholds::default(),
            &ORIGIN,
            candidates,
            &RankOptions::new(10.0).with_statuses(vec![RadiusStatus::Optimal]),
        );

        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|e| e.assessment.status == RadiusStatus::Optimal));
        assert!(ranked
            .windows(2)
            .all(|w| w[0].distance.distance_km <= w[1].distance.distance_km));
    }

    #[test]
    fn test_within_radius_only_and_limit() {
        let candidates: Vec<_> = (1..=10)
            .map(|i| candidate(i, Some(Coordinate::new(-2.12992 - i as f64 * 0.02, -79.90804))))
            .collect();

        // 0.02 degrees of latitude is ~2.2 km, so ids 1..=4 sit inside 10 km
        let within = rank(
            &RadiusThresholds::default(),
            &ORIGIN,
            candidates.clone(),
            &RankOptions::new(10.0).within_radius_only(),
        );
        assert_eq!(ids(&within), vec![1, 2, 3, 4]);

        let top_two = rank(
            &RadiusThresholds::default(),
            &ORIGIN,
            candidates,
            &RankOptions::new(10.0).within_radius_only().with_limit(2),
        );
        assert_eq!(ids(&top_two), vec![1, 2]);
    }

    #[test]
    fn test_candidate_radius_overrides_default() {
        let mut far = candidate(1, Some(Coordinate::new(-2.1894, -79.8837)));
        far.travel_radius_km = Some(5.0);
        let mut same = far.clone();
        same.id = 2;
        same.travel_radius_km = None;

        let ranked = rank(
            &RadiusThresholds::default(),
            &ORIGIN,
            vec![far, same],
            &RankOptions::new(10.0),
        );

        assert_eq!(ranked[0].radius_km, 5.0);
        assert_eq!(ranked[0].assessment.status, RadiusStatus::Exceeded);
        assert_eq!(ranked[1].radius_km, 10.0);
        assert!(ranked[1].assessment.within_radius);
    }
}
