//! Geo-proximity matching between mechanics and service locations.
//!
//! Everything in here is a pure function over plain values: no database, no
//! clock, no environment. The HTTP layer loads coordinates and radii, hands
//! them to a [`ProximityEngine`], and serializes what comes back.

pub mod classifier;
pub mod coordinate;
pub mod distance;
pub mod engine;
pub mod ranker;
pub mod travel_time;

pub use classifier::{RadiusAssessment, RadiusStatus, RadiusThresholds};
pub use coordinate::Coordinate;
pub use distance::DistanceResult;
pub use engine::{ProximityEngine, TravelInfo};
pub use ranker::{Candidate, ProximityEntry, RankOptions};
pub use travel_time::TravelTime;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProximityError {
    #[error("Invalid radius thresholds: {0}")]
    InvalidThresholds(String),
    #[error("Average speed must be positive, got {0} km/h")]
    InvalidSpeed(f64),
}
