use serde::{Deserialize, Serialize};

use super::ProximityError;

/// How well a distance fits inside a travel radius, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusStatus {
    Optimal,
    Good,
    Limit,
    Exceeded,
}

impl RadiusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RadiusStatus::Optimal => "optimal",
            RadiusStatus::Good => "good",
            RadiusStatus::Limit => "limit",
            RadiusStatus::Exceeded => "exceeded",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RadiusStatus::Optimal => "Optimal distance - very close",
            RadiusStatus::Good => "Good distance - close by",
            RadiusStatus::Limit => "At the edge of the travel radius",
            RadiusStatus::Exceeded => "Outside the travel radius",
        }
    }
}

impl std::str::FromStr for RadiusStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimal" => Ok(RadiusStatus::Optimal),
            "good" => Ok(RadiusStatus::Good),
            "limit" => Ok(RadiusStatus::Limit),
            "exceeded" => Ok(RadiusStatus::Exceeded),
            other => Err(format!("Unknown proximity status '{}'", other)),
        }
    }
}

impl std::fmt::Display for RadiusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusAssessment {
    pub within_radius: bool,
    pub status: RadiusStatus,
    /// distance / radius * 100, or 0 for a non-positive radius
    pub percentage: f64,
    pub message: String,
}

/// Upper bounds (inclusive, percent of radius) for the `optimal` and `good`
/// buckets. Anything else inside the radius is `limit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusThresholds {
    optimal_max_percent: f64,
    good_max_percent: f64,
}

impl RadiusThresholds {
    pub const DEFAULT_OPTIMAL_MAX_PERCENT: f64 = 50.0;
    pub const DEFAULT_GOOD_MAX_PERCENT: f64 = 75.0;

    pub fn new(optimal_max_percent: f64, good_max_percent: f64) -> Result<Self, ProximityError> {
        let ordered = optimal_max_percent > 0.0
            && optimal_max_percent <= good_max_percent
            && good_max_percent <= 100.0;
        if !ordered {
            return Err(ProximityError::InvalidThresholds(format!(
                "expected 0 < optimal ({}) <= good ({}) <= 100",
                optimal_max_percent, good_max_percent
            )));
        }

        Ok(Self {
            optimal_max_percent,
            good_max_percent,
        })
    }

    pub fn optimal_max_percent(&self) -> f64 {
        self.optimal_max_percent
    }

    pub fn good_max_percent(&self) -> f64 {
        self.good_max_percent
    }

    /// Classify `distance_km` against `radius_km`.
    ///
    /// A radius of zero admits only a distance of exactly zero, which is
    /// reported as `optimal` with a percentage of 0. A negative radius admits
    /// nothing.
    pub fn classify(&self, distance_km: f64, radius_km: f64) -> RadiusAssessment {
        let percentage = if radius_km > 0.0 {
            distance_km / radius_km * 100.0
        } else {
            0.0
        };
        let within_radius = distance_km <= radius_km;

        let status = if !within_radius {
            RadiusStatus::Exceeded
        } else if percentage <= self.optimal_max_percent {
            RadiusStatus::Optimal
        } else if percentage <= self.good_max_percent {
            RadiusStatus::Good
        } else {
            RadiusStatus::Limit
        };

        RadiusAssessment {
            within_radius,
            status,
            percentage,
            message: status.message().to_string(),
        }
    }
}

impl Default for RadiusThresholds {
    fn default() -> Self {
        Self {
            optimal_max_percent: Self::DEFAULT_OPTIMAL_MAX_PERCENT,
            good_max_percent: Self::DEFAULT_GOOD_MAX_PERCENT,
        }
    }
}
