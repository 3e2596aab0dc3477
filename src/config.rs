use std::env;
use std::str::FromStr;

use crate::proximity::travel_time::DEFAULT_AVERAGE_SPEED_KMH;
use crate::proximity::RadiusThresholds;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    pub max_concurrent_requests: usize,
    pub proximity: ProximityConfig,
}

/// Tunables for distance classification and search defaults
#[derive(Clone, Debug, PartialEq)]
pub struct ProximityConfig {
    pub optimal_max_percent: f64,
    pub good_max_percent: f64,
    pub average_speed_kmh: f64,
    /// Radius used for a mechanic who has not set one
    pub default_service_radius_km: f64,
    /// Radius used when a client searches without one
    pub default_search_radius_km: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            optimal_max_percent: RadiusThresholds::DEFAULT_OPTIMAL_MAX_PERCENT,
            good_max_percent: RadiusThresholds::DEFAULT_GOOD_MAX_PERCENT,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            default_service_radius_km: 10.0,
            default_search_radius_km: 20.0,
        }
    }
}

impl ProximityConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            optimal_max_percent: env_or("PROXIMITY_OPTIMAL_MAX_PERCENT", defaults.optimal_max_percent),
            good_max_percent: env_or("PROXIMITY_GOOD_MAX_PERCENT", defaults.good_max_percent),
            average_speed_kmh: env_or("PROXIMITY_AVERAGE_SPEED_KMH", defaults.average_speed_kmh),
            default_service_radius_km: env_or(
                "PROXIMITY_DEFAULT_SERVICE_RADIUS_KM",
                defaults.default_service_radius_km,
            ),
            default_search_radius_km: env_or(
                "PROXIMITY_DEFAULT_SEARCH_RADIUS_KM",
                defaults.default_search_radius_km,
            ),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env_or("SERVER_PORT", 3000),
            rate_limit_per_second: env_or("RATE_LIMIT_PER_SECOND", 60),
            rate_limit_burst: env_or("RATE_LIMIT_BURST", 100),
            max_concurrent_requests: env_or("MAX_CONCURRENT_REQUESTS", 512),
            proximity: ProximityConfig::from_env(),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse an optional variable, falling back to `default` when unset.
/// Panics when the variable is set but unparseable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{} must be a number, got '{}'", key, raw)),
        Err(_) => default,
    }
}
