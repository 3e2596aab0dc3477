use serde::{Deserialize, Serialize};

/// Urban average used when nothing else is configured
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelTime {
    pub hours: u32,
    /// Always 0..=59
    pub minutes: u32,
    pub formatted: String,
}

impl TravelTime {
    pub fn from_total_minutes(total_minutes: u32) -> Self {
        Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
            formatted: format_travel_time(total_minutes),
        }
    }
}

/// Estimated driving time for `distance_km` at a constant average speed.
pub fn travel_time(distance_km: f64, average_speed_kmh: f64) -> TravelTime {
    if distance_km <= 0.0 || average_speed_kmh <= 0.0 || !distance_km.is_finite() {
        return TravelTime::from_total_minutes(0);
    }

    let total_minutes = (distance_km / average_speed_kmh * 60.0).round();
    TravelTime::from_total_minutes(total_minutes.min(u32::MAX as f64) as u32)
}

/// "45 min", "2h" or "1h 30min"
pub fn format_travel_time(total_minutes: u32) -> String {
    if total_minutes < 60 {
        return format!("{} min", total_minutes);
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if minutes == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}min", hours, minutes)
    }
}
