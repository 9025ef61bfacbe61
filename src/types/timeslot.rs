use super::TimeslotId;
use serde::{Deserialize, Serialize};

/// A bookable slot in the weekly grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeslot {
    pub id: TimeslotId,
    /// Day of week (0-5 for Saturday-Thursday)
    pub day_of_week: u8,
    /// Start time as "HH:MM", zero-padded
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl Timeslot {
    /// Human-readable day name
    pub fn day_name(&self) -> &'static str {
        day_name(self.day_of_week)
    }
}

/// Day names for the six-day teaching week
pub fn day_name(day: u8) -> &'static str {
    match day {
        0 => "Saturday",
        1 => "Sunday",
        2 => "Monday",
        3 => "Tuesday",
        4 => "Wednesday",
        5 => "Thursday",
        _ => "Unknown",
    }
}

impl std::fmt::Display for Timeslot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.day_name(), self.start_time)
    }
}
