use super::{CourseId, RoomType};
use serde::{Deserialize, Serialize};

/// Represents a course offering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    /// Kind of room the course must be taught in
    pub required_room_type: RoomType,
    /// Weekly teaching units; drives how many sub-lessons a lesson expands into
    #[serde(default = "default_units")]
    pub units: u8,
    #[serde(default)]
    pub min_population: Option<u32>,
    #[serde(default)]
    pub max_population: Option<u32>,
}

fn default_units() -> u8 {
    2 // Default to a weekly course
}
