use super::{ClassroomId, RoomType};
use serde::{Deserialize, Serialize};

/// Represents a physical classroom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    pub name: String,
    #[serde(default)]
    pub faculty: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
}

impl Classroom {
    /// Check if the room can hold a group of the given population
    pub fn fits(&self, population: u32) -> bool {
        self.capacity >= population
    }
}
