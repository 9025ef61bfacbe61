mod classroom;
mod config;
mod course;
mod group;
mod input;
mod lesson;
mod solution;
mod teacher;
mod timeslot;

pub use classroom::*;
pub use config::*;
pub use course::*;
pub use group::*;
pub use input::*;
pub use lesson::*;
pub use solution::*;
pub use teacher::*;
pub use timeslot::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for lesson identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LessonId(pub u32);

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for classroom identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassroomId(pub u32);

impl fmt::Display for ClassroomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for timeslot identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeslotId(pub u32);

impl fmt::Display for TimeslotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for course identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(pub u32);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for teacher identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeacherId(pub u32);

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for student-group identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of classroom a course can be taught in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Normal,
    ComputerSite,
    Gallery,
    Workshop,
}

impl RoomType {
    pub fn label(self) -> &'static str {
        match self {
            RoomType::Normal => "normal",
            RoomType::ComputerSite => "computer_site",
            RoomType::Gallery => "gallery",
            RoomType::Workshop => "workshop",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which weeks of the term a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekParity {
    Odd,
    Even,
    Both,
}

impl WeekParity {
    /// Compact integer tag used in the genome's parity column.
    pub fn code(self) -> u32 {
        match self {
            WeekParity::Odd => 0,
            WeekParity::Even => 1,
            WeekParity::Both => 2,
        }
    }

    pub fn from_code(code: u32) -> Self {
        match code {
            0 => WeekParity::Odd,
            1 => WeekParity::Even,
            _ => WeekParity::Both,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekParity::Odd => "odd",
            WeekParity::Even => "even",
            WeekParity::Both => "both",
        }
    }
}

impl fmt::Display for WeekParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Degree level of a student group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    Bachelor,
    Master,
    Phd,
    College,
}

/// Semester within an academic year (inputs only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SemesterType {
    First,
    Second,
}

impl From<SemesterType> for u8 {
    fn from(semester: SemesterType) -> u8 {
        match semester {
            SemesterType::First => 1,
            SemesterType::Second => 2,
        }
    }
}

impl TryFrom<u8> for SemesterType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SemesterType::First),
            2 => Ok(SemesterType::Second),
            other => Err(format!("semester must be 1 or 2, got {other}")),
        }
    }
}
