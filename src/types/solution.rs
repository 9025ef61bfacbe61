use super::{ClassroomId, LessonId, TeacherId, TimeslotId, WeekParity};
use serde::{Deserialize, Serialize};

/// One placed sub-lesson in the solved timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub lesson_id: LessonId,
    pub timeslot_id: TimeslotId,
    pub room_id: ClassroomId,
    pub week_parity: WeekParity,
    pub teacher_id: TeacherId,
}

/// Metadata about a finished search run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveMetadata {
    pub generated_at: String,
    pub algorithm_version: String,
    /// Generations actually evaluated before termination
    pub generations: u32,
    pub solve_time_ms: u64,
}

impl Default for SolveMetadata {
    fn default() -> Self {
        Self {
            generated_at: String::new(),
            algorithm_version: String::new(),
            generations: 0,
            solve_time_ms: 0,
        }
    }
}

/// Outcome of a search run. `assignments` is present iff a feasible
/// timetable was found; `best_cost` is always the lowest cost observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub assignments: Option<Vec<Assignment>>,
    pub best_cost: f64,
    pub valid: bool,
    #[serde(default)]
    pub metadata: SolveMetadata,
}

impl Solution {
    /// Outcome for precondition failures and searches that never
    /// evaluated a genome.
    pub fn infeasible() -> Self {
        Self {
            assignments: None,
            best_cost: f64::INFINITY,
            valid: false,
            metadata: SolveMetadata::default(),
        }
    }
}
