use super::{CourseId, GroupId, LessonId, TeacherId};
use serde::{Deserialize, Serialize};

/// A teaching obligation: a student group must attend a course,
/// optionally with a pre-bound teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    pub group_id: GroupId,
    /// When set, the search may only assign this teacher.
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    /// Consecutive slots the lesson spans. Accepted for compatibility;
    /// the engine currently places every lesson in a single slot.
    #[serde(default = "default_duration_slots")]
    pub duration_slots: u8,
}

fn default_duration_slots() -> u8 {
    1
}
