use super::{
    Classroom, ClassroomId, Course, CourseId, GroupId, Lesson, SemesterType, StudentGroup,
    Teacher, TeacherId, Timeslot, TimeslotId,
};
use serde::{Deserialize, Serialize};

/// Declares a teacher eligible to teach a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherCourseLink {
    pub teacher_id: TeacherId,
    pub course_id: CourseId,
}

/// Declares a timeslot a teacher is available in.
/// A teacher with no availability records is unrestricted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherAvailability {
    pub teacher_id: TeacherId,
    pub timeslot_id: TimeslotId,
}

/// Declares a course part of a group's curriculum (used for validation only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCourseLink {
    pub group_id: GroupId,
    pub course_id: CourseId,
}

/// Optional metadata tagging a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub name: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub semester: Option<SemesterType>,
}

/// Immutable snapshot of everything one search run consumes
#[derive(Debug, Clone, Default)]
pub struct SolverInput {
    pub lessons: Vec<Lesson>,
    pub classrooms: Vec<Classroom>,
    pub timeslots: Vec<Timeslot>,
    pub courses: Vec<Course>,
    pub teachers: Vec<Teacher>,
    pub groups: Vec<StudentGroup>,
    pub teacher_course_eligibility: Vec<TeacherCourseLink>,
    pub teacher_availability: Vec<TeacherAvailability>,
    pub group_course_curriculum: Vec<GroupCourseLink>,
    pub project: Option<ProjectMeta>,
}

impl SolverInput {
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&StudentGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    pub fn classroom(&self, id: ClassroomId) -> Option<&Classroom> {
        self.classrooms.iter().find(|r| r.id == id)
    }

    pub fn timeslot(&self, id: TimeslotId) -> Option<&Timeslot> {
        self.timeslots.iter().find(|t| t.id == id)
    }

    pub fn lesson(&self, id: super::LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }
}
