use crate::error::Result;
use crate::types::{CourseId, GroupId, SolverInput, TeacherId, TimeslotId};
use std::collections::HashSet;

/// Validation result with collected errors
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate an input snapshot before searching.
///
/// Errors are conditions the engine would turn into guaranteed failures
/// or broken references; warnings are conditions the engine routes
/// around (fallback teacher pools, doomed genes that accrue penalties).
pub fn validate_input(input: &SolverInput) -> Result<ValidationResult> {
    let mut result = ValidationResult::default();

    check_duplicate_ids("lesson", input.lessons.iter().map(|l| l.id.0), &mut result);
    check_duplicate_ids(
        "classroom",
        input.classrooms.iter().map(|r| r.id.0),
        &mut result,
    );
    check_duplicate_ids(
        "timeslot",
        input.timeslots.iter().map(|t| t.id.0),
        &mut result,
    );
    check_duplicate_ids("course", input.courses.iter().map(|c| c.id.0), &mut result);
    check_duplicate_ids(
        "teacher",
        input.teachers.iter().map(|t| t.id.0),
        &mut result,
    );
    check_duplicate_ids("group", input.groups.iter().map(|g| g.id.0), &mut result);

    let course_ids: HashSet<CourseId> = input.courses.iter().map(|c| c.id).collect();
    let group_ids: HashSet<GroupId> = input.groups.iter().map(|g| g.id).collect();
    let teacher_ids: HashSet<TeacherId> = input.teachers.iter().map(|t| t.id).collect();
    let timeslot_ids: HashSet<TimeslotId> = input.timeslots.iter().map(|t| t.id).collect();

    // Lesson references
    for lesson in &input.lessons {
        if !course_ids.contains(&lesson.course_id) {
            result.add_error(format!(
                "Lesson {} references unknown course {}",
                lesson.id, lesson.course_id
            ));
        }
        if !group_ids.contains(&lesson.group_id) {
            result.add_error(format!(
                "Lesson {} references unknown group {}",
                lesson.id, lesson.group_id
            ));
        }
        if let Some(teacher_id) = lesson.teacher_id {
            if !teacher_ids.contains(&teacher_id) {
                result.add_warning(format!(
                    "Lesson {} is pre-bound to unknown teacher {}; course eligibility will be used",
                    lesson.id, teacher_id
                ));
            }
        }
    }

    // Link references
    for link in &input.teacher_course_eligibility {
        if !teacher_ids.contains(&link.teacher_id) {
            result.add_warning(format!(
                "Eligibility record lists unknown teacher {}",
                link.teacher_id
            ));
        }
        if !course_ids.contains(&link.course_id) {
            result.add_warning(format!(
                "Eligibility record lists unknown course {}",
                link.course_id
            ));
        }
    }
    for link in &input.teacher_availability {
        if !teacher_ids.contains(&link.teacher_id) {
            result.add_warning(format!(
                "Availability record lists unknown teacher {}",
                link.teacher_id
            ));
        }
        if !timeslot_ids.contains(&link.timeslot_id) {
            result.add_warning(format!(
                "Availability record lists unknown timeslot {}",
                link.timeslot_id
            ));
        }
    }

    // Each scheduled course should have an eligible teacher, otherwise the
    // engine falls back to the full teacher pool
    let eligible_courses: HashSet<CourseId> = input
        .teacher_course_eligibility
        .iter()
        .map(|link| link.course_id)
        .collect();
    for lesson in &input.lessons {
        if lesson.teacher_id.is_none() && !eligible_courses.contains(&lesson.course_id) {
            let name = input
                .course(lesson.course_id)
                .map(|c| c.name.as_str())
                .unwrap_or("?");
            result.add_warning(format!(
                "Course '{name}' has no eligible teachers; any teacher may be assigned"
            ));
        }
    }

    // Lessons outside the declared curriculum
    if !input.group_course_curriculum.is_empty() {
        let curriculum: HashSet<(GroupId, CourseId)> = input
            .group_course_curriculum
            .iter()
            .map(|link| (link.group_id, link.course_id))
            .collect();
        for lesson in &input.lessons {
            if !curriculum.contains(&(lesson.group_id, lesson.course_id)) {
                result.add_warning(format!(
                    "Lesson {} pairs group {} with course {} outside the curriculum",
                    lesson.id, lesson.group_id, lesson.course_id
                ));
            }
        }
    }

    // A lesson with no room of the right type and size can never be feasible
    for lesson in &input.lessons {
        let (Some(course), Some(group)) = (
            input.course(lesson.course_id),
            input.group(lesson.group_id),
        ) else {
            continue;
        };
        let has_room = input
            .classrooms
            .iter()
            .any(|r| r.room_type == course.required_room_type && r.fits(group.population));
        if !has_room {
            result.add_warning(format!(
                "Lesson {}: no {} room holds {} students; it will always violate",
                lesson.id, course.required_room_type, group.population
            ));
        }
    }

    // Day indices outside the six-day week
    for timeslot in &input.timeslots {
        if timeslot.day_of_week > 5 {
            result.add_warning(format!(
                "Timeslot {} has day_of_week {} (expected 0-5)",
                timeslot.id, timeslot.day_of_week
            ));
        }
    }
    for group in &input.groups {
        if group.allowed_days.is_some() && group.allowed_day_set().is_none() {
            result.add_warning(format!(
                "Group '{}' has unparseable allowed_days '{}'; treating as unrestricted",
                group.name,
                group.allowed_days.as_deref().unwrap_or("")
            ));
        }
    }

    // Courses that expand to nothing
    let scheduled: HashSet<CourseId> = input.lessons.iter().map(|l| l.course_id).collect();
    for course in &input.courses {
        if course.units == 0 && scheduled.contains(&course.id) {
            result.add_warning(format!(
                "Course '{}' has 0 units; its lessons expand to no sessions",
                course.name
            ));
        }
    }

    if !result.is_valid() {
        return Err(anyhow::anyhow!(
            "Validation failed with {} errors:\n{}",
            result.errors.len(),
            result.errors.join("\n")
        ));
    }

    Ok(result)
}

fn check_duplicate_ids(
    id_type: &str,
    ids: impl Iterator<Item = u32>,
    result: &mut ValidationResult,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            result.add_error(format!("Duplicate {id_type} ID: {id}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn minimal_input() -> SolverInput {
        SolverInput {
            lessons: vec![Lesson {
                id: LessonId(1),
                course_id: CourseId(1),
                group_id: GroupId(1),
                teacher_id: None,
                duration_slots: 1,
            }],
            classrooms: vec![Classroom {
                id: ClassroomId(1),
                name: "101".into(),
                faculty: String::new(),
                capacity: 40,
                room_type: RoomType::Normal,
            }],
            timeslots: vec![Timeslot {
                id: TimeslotId(1),
                day_of_week: 0,
                start_time: "08:00".into(),
                end_time: String::new(),
            }],
            courses: vec![Course {
                id: CourseId(1),
                name: "Intro".into(),
                required_room_type: RoomType::Normal,
                units: 2,
                min_population: None,
                max_population: None,
            }],
            teachers: vec![Teacher {
                id: TeacherId(1),
                name: "T1".into(),
            }],
            groups: vec![StudentGroup {
                id: GroupId(1),
                name: "G1".into(),
                degree: Degree::Bachelor,
                population: 30,
                allowed_days: None,
            }],
            teacher_course_eligibility: vec![TeacherCourseLink {
                teacher_id: TeacherId(1),
                course_id: CourseId(1),
            }],
            teacher_availability: vec![],
            group_course_curriculum: vec![],
            project: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        let result = validate_input(&minimal_input()).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unknown_course_reference_is_an_error() {
        let mut input = minimal_input();
        input.lessons[0].course_id = CourseId(99);
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn duplicate_ids_are_errors() {
        let mut input = minimal_input();
        let duplicate = input.teachers[0].clone();
        input.teachers.push(duplicate);
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn teacherless_course_is_a_warning() {
        let mut input = minimal_input();
        input.teacher_course_eligibility.clear();
        let result = validate_input(&input).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn impossible_room_requirement_is_a_warning() {
        let mut input = minimal_input();
        input.groups[0].population = 100;
        let result = validate_input(&input).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("will always violate")));
    }

    #[test]
    fn off_curriculum_lesson_is_a_warning() {
        let mut input = minimal_input();
        input.group_course_curriculum = vec![GroupCourseLink {
            group_id: GroupId(1),
            course_id: CourseId(2),
        }];
        let result = validate_input(&input).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("outside the curriculum")));
    }
}
