use crate::error::{Result, TimetableError};
use crate::types::{
    Classroom, Course, GroupCourseLink, Lesson, ProjectMeta, SolverConfig, SolverInput,
    StudentGroup, Teacher, TeacherAvailability, TeacherCourseLink, Timeslot,
};
use std::fs;
use std::path::Path;

/// Load a complete input snapshot from a directory.
///
/// The entity files are required; the link files and project metadata are
/// optional and default to empty.
pub fn load_input_from_dir(dir: &Path) -> Result<SolverInput> {
    let lessons: Vec<Lesson> = load_json_file(&dir.join("lessons.json"))?;
    let classrooms: Vec<Classroom> = load_json_file(&dir.join("classrooms.json"))?;
    let timeslots: Vec<Timeslot> = load_json_file(&dir.join("timeslots.json"))?;
    let courses: Vec<Course> = load_json_file(&dir.join("courses.json"))?;
    let teachers: Vec<Teacher> = load_json_file(&dir.join("teachers.json"))?;
    let groups: Vec<StudentGroup> = load_json_file(&dir.join("groups.json"))?;

    let teacher_course_eligibility: Vec<TeacherCourseLink> =
        load_json_or_default(&dir.join("teacher_courses.json"))?;
    let teacher_availability: Vec<TeacherAvailability> =
        load_json_or_default(&dir.join("teacher_availability.json"))?;
    let group_course_curriculum: Vec<GroupCourseLink> =
        load_json_or_default(&dir.join("curriculum.json"))?;
    let project: Option<ProjectMeta> = load_optional(&dir.join("project.json"))?;

    Ok(SolverInput {
        lessons,
        classrooms,
        timeslots,
        courses,
        teachers,
        groups,
        teacher_course_eligibility,
        teacher_availability,
        group_course_curriculum,
        project,
    })
}

/// Load config from TOML file, or use defaults
pub fn load_config_or_default(path: &Path) -> SolverConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => SolverConfig::default(),
        }
    } else {
        SolverConfig::default()
    }
}

/// Generic JSON file loader
fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| TimetableError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TimetableError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}

/// Like `load_json_file`, but a missing file yields the default value
fn load_json_or_default<T: serde::de::DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if path.exists() {
        load_json_file(path)
    } else {
        Ok(T::default())
    }
}

/// Like `load_json_file`, but a missing file yields None
fn load_optional<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if path.exists() {
        load_json_file(path).map(Some)
    } else {
        Ok(None)
    }
}
