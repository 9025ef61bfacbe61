use thiserror::Error;

/// Domain-specific errors for the timetable solver
#[derive(Error, Debug)]
pub enum TimetableError {
    // Input/Parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    // Data validation errors
    #[error("Lesson {lesson_id} references unknown course {course_id}")]
    UnknownCourse { lesson_id: u32, course_id: u32 },

    #[error("Lesson {lesson_id} references unknown group {group_id}")]
    UnknownGroup { lesson_id: u32, group_id: u32 },

    #[error("Duplicate ID found: {id_type} {id}")]
    DuplicateId { id_type: String, id: u32 },

    // Re-scoring errors
    #[error("Saved timetable does not match the input snapshot: {0}")]
    TimetableMismatch(String),
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
