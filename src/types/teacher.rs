use super::TeacherId;
use serde::{Deserialize, Serialize};

/// Represents a teacher. Course eligibility and availability live in
/// the link records of the input snapshot, not on the teacher itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
}
