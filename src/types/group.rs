use super::{Degree, GroupId};
use serde::{Deserialize, Serialize};

/// Represents a student group (a cohort that attends lessons together)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGroup {
    pub id: GroupId,
    pub name: String,
    pub degree: Degree,
    pub population: u32,
    /// Comma-separated day indices the group may be scheduled on, e.g. "0,2,4".
    /// Absent or unparseable means unrestricted.
    #[serde(default)]
    pub allowed_days: Option<String>,
}

impl StudentGroup {
    /// Parse the allowed-days field. All components must parse, otherwise
    /// the restriction is dropped entirely.
    pub fn allowed_day_set(&self) -> Option<Vec<u8>> {
        let raw = self.allowed_days.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        raw.split(',').map(|d| d.trim().parse().ok()).collect()
    }
}
