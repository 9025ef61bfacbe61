use super::satisfaction_percentage;
use crate::error::Result;
use crate::types::{Assignment, ProjectMeta, Solution, SolveMetadata, SolverInput};
use serde::{Deserialize, Serialize};

/// The persisted timetable record. `validate` reads this file back and
/// re-scores the assignments against an input snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    #[serde(default)]
    pub project: Option<ProjectMeta>,
    pub valid: bool,
    /// None when the search never evaluated a genome (infinite cost)
    pub best_cost: Option<f64>,
    pub satisfaction_percentage: f64,
    #[serde(default)]
    pub metadata: SolveMetadata,
    pub assignments: Option<Vec<Assignment>>,
}

/// Generate the JSON report string
pub fn generate_json_report(input: &SolverInput, solution: &Solution) -> Result<String> {
    let report = JsonReport {
        project: input.project.clone(),
        valid: solution.valid,
        best_cost: solution.best_cost.is_finite().then_some(solution.best_cost),
        satisfaction_percentage: satisfaction_percentage(solution.best_cost),
        metadata: solution.metadata.clone(),
        assignments: solution.assignments.clone(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
