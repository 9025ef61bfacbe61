use super::{resolve_assignments, satisfaction_percentage};
use crate::types::{Solution, SolverInput};

/// Markdown report: one table per student group
pub fn generate_markdown_report(input: &SolverInput, solution: &Solution) -> String {
    let mut lines = Vec::new();

    match &input.project {
        Some(project) => {
            let term = match (project.year, project.semester) {
                (Some(year), Some(semester)) => {
                    format!(" — {year}, semester {}", u8::from(semester))
                }
                (Some(year), None) => format!(" — {year}"),
                _ => String::new(),
            };
            lines.push(format!("# {}{term}", project.name));
        }
        None => lines.push("# Timetable".to_string()),
    }
    lines.push(String::new());

    let Some(assignments) = &solution.assignments else {
        lines.push("**No feasible timetable was found.**".to_string());
        return lines.join("\n");
    };

    lines.push(format!(
        "Cost **{:.1}**, satisfaction **{:.1}%**, generated in {} generations ({} ms).",
        solution.best_cost,
        satisfaction_percentage(solution.best_cost),
        solution.metadata.generations,
        solution.metadata.solve_time_ms
    ));
    lines.push(String::new());

    let resolved = resolve_assignments(input, assignments);

    let mut current_group = "";
    for (i, entry) in resolved.iter().enumerate() {
        if entry.group != current_group {
            current_group = entry.group;
            lines.push(format!("## {}", entry.group));
            lines.push(String::new());
            lines.push("| Day | Time | Weeks | Course | Teacher | Room |".to_string());
            lines.push("|-----|------|-------|--------|---------|------|".to_string());
        }
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            entry.day_name,
            entry.start_time,
            entry.parity,
            entry.course,
            entry.teacher,
            entry.room
        ));
        let table_ends = resolved
            .get(i + 1)
            .map(|next| next.group != entry.group)
            .unwrap_or(true);
        if table_ends {
            lines.push(String::new());
        }
    }

    lines.join("\n")
}
