use super::{resolve_assignments, satisfaction_percentage};
use crate::types::{Solution, SolverInput, WeekParity};

/// Plain-text report: a weekly listing per student group, then per teacher
pub fn generate_text_report(input: &SolverInput, solution: &Solution) -> String {
    let mut lines = Vec::new();

    let title = input
        .project
        .as_ref()
        .map(|p| p.name.as_str())
        .unwrap_or("Timetable");
    lines.push(title.to_string());
    lines.push("=".repeat(title.len()));
    lines.push(String::new());

    let Some(assignments) = &solution.assignments else {
        lines.push("No feasible timetable was found.".to_string());
        if solution.best_cost.is_finite() {
            lines.push(format!("Best cost observed: {:.1}", solution.best_cost));
        }
        return lines.join("\n");
    };

    lines.push(format!(
        "Cost {:.1}, satisfaction {:.1}%, {} sessions",
        solution.best_cost,
        satisfaction_percentage(solution.best_cost),
        assignments.len()
    ));
    lines.push(String::new());

    let resolved = resolve_assignments(input, assignments);

    let mut current_group = "";
    let mut current_day = u8::MAX;
    for entry in &resolved {
        if entry.group != current_group {
            current_group = entry.group;
            current_day = u8::MAX;
            lines.push(format!("## {}", entry.group));
        }
        if entry.day != current_day {
            current_day = entry.day;
            lines.push(format!("  {}", entry.day_name));
        }
        lines.push(format!(
            "    {} {} {} - {} - {}",
            entry.start_time,
            parity_tag(entry.parity),
            entry.course,
            entry.teacher,
            entry.room
        ));
    }

    // Per-teacher view
    let mut by_teacher: Vec<&super::ResolvedAssignment> = resolved.iter().collect();
    by_teacher.sort_by(|a, b| {
        (a.teacher, a.day, a.start_time).cmp(&(b.teacher, b.day, b.start_time))
    });

    lines.push(String::new());
    lines.push("Teachers".to_string());
    lines.push("--------".to_string());
    let mut current_teacher = "";
    for entry in by_teacher {
        if entry.teacher != current_teacher {
            current_teacher = entry.teacher;
            lines.push(format!("## {}", entry.teacher));
        }
        lines.push(format!(
            "    {} {} {} {} - {} - {}",
            entry.day_name,
            entry.start_time,
            parity_tag(entry.parity),
            entry.course,
            entry.group,
            entry.room
        ));
    }

    lines.join("\n")
}

fn parity_tag(parity: WeekParity) -> &'static str {
    match parity {
        WeekParity::Odd => "[odd] ",
        WeekParity::Even => "[even]",
        WeekParity::Both => "      ",
    }
}
