mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::error::Result;
use crate::types::{Assignment, Solution, SolverInput, WeekParity};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Satisfaction metric derived from the best cost, capped at 100.
/// Zero cost maps to 100; an infeasible run maps to 0.
pub fn satisfaction_percentage(best_cost: f64) -> f64 {
    (100.0 * (-best_cost / 50.0).exp()).min(100.0)
}

/// An assignment with its entity names looked up, ready for display
#[derive(Debug, Clone)]
pub struct ResolvedAssignment<'a> {
    pub group: &'a str,
    pub course: &'a str,
    pub teacher: &'a str,
    pub room: &'a str,
    pub day: u8,
    pub day_name: &'static str,
    pub start_time: &'a str,
    pub parity: WeekParity,
}

/// Resolve assignments against the input snapshot, sorted for display
/// by (group, day, start time).
pub fn resolve_assignments<'a>(
    input: &'a SolverInput,
    assignments: &'a [Assignment],
) -> Vec<ResolvedAssignment<'a>> {
    let mut resolved: Vec<ResolvedAssignment<'a>> = assignments
        .iter()
        .filter_map(|a| {
            let lesson = input.lesson(a.lesson_id)?;
            let timeslot = input.timeslot(a.timeslot_id)?;
            Some(ResolvedAssignment {
                group: input
                    .group(lesson.group_id)
                    .map(|g| g.name.as_str())
                    .unwrap_or("?"),
                course: input
                    .course(lesson.course_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?"),
                teacher: input
                    .teacher(a.teacher_id)
                    .map(|t| t.name.as_str())
                    .unwrap_or("?"),
                room: input
                    .classroom(a.room_id)
                    .map(|r| r.name.as_str())
                    .unwrap_or("?"),
                day: timeslot.day_of_week,
                day_name: timeslot.day_name(),
                start_time: timeslot.start_time.as_str(),
                parity: a.week_parity,
            })
        })
        .collect();

    resolved.sort_by(|a, b| {
        (a.group, a.day, a.start_time, a.parity.code())
            .cmp(&(b.group, b.day, b.start_time, b.parity.code()))
    });
    resolved
}

/// Generate all requested reports and write them to the output directory
pub fn generate_reports(
    input: &SolverInput,
    solution: &Solution,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(input, solution)?;
                fs::write(output_dir.join("timetable.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(input, solution);
                fs::write(output_dir.join("timetable.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(input, solution);
                fs::write(output_dir.join("timetable.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// Print a colored run summary to the terminal
pub fn print_summary(solution: &Solution) {
    println!();
    if solution.valid {
        println!("{}", "✓ Feasible timetable found".green().bold());
    } else {
        println!("{}", "✗ No feasible timetable".red().bold());
    }

    if solution.best_cost.is_finite() {
        println!("Best cost: {:.1}", solution.best_cost);
        println!(
            "Satisfaction: {:.1}%",
            satisfaction_percentage(solution.best_cost)
        );
    } else {
        println!("Best cost: -");
    }
    println!(
        "Generations: {} ({} ms)",
        solution.metadata.generations, solution.metadata.solve_time_ms
    );
    if let Some(assignments) = &solution.assignments {
        println!("Sessions placed: {}", assignments.len());
    }
}
