use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use university_scheduler::parser::{load_config_or_default, load_input_from_dir, validate_input};
use university_scheduler::reporter::{
    generate_reports, print_summary, satisfaction_percentage, JsonReport, OutputFormat,
};
use university_scheduler::solver::{solve_with_control, SearchControl, SolverEngine};
use university_scheduler::types::{SolverConfig, SolverInput};

#[derive(Parser)]
#[command(name = "university-scheduler")]
#[command(about = "Genetic-algorithm university timetable generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run demo with sample data
    Demo {
        /// Fixed random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Solve a timetable from input data
    Solve {
        /// Directory containing input JSON files (and optional config.toml)
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for timetable files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print JSON report only
        #[arg(short, long)]
        quiet: bool,

        /// Fixed random seed, overriding config.toml
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Re-score a saved timetable against an input snapshot
    Validate {
        /// Path to timetable.json file
        #[arg(short, long)]
        timetable: PathBuf,

        /// Directory containing input data for validation
        #[arg(short, long)]
        data: PathBuf,

        /// Show every violation rather than a summary
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seed } => run_demo(seed),
        Commands::Solve {
            data,
            output,
            format,
            quiet,
            seed,
        } => run_solve(&data, &output, &format, quiet, seed),
        Commands::Validate {
            timetable,
            data,
            verbose,
        } => run_validate(&timetable, &data, verbose),
    }
}

fn run_demo(seed: Option<u64>) -> Result<()> {
    println!("{}", "University Scheduler Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_path = PathBuf::from("data/demo");
    if !demo_path.join("lessons.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    run_solve(&demo_path, &PathBuf::from("output"), "all", false, seed)
}

fn run_solve(
    data: &Path,
    output: &Path,
    format: &str,
    quiet: bool,
    seed: Option<u64>,
) -> Result<()> {
    let input = load_input_from_dir(data).context("Failed to load input data")?;
    let mut config = load_config_or_default(&data.join("config.toml"));
    if seed.is_some() {
        config.search.seed = seed;
    }

    let validation = validate_input(&input)?;
    if !quiet {
        for warning in &validation.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
        println!(
            "Loaded {} lessons, {} classrooms, {} timeslots, {} courses, {} teachers, {} groups",
            input.lessons.len(),
            input.classrooms.len(),
            input.timeslots.len(),
            input.courses.len(),
            input.teachers.len(),
            input.groups.len()
        );
    }

    let solution = search(&input, &config, quiet)?;

    let formats = parse_formats(format);
    generate_reports(&input, &solution, output, &formats)?;

    if quiet {
        let report =
            university_scheduler::reporter::generate_json_report(&input, &solution)?;
        println!("{report}");
    } else {
        print_summary(&solution);
        println!(
            "Reports written to: {}",
            output.display().to_string().green()
        );
    }

    Ok(())
}

/// Run the search with an indicatif bar fed by the generation observer
fn search(
    input: &SolverInput,
    config: &SolverConfig,
    quiet: bool,
) -> Result<university_scheduler::types::Solution> {
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(u64::from(config.search.max_generations));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] gen {pos} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    let mut control = SearchControl {
        cancel: None,
        on_generation: Some(Box::new(|generation, best_cost| {
            progress.set_position(u64::from(generation) + 1);
            progress.set_message(format!("best cost {best_cost:.1}"));
        })),
    };

    let solution = solve_with_control(input, &config.weights, &config.search, &mut control)?;
    drop(control);
    progress.finish_and_clear();
    Ok(solution)
}

fn run_validate(timetable_path: &Path, data: &Path, verbose: bool) -> Result<()> {
    let input = load_input_from_dir(data)?;
    let config = load_config_or_default(&data.join("config.toml"));

    let report_json = std::fs::read_to_string(timetable_path)?;
    let report: JsonReport = serde_json::from_str(&report_json)?;

    let Some(assignments) = &report.assignments else {
        println!("{}", "Timetable file carries no assignments".red().bold());
        return Ok(());
    };

    let engine = SolverEngine::new(&input, &config.weights)?;
    let genes = engine.genes_from_assignments(assignments)?;
    let (violation_score, breakdown) = engine.score(&genes);
    let soft_cost = breakdown.weighted(engine.soft_weights());
    let total = violation_score as f64 + soft_cost;

    if violation_score == 0 {
        println!("{}", "✓ Timetable is feasible".green().bold());
    } else {
        println!(
            "{}",
            format!("✗ Timetable has violations (score {violation_score})")
                .red()
                .bold()
        );
        let violations = engine.violations(&genes);
        let shown = if verbose { violations.len() } else { 10 };
        for v in violations.iter().take(shown) {
            println!("  - {}: {}", v.constraint.red(), v.message);
        }
        if violations.len() > shown {
            println!("  ... and {} more (use --verbose)", violations.len() - shown);
        }
    }

    println!("\n{}", "Soft objectives:".bold());
    println!("  Teacher idle slots: {}", breakdown.teacher_idle_slots);
    println!("  Student idle slots: {}", breakdown.student_idle_slots);
    println!("  Group active days:  {}", breakdown.group_active_days);
    println!("\nTotal cost: {total:.1}");
    println!("Satisfaction: {:.1}%", satisfaction_percentage(total));

    Ok(())
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn create_demo_data(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let classrooms = serde_json::json!([
        {"id": 1, "name": "Room 101", "faculty": "Science", "capacity": 60, "type": "normal"},
        {"id": 2, "name": "Room 102", "faculty": "Science", "capacity": 40, "type": "normal"},
        {"id": 3, "name": "Lab A", "faculty": "Science", "capacity": 40, "type": "computer_site"},
        {"id": 4, "name": "Hall 1", "faculty": "Arts", "capacity": 100, "type": "normal"},
        {"id": 5, "name": "Workshop 1", "faculty": "Engineering", "capacity": 25, "type": "workshop"}
    ]);
    std::fs::write(
        path.join("classrooms.json"),
        serde_json::to_string_pretty(&classrooms)?,
    )?;

    // Five starts a day, six-day week (Saturday through Thursday)
    let mut timeslots = Vec::new();
    let mut id = 1;
    for day in 0..6u8 {
        for (start, end) in [
            ("08:00", "10:00"),
            ("10:00", "12:00"),
            ("12:00", "14:00"),
            ("14:00", "16:00"),
            ("16:00", "18:00"),
        ] {
            timeslots.push(serde_json::json!({
                "id": id, "day_of_week": day, "start_time": start, "end_time": end
            }));
            id += 1;
        }
    }
    std::fs::write(
        path.join("timeslots.json"),
        serde_json::to_string_pretty(&timeslots)?,
    )?;

    let courses = serde_json::json!([
        {"id": 1, "name": "Intro to CS", "required_room_type": "normal", "units": 3},
        {"id": 2, "name": "Programming 1", "required_room_type": "computer_site", "units": 2},
        {"id": 3, "name": "History of Art", "required_room_type": "normal", "units": 2},
        {"id": 4, "name": "Electronics Lab", "required_room_type": "workshop", "units": 1},
        {"id": 5, "name": "Discrete Math", "required_room_type": "normal", "units": 2}
    ]);
    std::fs::write(
        path.join("courses.json"),
        serde_json::to_string_pretty(&courses)?,
    )?;

    let teachers = serde_json::json!([
        {"id": 1, "name": "Dr. Smith"},
        {"id": 2, "name": "Prof. Johnson"},
        {"id": 3, "name": "Dr. Brown"},
        {"id": 4, "name": "Dr. Taylor"}
    ]);
    std::fs::write(
        path.join("teachers.json"),
        serde_json::to_string_pretty(&teachers)?,
    )?;

    let groups = serde_json::json!([
        {"id": 1, "name": "CS-2024", "degree": "bachelor", "population": 35, "allowed_days": "0,1,2"},
        {"id": 2, "name": "CS-2023", "degree": "bachelor", "population": 28},
        {"id": 3, "name": "EE-2024", "degree": "master", "population": 20}
    ]);
    std::fs::write(
        path.join("groups.json"),
        serde_json::to_string_pretty(&groups)?,
    )?;

    let lessons = serde_json::json!([
        {"id": 1, "course_id": 1, "group_id": 1},
        {"id": 2, "course_id": 2, "group_id": 1},
        {"id": 3, "course_id": 5, "group_id": 1, "teacher_id": 1},
        {"id": 4, "course_id": 1, "group_id": 2},
        {"id": 5, "course_id": 3, "group_id": 2},
        {"id": 6, "course_id": 4, "group_id": 3},
        {"id": 7, "course_id": 5, "group_id": 3}
    ]);
    std::fs::write(
        path.join("lessons.json"),
        serde_json::to_string_pretty(&lessons)?,
    )?;

    let teacher_courses = serde_json::json!([
        {"teacher_id": 1, "course_id": 1},
        {"teacher_id": 1, "course_id": 5},
        {"teacher_id": 2, "course_id": 2},
        {"teacher_id": 2, "course_id": 1},
        {"teacher_id": 3, "course_id": 3},
        {"teacher_id": 4, "course_id": 4},
        {"teacher_id": 4, "course_id": 5}
    ]);
    std::fs::write(
        path.join("teacher_courses.json"),
        serde_json::to_string_pretty(&teacher_courses)?,
    )?;

    // Dr. Brown only teaches mornings
    let availability: Vec<serde_json::Value> = (0..6u32)
        .flat_map(|day| {
            [1, 2].into_iter().map(move |slot| {
                serde_json::json!({"teacher_id": 3, "timeslot_id": day * 5 + slot})
            })
        })
        .collect();
    std::fs::write(
        path.join("teacher_availability.json"),
        serde_json::to_string_pretty(&availability)?,
    )?;

    let curriculum = serde_json::json!([
        {"group_id": 1, "course_id": 1},
        {"group_id": 1, "course_id": 2},
        {"group_id": 1, "course_id": 5},
        {"group_id": 2, "course_id": 1},
        {"group_id": 2, "course_id": 3},
        {"group_id": 3, "course_id": 4},
        {"group_id": 3, "course_id": 5}
    ]);
    std::fs::write(
        path.join("curriculum.json"),
        serde_json::to_string_pretty(&curriculum)?,
    )?;

    let project = serde_json::json!({"name": "Demo Term", "year": 2026, "semester": 1});
    std::fs::write(
        path.join("project.json"),
        serde_json::to_string_pretty(&project)?,
    )?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
