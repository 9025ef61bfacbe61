//! University Scheduler - Genetic-algorithm university timetable generator
//!
//! This library computes weekly university timetables: every lesson (a
//! course a student group must attend) is assigned a timeslot, a room, a
//! week parity (odd/even/both weeks), and a teacher, so that no hard
//! constraint is violated and a weighted sum of quality penalties is
//! minimised.
//!
//! # Algorithm Overview
//!
//! The solver is an evolutionary search over a fixed gene table:
//! 1. **Gene expansion**: each lesson becomes one or more genes based on
//!    its course's units, with per-gene room/teacher/day domains
//! 2. **Population seeding**: random genomes restricted to those domains
//! 3. **Evaluation**: hard-constraint violation score plus weighted soft
//!    cost (idle gaps, day compactness) per genome
//! 4. **Reproduction**: elitism, tournament selection, uniform crossover,
//!    whole-gene mutation
//! 5. **Termination**: perfection, generation bound, or stagnation
//!
//! # Example
//!
//! ```no_run
//! use university_scheduler::parser::load_input_from_dir;
//! use university_scheduler::solver::solve;
//! use university_scheduler::types::{SearchParams, SoftWeights};
//! use std::path::Path;
//!
//! let input = load_input_from_dir(Path::new("./data/demo")).unwrap();
//! let solution = solve(&input, &SoftWeights::default(), &SearchParams::default()).unwrap();
//! println!("valid: {}, cost: {:.1}", solution.valid, solution.best_cost);
//! ```

pub mod error;
pub mod parser;
pub mod reporter;
pub mod solver;
pub mod types;

pub use error::{Result, TimetableError};
