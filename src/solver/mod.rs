mod constraints;
mod engine;
mod fitness;
mod genes;
mod genome;
mod operators;

pub use constraints::*;
pub use engine::*;
pub use fitness::*;
pub use genes::*;
pub use genome::*;
pub use operators::*;

use crate::error::Result;
use crate::types::{SearchParams, SoftWeights, Solution, SolverInput};
use std::sync::atomic::{AtomicBool, Ordering};

/// Caller-supplied hooks for a running search
#[derive(Default)]
pub struct SearchControl<'a> {
    /// Checked between generations; set true to stop the search cleanly
    pub cancel: Option<&'a AtomicBool>,
    /// Invoked on the driver thread after each generation's evaluation
    /// with (generation, best cost so far)
    pub on_generation: Option<Box<dyn FnMut(u32, f64) + 'a>>,
}

impl SearchControl<'_> {
    pub(crate) fn cancelled(&self) -> bool {
        self.cancel
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    pub(crate) fn report(&mut self, generation: u32, best_cost: f64) {
        if let Some(observer) = self.on_generation.as_mut() {
            observer(generation, best_cost);
        }
    }
}

/// Main entry point: search for a timetable over an input snapshot
pub fn solve(input: &SolverInput, weights: &SoftWeights, params: &SearchParams) -> Result<Solution> {
    solve_with_control(input, weights, params, &mut SearchControl::default())
}

/// `solve` with cancellation and progress hooks
pub fn solve_with_control(
    input: &SolverInput,
    weights: &SoftWeights,
    params: &SearchParams,
    control: &mut SearchControl,
) -> Result<Solution> {
    let engine = SolverEngine::new(input, weights)?;
    Ok(engine.run_with_control(params, control))
}
