use super::constraints::{ConstraintChecker, Violation};
use super::fitness::{FitnessCalculator, SoftBreakdown};
use super::genes::SolverTables;
use super::genome::{Gene, Genome, Population};
use super::operators::GeneticOperators;
use super::SearchControl;
use crate::error::TimetableError;
use crate::types::{
    Assignment, ClassroomId, SearchParams, SoftWeights, Solution, SolveMetadata, TeacherId,
    TimeslotId, WeekParity,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::time::Instant;

/// Drives one search run over an input snapshot.
///
/// Owns the precomputed tables; the genetic state lives only inside
/// `run`, so one engine can score saved timetables and run searches
/// interchangeably.
pub struct SolverEngine<'a> {
    input: &'a crate::types::SolverInput,
    tables: SolverTables,
    weights: SoftWeights,
}

impl<'a> SolverEngine<'a> {
    pub fn new(
        input: &'a crate::types::SolverInput,
        weights: &SoftWeights,
    ) -> Result<Self, TimetableError> {
        let tables = SolverTables::build(input)?;
        Ok(Self {
            input,
            tables,
            weights: weights.clone(),
        })
    }

    pub fn tables(&self) -> &SolverTables {
        &self.tables
    }

    pub fn run(&self, params: &SearchParams) -> Solution {
        self.run_with_control(params, &mut SearchControl::default())
    }

    /// The generational loop. Per generation: evaluate every genome,
    /// track the best-ever by value, stop on stagnation, perfection, the
    /// generation bound, or cancellation; otherwise breed the next
    /// generation from an elitist copy plus tournament-selected children.
    pub fn run_with_control(&self, params: &SearchParams, control: &mut SearchControl) -> Solution {
        let started = Instant::now();

        if self.input.lessons.is_empty()
            || self.input.classrooms.is_empty()
            || self.input.timeslots.is_empty()
            || self.input.teachers.is_empty()
            || self.tables.num_genes() == 0
        {
            log::warn!("refusing to search an empty snapshot");
            return Solution::infeasible();
        }

        let mut rng = match params.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let checker = ConstraintChecker::new(&self.tables);
        let fitness = FitnessCalculator::new(&self.tables, &self.weights);
        let operators = GeneticOperators::new(&self.tables, params.mutation_rate);

        let mut population = Population::seed(params.population_size, &self.tables, &mut rng);
        let mut best: Option<Genome> = None;
        let mut best_cost = f64::INFINITY;
        let mut stagnant = 0u32;
        let mut generations_run = 0u32;

        for generation in 0..params.max_generations {
            if control.cancelled() {
                log::debug!("cancelled at generation {generation}");
                break;
            }
            generations_run = generation + 1;

            let mut improved = false;
            for genome in &mut population.genomes {
                let violations = checker.violation_score(&genome.genes);
                let soft = fitness.soft_cost(&genome.genes);
                genome.fitness = violations as f64 + soft;
                genome.is_valid = violations == 0;

                if genome.fitness < best_cost {
                    best_cost = genome.fitness;
                    best = Some(genome.clone());
                    improved = true;
                }
            }

            control.report(generation, best_cost);
            if generation % 10 == 0 {
                log::debug!("generation {generation}: best cost {best_cost}");
            }

            if improved {
                stagnant = 0;
            } else {
                stagnant += 1;
            }
            if stagnant >= params.max_stagnant_generations {
                log::debug!(
                    "stopping at generation {generation}: no improvement for {stagnant} generations"
                );
                break;
            }
            if best_cost == 0.0 {
                break;
            }
            if generation + 1 == params.max_generations {
                break;
            }

            let mut next = Vec::with_capacity(params.population_size);
            if let Some(elite) = &best {
                // By value: later mutation must not touch the retained best
                next.push(elite.clone());
            }
            while next.len() < params.population_size {
                let p1 = tournament(&population.genomes, params.tournament_size, &mut rng);
                let p2 = tournament(&population.genomes, params.tournament_size, &mut rng);
                let mut child = operators.crossover(p1, p2, &mut rng);
                operators.mutate(&mut child, &mut rng);
                next.push(child);
            }
            population.genomes = next;
        }

        let valid = best.as_ref().is_some_and(|b| b.is_valid);
        let assignments = if valid {
            best.as_ref().map(|b| self.assignments_for(&b.genes))
        } else {
            None
        };

        Solution {
            assignments,
            best_cost,
            valid,
            metadata: SolveMetadata {
                generated_at: chrono::Utc::now().to_rfc3339(),
                algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
                generations: generations_run,
                solve_time_ms: started.elapsed().as_millis() as u64,
            },
        }
    }

    /// Map genome rows back to entity identifiers, one record per gene.
    pub fn assignments_for(&self, genes: &[Gene]) -> Vec<Assignment> {
        genes
            .iter()
            .enumerate()
            .map(|(g, gene)| Assignment {
                lesson_id: self.tables.metas[g].lesson_id,
                timeslot_id: self.input.timeslots[gene.timeslot as usize].id,
                room_id: self.input.classrooms[gene.room as usize].id,
                week_parity: WeekParity::from_code(gene.parity),
                teacher_id: self.input.teachers[gene.teacher as usize].id,
            })
            .collect()
    }

    /// Rebuild genome rows from saved assignments so they can be re-scored.
    /// Assignments for a multi-gene lesson apply in saved order.
    pub fn genes_from_assignments(
        &self,
        assignments: &[Assignment],
    ) -> Result<Vec<Gene>, TimetableError> {
        let timeslot_idx: HashMap<TimeslotId, u32> = self
            .input
            .timeslots
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i as u32))
            .collect();
        let room_idx: HashMap<ClassroomId, u32> = self
            .input
            .classrooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id, i as u32))
            .collect();
        let teacher_idx: HashMap<TeacherId, u32> = self
            .input
            .teachers
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i as u32))
            .collect();

        let mut by_lesson: HashMap<crate::types::LessonId, VecDeque<&Assignment>> = HashMap::new();
        for assignment in assignments {
            by_lesson
                .entry(assignment.lesson_id)
                .or_default()
                .push_back(assignment);
        }

        let mut genes = Vec::with_capacity(self.tables.num_genes());
        for meta in &self.tables.metas {
            let assignment = by_lesson
                .get_mut(&meta.lesson_id)
                .and_then(VecDeque::pop_front)
                .ok_or_else(|| {
                    TimetableError::TimetableMismatch(format!(
                        "missing assignment for lesson {}",
                        meta.lesson_id
                    ))
                })?;
            let lookup = |name: &str, value: Option<&u32>| {
                value.copied().ok_or_else(|| {
                    TimetableError::TimetableMismatch(format!(
                        "assignment for lesson {} names an unknown {name}",
                        meta.lesson_id
                    ))
                })
            };
            genes.push(Gene {
                timeslot: lookup("timeslot", timeslot_idx.get(&assignment.timeslot_id))?,
                room: lookup("room", room_idx.get(&assignment.room_id))?,
                parity: assignment.week_parity.code(),
                teacher: lookup("teacher", teacher_idx.get(&assignment.teacher_id))?,
            });
        }

        let leftover: usize = by_lesson.values().map(VecDeque::len).sum();
        if leftover > 0 {
            return Err(TimetableError::TimetableMismatch(format!(
                "{leftover} assignments do not correspond to any lesson"
            )));
        }

        Ok(genes)
    }

    /// Score a set of genome rows: hard violation total plus soft tallies.
    pub fn score(&self, genes: &[Gene]) -> (u64, SoftBreakdown) {
        let checker = ConstraintChecker::new(&self.tables);
        let fitness = FitnessCalculator::new(&self.tables, &self.weights);
        (checker.violation_score(genes), fitness.breakdown(genes))
    }

    /// Detailed hard-constraint listing for a set of genome rows.
    pub fn violations(&self, genes: &[Gene]) -> Vec<Violation> {
        ConstraintChecker::new(&self.tables).violations(genes)
    }

    pub fn soft_weights(&self) -> &SoftWeights {
        &self.weights
    }
}

/// Tournament selection: draw `size` genomes with replacement, keep the
/// lowest cost; earlier draws win ties.
fn tournament<'g, R: Rng>(genomes: &'g [Genome], size: usize, rng: &mut R) -> &'g Genome {
    let mut best = &genomes[rng.gen_range(0..genomes.len())];
    for _ in 1..size.max(1) {
        let candidate = &genomes[rng.gen_range(0..genomes.len())];
        if candidate.fitness < best.fitness {
            best = candidate;
        }
    }
    best
}
