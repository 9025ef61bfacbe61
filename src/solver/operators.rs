use super::genes::{SolverTables, PARITY_FREE};
use super::genome::{Gene, Genome};
use rand::Rng;

/// Crossover and mutation over the per-gene domain tables
pub struct GeneticOperators<'a> {
    tables: &'a SolverTables,
    mutation_rate: f64,
}

impl<'a> GeneticOperators<'a> {
    pub fn new(tables: &'a SolverTables, mutation_rate: f64) -> Self {
        Self {
            tables,
            mutation_rate,
        }
    }

    /// Row-wise uniform crossover: each gene is copied whole from one
    /// parent or the other with equal probability.
    pub fn crossover<R: Rng>(&self, a: &Genome, b: &Genome, rng: &mut R) -> Genome {
        let genes: Vec<Gene> = a
            .genes
            .iter()
            .zip(&b.genes)
            .map(|(ga, gb)| if rng.gen_bool(0.5) { *ga } else { *gb })
            .collect();
        Genome {
            genes,
            fitness: f64::INFINITY,
            is_valid: false,
        }
    }

    /// Resample whole genes at the per-gene mutation rate. A selected
    /// gene has all four columns redrawn together; fixed parity stays.
    pub fn mutate<R: Rng>(&self, genome: &mut Genome, rng: &mut R) {
        for (g, gene) in genome.genes.iter_mut().enumerate() {
            if !rng.gen_bool(self.mutation_rate) {
                continue;
            }

            gene.timeslot = rng.gen_range(0..self.tables.num_timeslots as u32);

            let rooms = &self.tables.valid_rooms[g];
            gene.room = if rooms.is_empty() {
                rng.gen_range(0..self.tables.num_rooms as u32)
            } else {
                rooms[rng.gen_range(0..rooms.len())]
            };

            if self.tables.fixed_parities[g] == PARITY_FREE {
                gene.parity = rng.gen_range(0..=1);
            }

            let teachers = &self.tables.valid_teachers[g];
            if !teachers.is_empty() {
                gene.teacher = teachers[rng.gen_range(0..teachers.len())];
            }
        }
    }
}
