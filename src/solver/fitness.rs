use super::genes::{SolverTables, PARITY_EVEN, PARITY_ODD};
use super::genome::Gene;
use crate::types::SoftWeights;
use itertools::Itertools;
use std::collections::HashMap;

/// Week layers a gene is active in
fn layers(parity: u32) -> &'static [u8] {
    match parity {
        PARITY_ODD => &[0],
        PARITY_EVEN => &[1],
        _ => &[0, 1],
    }
}

/// Integer tallies behind the weighted soft cost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftBreakdown {
    /// Empty slots between a teacher's lessons, summed over (teacher, day, layer)
    pub teacher_idle_slots: u64,
    /// Empty slots between a group's lessons, summed over (group, day, layer)
    pub student_idle_slots: u64,
    /// Days with any lesson, summed over (group, layer)
    pub group_active_days: u64,
}

impl SoftBreakdown {
    pub fn weighted(&self, weights: &SoftWeights) -> f64 {
        self.teacher_idle_slots as f64 * weights.teacher_idle
            + self.student_idle_slots as f64 * weights.student_idle
            + self.group_active_days as f64 * weights.student_compactness
    }
}

/// Scores genomes against the soft objectives
pub struct FitnessCalculator<'a> {
    tables: &'a SolverTables,
    weights: SoftWeights,
}

impl<'a> FitnessCalculator<'a> {
    pub fn new(tables: &'a SolverTables, weights: &SoftWeights) -> Self {
        Self {
            tables,
            weights: weights.clone(),
        }
    }

    pub fn soft_cost(&self, genes: &[Gene]) -> f64 {
        self.breakdown(genes).weighted(&self.weights)
    }

    /// Tally the soft objectives over both week layers. All accumulation
    /// is integer, so map iteration order cannot perturb the final sum.
    pub fn breakdown(&self, genes: &[Gene]) -> SoftBreakdown {
        let tables = self.tables;
        let mut teacher_slots: HashMap<(u32, u8, u8), Vec<u32>> = HashMap::new();
        let mut group_slots: HashMap<(u32, u8, u8), Vec<u32>> = HashMap::new();
        let mut group_days: HashMap<(u32, u8), u8> = HashMap::new();

        for (g, gene) in genes.iter().enumerate() {
            let day = tables.timeslot_days[gene.timeslot as usize];
            let ordinal = tables.timeslot_daily_ordinals[gene.timeslot as usize];
            let group = tables.gene_groups[g];
            for &layer in layers(gene.parity) {
                teacher_slots
                    .entry((gene.teacher, day, layer))
                    .or_default()
                    .push(ordinal);
                group_slots
                    .entry((group, day, layer))
                    .or_default()
                    .push(ordinal);
                *group_days.entry((group, layer)).or_default() |= 1 << day;
            }
        }

        SoftBreakdown {
            teacher_idle_slots: idle_slots(teacher_slots.into_values()),
            student_idle_slots: idle_slots(group_slots.into_values()),
            group_active_days: group_days
                .values()
                .map(|mask| u64::from(mask.count_ones()))
                .sum(),
        }
    }
}

/// Sum of empty slots between consecutive occupied ordinals within each
/// sequence. Co-located duplicates contribute nothing; they are already
/// penalised as conflicts.
fn idle_slots(sequences: impl Iterator<Item = Vec<u32>>) -> u64 {
    sequences
        .map(|mut ordinals| {
            ordinals.sort_unstable();
            ordinals
                .iter()
                .tuple_windows()
                .map(|(a, b)| u64::from((b - a).saturating_sub(1)))
                .sum::<u64>()
        })
        .sum()
}
