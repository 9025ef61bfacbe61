use super::genes::{SolverTables, PARITY_EVEN, PARITY_ODD};
use super::genome::Gene;
use crate::types::day_name;

/// Penalty per overlapping pair sharing a timeslot and a teacher, group, or room
pub const CONFLICT_PENALTY: u64 = 1000;
/// Penalty per gene breaching capacity, room type, allowed days, or availability
pub const ATTRIBUTE_PENALTY: u64 = 100;

/// Week-layer bitmask: odd -> 0b01, even -> 0b10, both -> 0b11
fn parity_mask(parity: u32) -> u32 {
    match parity {
        PARITY_ODD => 0b01,
        PARITY_EVEN => 0b10,
        _ => 0b11,
    }
}

/// A single hard-constraint breach, for reporting
#[derive(Debug, Clone)]
pub struct Violation {
    pub constraint: &'static str,
    pub message: String,
    pub penalty: u64,
}

/// Scores genomes against the hard constraints. Zero means feasible.
pub struct ConstraintChecker<'a> {
    tables: &'a SolverTables,
}

impl<'a> ConstraintChecker<'a> {
    pub fn new(tables: &'a SolverTables) -> Self {
        Self { tables }
    }

    /// Total violation score for a genome. This is the fast path the
    /// search loop runs once per genome per generation.
    pub fn violation_score(&self, genes: &[Gene]) -> u64 {
        let mut violations = 0u64;

        violations += self.conflict_pairs(genes, |i| genes[i].teacher).len() as u64
            * CONFLICT_PENALTY;
        violations += self
            .conflict_pairs(genes, |i| self.tables.gene_groups[i])
            .len() as u64
            * CONFLICT_PENALTY;
        violations +=
            self.conflict_pairs(genes, |i| genes[i].room).len() as u64 * CONFLICT_PENALTY;

        for (g, gene) in genes.iter().enumerate() {
            violations += self.attribute_penalties(g, gene) * ATTRIBUTE_PENALTY;
        }

        violations
    }

    /// Detailed listing of every breach, for the validate surface.
    /// Mirrors `violation_score` exactly: the penalties sum to it.
    pub fn violations(&self, genes: &[Gene]) -> Vec<Violation> {
        let mut out = Vec::new();
        let tables = self.tables;

        for (name, pairs) in [
            ("TeacherConflict", self.conflict_pairs(genes, |i| genes[i].teacher)),
            (
                "GroupConflict",
                self.conflict_pairs(genes, |i| tables.gene_groups[i]),
            ),
            ("RoomConflict", self.conflict_pairs(genes, |i| genes[i].room)),
        ] {
            for (a, b) in pairs {
                out.push(Violation {
                    constraint: name,
                    message: format!(
                        "lessons {} and {} collide at timeslot index {}",
                        tables.metas[a].lesson_id,
                        tables.metas[b].lesson_id,
                        genes[a].timeslot,
                    ),
                    penalty: CONFLICT_PENALTY,
                });
            }
        }

        for (g, gene) in genes.iter().enumerate() {
            let lesson = tables.metas[g].lesson_id;
            let room = gene.room as usize;
            if tables.room_capacities[room] < tables.gene_populations[g] {
                out.push(Violation {
                    constraint: "RoomCapacity",
                    message: format!(
                        "lesson {lesson}: room holds {}, group has {}",
                        tables.room_capacities[room], tables.gene_populations[g],
                    ),
                    penalty: ATTRIBUTE_PENALTY,
                });
            }
            if tables.room_types[room] != tables.gene_room_types[g] {
                out.push(Violation {
                    constraint: "RoomType",
                    message: format!(
                        "lesson {lesson}: needs {}, room is {}",
                        tables.gene_room_types[g], tables.room_types[room],
                    ),
                    penalty: ATTRIBUTE_PENALTY,
                });
            }
            let day = tables.timeslot_days[gene.timeslot as usize];
            if let Some(days) = &tables.gene_allowed_days[g] {
                if !days.contains(&day) {
                    out.push(Violation {
                        constraint: "AllowedDays",
                        message: format!("lesson {lesson}: group may not meet on {}", day_name(day)),
                        penalty: ATTRIBUTE_PENALTY,
                    });
                }
            }
            if let Some(slots) = &tables.teacher_allowed_slots[gene.teacher as usize] {
                if !slots.contains(&gene.timeslot) {
                    out.push(Violation {
                        constraint: "TeacherAvailability",
                        message: format!(
                            "lesson {lesson}: teacher unavailable at timeslot index {}",
                            gene.timeslot
                        ),
                        penalty: ATTRIBUTE_PENALTY,
                    });
                }
            }
        }

        out
    }

    /// Per-gene attribute breaches (capacity, type, days, availability),
    /// counted rather than listed.
    fn attribute_penalties(&self, g: usize, gene: &Gene) -> u64 {
        let tables = self.tables;
        let room = gene.room as usize;
        let mut count = 0u64;

        if tables.room_capacities[room] < tables.gene_populations[g] {
            count += 1;
        }
        if tables.room_types[room] != tables.gene_room_types[g] {
            count += 1;
        }
        if let Some(days) = &tables.gene_allowed_days[g] {
            if !days.contains(&tables.timeslot_days[gene.timeslot as usize]) {
                count += 1;
            }
        }
        if let Some(slots) = &tables.teacher_allowed_slots[gene.teacher as usize] {
            if !slots.contains(&gene.timeslot) {
                count += 1;
            }
        }

        count
    }

    /// All unordered gene pairs that share a timeslot and an entity and
    /// whose week layers overlap. Sorts by (entity, timeslot) and scans
    /// runs of equal keys; every pair within a run is considered, so a
    /// triple booking yields three conflicts.
    fn conflict_pairs<F>(&self, genes: &[Gene], entity: F) -> Vec<(usize, usize)>
    where
        F: Fn(usize) -> u32,
    {
        let mut order: Vec<usize> = (0..genes.len()).collect();
        order.sort_unstable_by_key(|&i| (entity(i), genes[i].timeslot));

        let mut pairs = Vec::new();
        let mut run_start = 0;
        for end in 1..=order.len() {
            let boundary = end == order.len() || {
                let prev = order[end - 1];
                let next = order[end];
                entity(prev) != entity(next) || genes[prev].timeslot != genes[next].timeslot
            };
            if !boundary {
                continue;
            }
            let run = &order[run_start..end];
            if run.len() > 1 {
                for (i, &a) in run.iter().enumerate() {
                    let mask_a = parity_mask(genes[a].parity);
                    for &b in &run[i + 1..] {
                        if mask_a & parity_mask(genes[b].parity) != 0 {
                            pairs.push((a.min(b), a.max(b)));
                        }
                    }
                }
            }
            run_start = end;
        }
        pairs
    }
}
