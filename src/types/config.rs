use serde::{Deserialize, Serialize};

/// Weights for the soft objectives. Larger pushes the search harder
/// against that objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftWeights {
    /// Per empty slot between a teacher's lessons on one day
    #[serde(default = "default_teacher_idle")]
    pub teacher_idle: f64,
    /// Per empty slot between a group's lessons on one day
    #[serde(default = "default_student_idle")]
    pub student_idle: f64,
    /// Per (group, week layer, active day) triple
    #[serde(default = "default_student_compactness")]
    pub student_compactness: f64,
}

fn default_teacher_idle() -> f64 {
    10.0
}

fn default_student_idle() -> f64 {
    5.0
}

fn default_student_compactness() -> f64 {
    50.0
}

impl Default for SoftWeights {
    fn default() -> Self {
        Self {
            teacher_idle: default_teacher_idle(),
            student_idle: default_student_idle(),
            student_compactness: default_student_compactness(),
        }
    }
}

impl SoftWeights {
    /// All-zero weights; the search then optimises feasibility only.
    pub fn zero() -> Self {
        Self {
            teacher_idle: 0.0,
            student_idle: 0.0,
            student_compactness: 0.0,
        }
    }
}

/// Tuning knobs for the evolutionary search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    #[serde(default = "default_max_generations")]
    pub max_generations: u32,
    /// Consecutive generations without improvement before giving up
    #[serde(default = "default_max_stagnant_generations")]
    pub max_stagnant_generations: u32,
    /// Per-gene probability of resampling during mutation
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Fixed seed for reproducible runs; None draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_population_size() -> usize {
    100
}

fn default_max_generations() -> u32 {
    1000
}

fn default_max_stagnant_generations() -> u32 {
    150
}

fn default_mutation_rate() -> f64 {
    0.01
}

fn default_tournament_size() -> usize {
    3
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            max_generations: default_max_generations(),
            max_stagnant_generations: default_max_stagnant_generations(),
            mutation_rate: default_mutation_rate(),
            tournament_size: default_tournament_size(),
            seed: None,
        }
    }
}

/// Everything loadable from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    #[serde(default)]
    pub weights: SoftWeights,
    #[serde(default)]
    pub search: SearchParams,
}
