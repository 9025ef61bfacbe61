use super::genes::{SolverTables, PARITY_FREE};
use rand::Rng;

/// One row of the genome: the placement chosen for a single gene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gene {
    pub timeslot: u32,
    pub room: u32,
    pub parity: u32,
    pub teacher: u32,
}

/// A candidate timetable: one placement row per gene, plus the score
/// from the latest evaluation
#[derive(Debug, Clone)]
pub struct Genome {
    pub genes: Vec<Gene>,
    pub fitness: f64,
    pub is_valid: bool,
}

impl Genome {
    pub fn zeroed(num_genes: usize) -> Self {
        Self {
            genes: vec![
                Gene {
                    timeslot: 0,
                    room: 0,
                    parity: 0,
                    teacher: 0,
                };
                num_genes
            ],
            fitness: f64::INFINITY,
            is_valid: false,
        }
    }

    /// Random initialisation, column by column, restricted to the
    /// per-gene domain tables.
    pub fn random<R: Rng>(tables: &SolverTables, rng: &mut R) -> Self {
        let mut genome = Self::zeroed(tables.num_genes());

        for gene in &mut genome.genes {
            gene.timeslot = rng.gen_range(0..tables.num_timeslots as u32);
        }

        for (g, gene) in genome.genes.iter_mut().enumerate() {
            let rooms = &tables.valid_rooms[g];
            gene.room = if rooms.is_empty() {
                rng.gen_range(0..tables.num_rooms as u32)
            } else {
                rooms[rng.gen_range(0..rooms.len())]
            };
        }

        for (g, gene) in genome.genes.iter_mut().enumerate() {
            gene.parity = match tables.fixed_parities[g] {
                PARITY_FREE => rng.gen_range(0..=1),
                fixed => fixed as u32,
            };
        }

        for (g, gene) in genome.genes.iter_mut().enumerate() {
            let teachers = &tables.valid_teachers[g];
            if !teachers.is_empty() {
                gene.teacher = teachers[rng.gen_range(0..teachers.len())];
            }
        }

        genome
    }
}

/// Fixed-size collection of genomes
#[derive(Debug, Clone)]
pub struct Population {
    pub genomes: Vec<Genome>,
}

impl Population {
    pub fn seed<R: Rng>(size: usize, tables: &SolverTables, rng: &mut R) -> Self {
        Self {
            genomes: (0..size).map(|_| Genome::random(tables, rng)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::genes::PARITY_BOTH;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_tables() -> SolverTables {
        use crate::types::*;
        let input = SolverInput {
            lessons: vec![
                Lesson {
                    id: LessonId(1),
                    course_id: CourseId(1),
                    group_id: GroupId(1),
                    teacher_id: None,
                    duration_slots: 1,
                },
                Lesson {
                    id: LessonId(2),
                    course_id: CourseId(2),
                    group_id: GroupId(1),
                    teacher_id: None,
                    duration_slots: 1,
                },
            ],
            classrooms: vec![
                Classroom {
                    id: ClassroomId(1),
                    name: "101".into(),
                    faculty: String::new(),
                    capacity: 40,
                    room_type: RoomType::Normal,
                },
                Classroom {
                    id: ClassroomId(2),
                    name: "Lab".into(),
                    faculty: String::new(),
                    capacity: 40,
                    room_type: RoomType::ComputerSite,
                },
            ],
            timeslots: (0..6)
                .map(|i| Timeslot {
                    id: TimeslotId(i),
                    day_of_week: (i % 3) as u8,
                    start_time: if i < 3 { "08:00".into() } else { "10:00".into() },
                    end_time: String::new(),
                })
                .collect(),
            courses: vec![
                Course {
                    id: CourseId(1),
                    name: "A".into(),
                    required_room_type: RoomType::Normal,
                    units: 2,
                    min_population: None,
                    max_population: None,
                },
                Course {
                    id: CourseId(2),
                    name: "B".into(),
                    required_room_type: RoomType::ComputerSite,
                    units: 1,
                    min_population: None,
                    max_population: None,
                },
            ],
            teachers: vec![
                Teacher {
                    id: TeacherId(1),
                    name: "T1".into(),
                },
                Teacher {
                    id: TeacherId(2),
                    name: "T2".into(),
                },
            ],
            groups: vec![StudentGroup {
                id: GroupId(1),
                name: "G1".into(),
                degree: Degree::Bachelor,
                population: 30,
                allowed_days: None,
            }],
            teacher_course_eligibility: vec![
                TeacherCourseLink {
                    teacher_id: TeacherId(1),
                    course_id: CourseId(1),
                },
                TeacherCourseLink {
                    teacher_id: TeacherId(2),
                    course_id: CourseId(2),
                },
            ],
            teacher_availability: vec![],
            group_course_curriculum: vec![],
            project: None,
        };
        SolverTables::build(&input).unwrap()
    }

    #[test]
    fn random_genome_has_one_row_per_gene() {
        let tables = small_tables();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let genome = Genome::random(&tables, &mut rng);
        assert_eq!(genome.genes.len(), tables.num_genes());
        assert!(!genome.is_valid);
    }

    #[test]
    fn random_genome_respects_domains() {
        let tables = small_tables();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let genome = Genome::random(&tables, &mut rng);
            for (g, gene) in genome.genes.iter().enumerate() {
                assert!((gene.timeslot as usize) < tables.num_timeslots);
                assert!(tables.valid_rooms[g].contains(&gene.room));
                assert!(tables.valid_teachers[g].contains(&gene.teacher));
                match tables.fixed_parities[g] {
                    PARITY_FREE => assert!(gene.parity <= 1),
                    fixed => assert_eq!(gene.parity, fixed as u32),
                }
            }
        }
    }

    #[test]
    fn fixed_parity_marker_forces_both() {
        let tables = small_tables();
        assert_eq!(tables.fixed_parities[0], PARITY_BOTH as i8);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let genome = Genome::random(&tables, &mut rng);
        assert_eq!(genome.genes[0].parity, PARITY_BOTH);
    }

    #[test]
    fn same_seed_same_population() {
        let tables = small_tables();
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let pa = Population::seed(10, &tables, &mut a);
        let pb = Population::seed(10, &tables, &mut b);
        for (ga, gb) in pa.genomes.iter().zip(&pb.genomes) {
            assert_eq!(ga.genes, gb.genes);
        }
    }
}
