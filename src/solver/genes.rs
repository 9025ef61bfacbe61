use crate::error::TimetableError;
use crate::types::{CourseId, GroupId, LessonId, RoomType, SolverInput, TeacherId, TimeslotId};
use std::collections::{HashMap, HashSet};

/// Parity codes stored in the genome's parity column
pub const PARITY_ODD: u32 = 0;
pub const PARITY_EVEN: u32 = 1;
pub const PARITY_BOTH: u32 = 2;

/// Fixed-parity marker for genes whose parity the search may choose
pub const PARITY_FREE: i8 = -1;

/// Back-pointer from a gene to the lesson it was expanded from
#[derive(Debug, Clone)]
pub struct GeneMeta {
    pub lesson_id: LessonId,
    pub course_id: CourseId,
    pub group_id: GroupId,
    pub prebound_teacher: Option<TeacherId>,
}

/// Read-only tables driving one search run.
///
/// Built once from the input snapshot. Gene order is fixed here and stays
/// stable for the whole run; only the genome columns vary during search.
#[derive(Debug, Clone)]
pub struct SolverTables {
    pub metas: Vec<GeneMeta>,
    /// `PARITY_BOTH` for genes locked to weekly recurrence, `PARITY_FREE` otherwise
    pub fixed_parities: Vec<i8>,
    /// Group index per gene, for conflict bucketing
    pub gene_groups: Vec<u32>,
    pub gene_populations: Vec<u32>,
    pub gene_room_types: Vec<RoomType>,
    /// Allowed day indices per gene; None means unrestricted
    pub gene_allowed_days: Vec<Option<Vec<u8>>>,
    /// Room indices whose type matches and capacity fits, per gene
    pub valid_rooms: Vec<Vec<u32>>,
    /// Teacher indices the search may assign, per gene
    pub valid_teachers: Vec<Vec<u32>>,

    pub room_capacities: Vec<u32>,
    pub room_types: Vec<RoomType>,
    /// Day of week per timeslot index
    pub timeslot_days: Vec<u8>,
    /// Rank of each timeslot within its day, ordered by start time
    pub timeslot_daily_ordinals: Vec<u32>,
    /// Allowed timeslot indices per teacher index; None means unrestricted
    pub teacher_allowed_slots: Vec<Option<HashSet<u32>>>,

    pub num_timeslots: usize,
    pub num_rooms: usize,
    pub num_teachers: usize,
}

impl SolverTables {
    /// Expand lessons into genes and precompute every per-gene domain table.
    pub fn build(input: &SolverInput) -> Result<Self, TimetableError> {
        let courses_map: HashMap<CourseId, &crate::types::Course> =
            input.courses.iter().map(|c| (c.id, c)).collect();
        let groups_map: HashMap<GroupId, &crate::types::StudentGroup> =
            input.groups.iter().map(|g| (g.id, g)).collect();
        let teacher_idx: HashMap<TeacherId, u32> = input
            .teachers
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i as u32))
            .collect();
        let timeslot_idx: HashMap<TimeslotId, u32> = input
            .timeslots
            .iter()
            .enumerate()
            .map(|(i, ts)| (ts.id, i as u32))
            .collect();

        // Course -> eligible teacher indices
        let mut course_teachers: HashMap<CourseId, Vec<u32>> = HashMap::new();
        for link in &input.teacher_course_eligibility {
            if let Some(&t) = teacher_idx.get(&link.teacher_id) {
                course_teachers.entry(link.course_id).or_default().push(t);
            }
        }

        // Teacher availability; a teacher with no records stays unrestricted
        let mut teacher_allowed_slots: Vec<Option<HashSet<u32>>> =
            vec![None; input.teachers.len()];
        for link in &input.teacher_availability {
            let (Some(&t), Some(&ts)) = (
                teacher_idx.get(&link.teacher_id),
                timeslot_idx.get(&link.timeslot_id),
            ) else {
                continue;
            };
            teacher_allowed_slots[t as usize]
                .get_or_insert_with(HashSet::new)
                .insert(ts);
        }

        let timeslot_days: Vec<u8> = input.timeslots.iter().map(|ts| ts.day_of_week).collect();
        let timeslot_daily_ordinals = daily_ordinals(input);

        let all_teachers: Vec<u32> = (0..input.teachers.len() as u32).collect();

        let mut tables = Self {
            metas: Vec::new(),
            fixed_parities: Vec::new(),
            gene_groups: Vec::new(),
            gene_populations: Vec::new(),
            gene_room_types: Vec::new(),
            gene_allowed_days: Vec::new(),
            valid_rooms: Vec::new(),
            valid_teachers: Vec::new(),
            room_capacities: input.classrooms.iter().map(|r| r.capacity).collect(),
            room_types: input.classrooms.iter().map(|r| r.room_type).collect(),
            timeslot_days,
            timeslot_daily_ordinals,
            teacher_allowed_slots,
            num_timeslots: input.timeslots.len(),
            num_rooms: input.classrooms.len(),
            num_teachers: input.teachers.len(),
        };

        let group_indices: HashMap<GroupId, u32> = input
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id, i as u32))
            .collect();

        for lesson in &input.lessons {
            let course = courses_map.get(&lesson.course_id).ok_or(
                TimetableError::UnknownCourse {
                    lesson_id: lesson.id.0,
                    course_id: lesson.course_id.0,
                },
            )?;
            let group = groups_map.get(&lesson.group_id).ok_or(
                TimetableError::UnknownGroup {
                    lesson_id: lesson.id.0,
                    group_id: lesson.group_id.0,
                },
            )?;

            let mut valid_teachers = match lesson.teacher_id {
                Some(id) => match teacher_idx.get(&id) {
                    Some(&t) => vec![t],
                    None => {
                        log::warn!(
                            "lesson {} pre-bound to unknown teacher {id}; using course eligibility",
                            lesson.id
                        );
                        course_teachers
                            .get(&course.id)
                            .cloned()
                            .unwrap_or_default()
                    }
                },
                None => course_teachers
                    .get(&course.id)
                    .cloned()
                    .unwrap_or_default(),
            };
            if valid_teachers.is_empty() {
                log::warn!(
                    "no eligible teacher for lesson {} (course {}); considering all teachers",
                    lesson.id,
                    course.name
                );
                valid_teachers = all_teachers.clone();
            }

            let allowed_days = group.allowed_day_set();

            let valid_rooms: Vec<u32> = input
                .classrooms
                .iter()
                .enumerate()
                .filter(|(_, room)| {
                    room.room_type == course.required_room_type && room.fits(group.population)
                })
                .map(|(i, _)| i as u32)
                .collect();

            for parity in expand_units(course.units) {
                tables.metas.push(GeneMeta {
                    lesson_id: lesson.id,
                    course_id: lesson.course_id,
                    group_id: lesson.group_id,
                    prebound_teacher: lesson.teacher_id,
                });
                tables.fixed_parities.push(parity);
                tables.gene_groups.push(group_indices[&lesson.group_id]);
                tables.gene_populations.push(group.population);
                tables.gene_room_types.push(course.required_room_type);
                tables.gene_allowed_days.push(allowed_days.clone());
                tables.valid_rooms.push(valid_rooms.clone());
                tables.valid_teachers.push(valid_teachers.clone());
            }
        }

        Ok(tables)
    }

    pub fn num_genes(&self) -> usize {
        self.metas.len()
    }
}

/// Sub-lesson expansion policy. A unit pair recurs weekly ("both"); a
/// leftover unit becomes a variable-parity gene the search places on the
/// odd or the even layer.
fn expand_units(units: u8) -> Vec<i8> {
    match units {
        1 => vec![PARITY_FREE],
        2 => vec![PARITY_BOTH as i8],
        3 => vec![PARITY_BOTH as i8, PARITY_FREE],
        u => {
            let mut parities = vec![PARITY_BOTH as i8; usize::from(u / 2)];
            if u % 2 == 1 {
                parities.push(PARITY_FREE);
            }
            parities
        }
    }
}

/// Rank timeslots within each day by start time, ties by input order.
fn daily_ordinals(input: &SolverInput) -> Vec<u32> {
    let mut by_day: HashMap<u8, Vec<(&str, usize)>> = HashMap::new();
    for (i, ts) in input.timeslots.iter().enumerate() {
        by_day
            .entry(ts.day_of_week)
            .or_default()
            .push((ts.start_time.as_str(), i));
    }

    let mut ordinals = vec![0u32; input.timeslots.len()];
    for slots in by_day.values_mut() {
        slots.sort();
        for (rank, &(_, idx)) in slots.iter().enumerate() {
            ordinals[idx] = rank as u32;
        }
    }
    ordinals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn timeslot(id: u32, day: u8, start: &str) -> Timeslot {
        Timeslot {
            id: TimeslotId(id),
            day_of_week: day,
            start_time: start.to_string(),
            end_time: String::new(),
        }
    }

    fn base_input(units: u8) -> SolverInput {
        SolverInput {
            lessons: vec![Lesson {
                id: LessonId(1),
                course_id: CourseId(10),
                group_id: GroupId(20),
                teacher_id: None,
                duration_slots: 1,
            }],
            classrooms: vec![
                Classroom {
                    id: ClassroomId(1),
                    name: "Room 101".to_string(),
                    faculty: String::new(),
                    capacity: 40,
                    room_type: RoomType::Normal,
                },
                Classroom {
                    id: ClassroomId(2),
                    name: "Lab A".to_string(),
                    faculty: String::new(),
                    capacity: 25,
                    room_type: RoomType::ComputerSite,
                },
            ],
            timeslots: vec![
                timeslot(1, 0, "10:00"),
                timeslot(2, 0, "08:00"),
                timeslot(3, 1, "08:00"),
            ],
            courses: vec![Course {
                id: CourseId(10),
                name: "Intro".to_string(),
                required_room_type: RoomType::Normal,
                units,
                min_population: None,
                max_population: None,
            }],
            teachers: vec![
                Teacher {
                    id: TeacherId(100),
                    name: "Dr. Smith".to_string(),
                },
                Teacher {
                    id: TeacherId(101),
                    name: "Prof. Johnson".to_string(),
                },
            ],
            groups: vec![StudentGroup {
                id: GroupId(20),
                name: "CS-2024".to_string(),
                degree: Degree::Bachelor,
                population: 30,
                allowed_days: Some("0,1".to_string()),
            }],
            teacher_course_eligibility: vec![TeacherCourseLink {
                teacher_id: TeacherId(101),
                course_id: CourseId(10),
            }],
            teacher_availability: vec![],
            group_course_curriculum: vec![],
            project: None,
        }
    }

    #[test]
    fn unit_expansion_policy() {
        assert_eq!(expand_units(1), vec![PARITY_FREE]);
        assert_eq!(expand_units(2), vec![2]);
        assert_eq!(expand_units(3), vec![2, PARITY_FREE]);
        assert_eq!(expand_units(4), vec![2, 2]);
        assert_eq!(expand_units(5), vec![2, 2, PARITY_FREE]);
    }

    #[test]
    fn builds_one_gene_per_sub_lesson() {
        let tables = SolverTables::build(&base_input(3)).unwrap();
        assert_eq!(tables.num_genes(), 2);
        assert_eq!(tables.fixed_parities, vec![2, PARITY_FREE]);
        assert_eq!(tables.metas[0].lesson_id, LessonId(1));
        assert_eq!(tables.metas[1].lesson_id, LessonId(1));
    }

    #[test]
    fn valid_rooms_match_type_and_capacity() {
        let tables = SolverTables::build(&base_input(1)).unwrap();
        // Only the normal room, and only because it holds 30 students
        assert_eq!(tables.valid_rooms[0], vec![0]);
    }

    #[test]
    fn eligible_teacher_comes_from_links() {
        let tables = SolverTables::build(&base_input(1)).unwrap();
        assert_eq!(tables.valid_teachers[0], vec![1]);
    }

    #[test]
    fn prebound_teacher_is_a_singleton_domain() {
        let mut input = base_input(1);
        input.lessons[0].teacher_id = Some(TeacherId(100));
        let tables = SolverTables::build(&input).unwrap();
        assert_eq!(tables.valid_teachers[0], vec![0]);
    }

    #[test]
    fn no_eligibility_falls_back_to_all_teachers() {
        let mut input = base_input(1);
        input.teacher_course_eligibility.clear();
        let tables = SolverTables::build(&input).unwrap();
        assert_eq!(tables.valid_teachers[0], vec![0, 1]);
    }

    #[test]
    fn allowed_days_parsed_onto_genes() {
        let tables = SolverTables::build(&base_input(1)).unwrap();
        assert_eq!(tables.gene_allowed_days[0], Some(vec![0, 1]));
    }

    #[test]
    fn daily_ordinals_rank_by_start_time() {
        let tables = SolverTables::build(&base_input(1)).unwrap();
        // Day 0: 10:00 ranks after 08:00; day 1 restarts at 0
        assert_eq!(tables.timeslot_daily_ordinals, vec![1, 0, 0]);
    }

    #[test]
    fn unknown_course_is_an_error() {
        let mut input = base_input(1);
        input.lessons[0].course_id = CourseId(99);
        assert!(SolverTables::build(&input).is_err());
    }
}
