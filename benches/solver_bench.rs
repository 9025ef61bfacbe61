use criterion::{criterion_group, criterion_main, Criterion};
use university_scheduler::solver::solve;
use university_scheduler::types::*;

/// A mid-sized synthetic term: 8 courses, 6 groups, 24 lessons.
fn synthetic_input() -> SolverInput {
    let classrooms = (1..=10)
        .map(|i| Classroom {
            id: ClassroomId(i),
            name: format!("Room {i}"),
            faculty: String::new(),
            capacity: if i % 3 == 0 { 30 } else { 60 },
            room_type: if i % 4 == 0 {
                RoomType::ComputerSite
            } else {
                RoomType::Normal
            },
        })
        .collect();

    let timeslots = (0..30)
        .map(|i| Timeslot {
            id: TimeslotId(i + 1),
            day_of_week: (i / 5) as u8,
            start_time: format!("{:02}:00", 8 + (i % 5) * 2),
            end_time: String::new(),
        })
        .collect();

    let courses = (1..=8)
        .map(|i| Course {
            id: CourseId(i),
            name: format!("Course {i}"),
            required_room_type: if i % 4 == 0 {
                RoomType::ComputerSite
            } else {
                RoomType::Normal
            },
            units: (i % 3 + 1) as u8,
            min_population: None,
            max_population: None,
        })
        .collect();

    let teachers = (1..=6)
        .map(|i| Teacher {
            id: TeacherId(i),
            name: format!("Teacher {i}"),
        })
        .collect();

    let groups = (1..=6)
        .map(|i| StudentGroup {
            id: GroupId(i),
            name: format!("Group {i}"),
            degree: Degree::Bachelor,
            population: 20 + i * 4,
            allowed_days: None,
        })
        .collect();

    let lessons = (0..24u32)
        .map(|i| Lesson {
            id: LessonId(i + 1),
            course_id: CourseId(i % 8 + 1),
            group_id: GroupId(i % 6 + 1),
            teacher_id: None,
            duration_slots: 1,
        })
        .collect();

    let teacher_course_eligibility = (1..=8u32)
        .flat_map(|c| {
            [(c - 1) % 6 + 1, c % 6 + 1].map(|t| TeacherCourseLink {
                teacher_id: TeacherId(t),
                course_id: CourseId(c),
            })
        })
        .collect();

    SolverInput {
        lessons,
        classrooms,
        timeslots,
        courses,
        teachers,
        groups,
        teacher_course_eligibility,
        teacher_availability: vec![],
        group_course_curriculum: vec![],
        project: None,
    }
}

fn bench_solver(c: &mut Criterion) {
    let input = synthetic_input();
    let weights = SoftWeights::default();

    c.bench_function("solve_50_generations", |b| {
        let params = SearchParams {
            population_size: 50,
            max_generations: 50,
            max_stagnant_generations: 50,
            seed: Some(1),
            ..SearchParams::default()
        };
        b.iter(|| solve(&input, &weights, &params).unwrap())
    });
}

criterion_group!(benches, bench_solver);
criterion_main!(benches);
