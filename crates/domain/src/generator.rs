//! Deterministic two-week plan generation.
//!
//! A plan is assembled from fixed day templates. The first week is the base
//! week, the second week applies one progression step to the first exercise
//! of every workout.

use std::{cmp::min, collections::BTreeSet, fmt};

use log::debug;

use crate::{
    Effort, Equipment, IdAllocator, OnboardingProfile, Plan, PlanID, Reps, SetTarget, Week,
    Workout, WorkoutExercise, WorkoutID, catalog,
};

pub const DEFAULT_PLAN_NAME: &str = "2-week baseline";

const MIN_DAYS: u32 = 3;
const MAX_DAYS: u32 = 4;

const BODYWEIGHT_REP_INCREMENT: u32 = 2;
const EFFORT_INCREMENT: u8 = 0;
const EFFORT_CAP: Effort = Effort::EIGHT;

/// The part of an onboarding profile the generator looks at.
///
/// `schedule` is a raw day count, values outside 1 to 7 are accepted.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorInput<'a> {
    pub equipment: &'a BTreeSet<Equipment>,
    pub schedule: u32,
}

impl<'a> From<&'a OnboardingProfile> for GeneratorInput<'a> {
    fn from(value: &'a OnboardingProfile) -> Self {
        Self {
            equipment: &value.equipment,
            schedule: value.schedule.days(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    FullBody3d,
    UpperLower4d,
}

impl Template {
    /// Full body is chosen if and only if no gym equipment is owned and at
    /// most three days per week are wanted.
    #[must_use]
    pub fn select(equipment: &BTreeSet<Equipment>, schedule: u32) -> Self {
        let minimal_equipment = equipment.iter().all(|e| e.is_minimal());
        if minimal_equipment && schedule <= MIN_DAYS {
            Template::FullBody3d
        } else {
            Template::UpperLower4d
        }
    }

    #[must_use]
    pub fn days(self) -> &'static [Day] {
        match self {
            Template::FullBody3d => &[Day::FullBodyA, Day::FullBodyB, Day::FullBodyA],
            Template::UpperLower4d => &[Day::Upper, Day::Lower, Day::Upper, Day::Lower],
        }
    }

    /// Days of the template used for the given schedule.
    ///
    /// A week always has three or four days, regardless of the schedule.
    #[must_use]
    pub fn days_for(self, schedule: u32) -> &'static [Day] {
        let days = self.days();
        let count = schedule.clamp(MIN_DAYS, MAX_DAYS) as usize;
        &days[..min(count, days.len())]
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Template::FullBody3d => "full_body_3d",
                Template::UpperLower4d => "upper_lower_4d",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    FullBodyA,
    FullBodyB,
    Upper,
    Lower,
}

impl Day {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Day::FullBodyA => "Full Body A",
            Day::FullBodyB => "Full Body B",
            Day::Upper => "Upper",
            Day::Lower => "Lower",
        }
    }

    fn slots(self) -> &'static [Slot] {
        match self {
            Day::FullBodyA => &FULL_BODY_A,
            Day::FullBodyB => &FULL_BODY_B,
            Day::Upper => &UPPER,
            Day::Lower => &LOWER,
        }
    }
}

/// Prescription of one exercise within a day, identical for every set.
struct Slot {
    exercise_id: &'static str,
    sets: u32,
    reps: Reps,
    effort: Effort,
}

const fn slot(exercise_id: &'static str, sets: u32, reps: u32, effort: u8) -> Slot {
    Slot {
        exercise_id,
        sets,
        reps: Reps(reps),
        effort: Effort(effort),
    }
}

static FULL_BODY_A: [Slot; 4] = [
    slot("db_squat", 3, 8, 7),
    slot("db_press", 3, 8, 7),
    slot("db_row", 3, 10, 7),
    slot("plank", 3, 45, 6),
];

static FULL_BODY_B: [Slot; 4] = [
    slot("bw_squat", 3, 12, 6),
    slot("ohp_db", 3, 8, 7),
    slot("row_band", 3, 12, 7),
    slot("plank", 3, 45, 6),
];

static UPPER: [Slot; 4] = [
    slot("bench", 3, 5, 7),
    slot("lat_pulldown", 3, 10, 7),
    slot("ohp_db", 3, 8, 7),
    slot("plank", 3, 45, 6),
];

static LOWER: [Slot; 4] = [
    slot("leg_press", 3, 10, 7),
    slot("deadlift", 3, 5, 7),
    slot("bw_squat", 3, 12, 6),
    slot("plank", 3, 45, 6),
];

/// Generate a plan named [`DEFAULT_PLAN_NAME`].
pub fn generate(input: GeneratorInput, ids: &impl IdAllocator) -> Plan {
    generate_named(input, ids, DEFAULT_PLAN_NAME)
}

/// Generate a two-week plan.
///
/// Identifiers are drawn from `ids` in this order: the workouts of the first
/// week, the workouts of the second week, the plan. Equal inputs and equal
/// allocator states therefore yield equal plans.
pub fn generate_named(input: GeneratorInput, ids: &impl IdAllocator, name: &str) -> Plan {
    let template = Template::select(input.equipment, input.schedule);
    let days = template.days_for(input.schedule);

    debug!(
        "generating {template} plan with {} days per week for schedule {}",
        days.len(),
        input.schedule
    );

    let first_week = days
        .iter()
        .map(|day| build_day(*day, ids))
        .collect::<Vec<_>>();
    let second_week = first_week
        .iter()
        .map(|workout| progress(workout, ids))
        .collect::<Vec<_>>();

    Plan {
        id: PlanID::allocate(ids),
        name: name.to_string(),
        weeks: vec![Week { days: first_week }, Week { days: second_week }],
    }
}

fn build_day(day: Day, ids: &impl IdAllocator) -> Workout {
    Workout {
        id: WorkoutID::allocate(ids),
        title: day.title().to_string(),
        exercises: day
            .slots()
            .iter()
            .map(|s| WorkoutExercise {
                exercise_id: s.exercise_id.into(),
                sets: SetTarget {
                    reps: s.reps,
                    effort: s.effort,
                }
                .repeat(s.sets),
            })
            .collect(),
    }
}

/// Derive the next week's occurrence of a workout.
///
/// Only the first exercise changes. The result always gets a new id.
pub fn progress(workout: &Workout, ids: &impl IdAllocator) -> Workout {
    Workout {
        id: WorkoutID::allocate(ids),
        title: workout.title.clone(),
        exercises: workout
            .exercises
            .iter()
            .enumerate()
            .map(|(i, e)| if i == 0 { progress_primary(e) } else { e.clone() })
            .collect(),
    }
}

/// Bodyweight movements get two more reps on the first set, weighted
/// movements get an additional set equal to the first one.
fn progress_primary(exercise: &WorkoutExercise) -> WorkoutExercise {
    let Some(first) = exercise.sets.first().copied() else {
        return exercise.clone();
    };

    let bodyweight = catalog::exercise(&exercise.exercise_id)
        .map(catalog::Exercise::is_bodyweight)
        .unwrap_or(false);

    let sets = if bodyweight {
        exercise
            .sets
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i == 0 {
                    SetTarget {
                        reps: s.reps + BODYWEIGHT_REP_INCREMENT,
                        ..*s
                    }
                } else {
                    *s
                }
            })
            .collect()
    } else {
        let mut sets = exercise.sets.clone();
        sets.push(SetTarget {
            reps: first.reps,
            effort: min(EFFORT_CAP, first.effort + EFFORT_INCREMENT),
        });
        sets
    };

    WorkoutExercise {
        exercise_id: exercise.exercise_id.clone(),
        sets,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::SequentialIds;

    use super::*;

    fn target(reps: u32, effort: u8) -> SetTarget {
        SetTarget {
            reps: Reps(reps),
            effort: Effort(effort),
        }
    }

    fn exercise(id: &str, sets: Vec<SetTarget>) -> WorkoutExercise {
        WorkoutExercise {
            exercise_id: id.into(),
            sets,
        }
    }

    fn equipment(tags: &[Equipment]) -> BTreeSet<Equipment> {
        tags.iter().copied().collect()
    }

    fn titles(week: &Week) -> Vec<&str> {
        week.days.iter().map(|d| d.title.as_str()).collect()
    }

    #[rstest]
    #[case(&[Equipment::Bodyweight], 1, Template::FullBody3d)]
    #[case(&[Equipment::Dumbbells, Equipment::Bodyweight], 3, Template::FullBody3d)]
    #[case(&[Equipment::Dumbbells, Equipment::Bands, Equipment::Bodyweight], 2, Template::FullBody3d)]
    #[case(&[Equipment::Bands], 0, Template::FullBody3d)]
    #[case(&[Equipment::Dumbbells], 4, Template::UpperLower4d)]
    #[case(&[Equipment::Bodyweight], 7, Template::UpperLower4d)]
    #[case(&[Equipment::Gym], 3, Template::UpperLower4d)]
    #[case(&[Equipment::Gym, Equipment::Dumbbells], 1, Template::UpperLower4d)]
    #[case(&[], 3, Template::FullBody3d)]
    fn test_template_select(
        #[case] tags: &[Equipment],
        #[case] schedule: u32,
        #[case] expected: Template,
    ) {
        assert_eq!(Template::select(&equipment(tags), schedule), expected);
    }

    #[rstest]
    #[case(Template::FullBody3d, 0, &[Day::FullBodyA, Day::FullBodyB, Day::FullBodyA])]
    #[case(Template::FullBody3d, 3, &[Day::FullBodyA, Day::FullBodyB, Day::FullBodyA])]
    #[case(Template::UpperLower4d, 1, &[Day::Upper, Day::Lower, Day::Upper])]
    #[case(Template::UpperLower4d, 3, &[Day::Upper, Day::Lower, Day::Upper])]
    #[case(Template::UpperLower4d, 4, &[Day::Upper, Day::Lower, Day::Upper, Day::Lower])]
    #[case(Template::UpperLower4d, 7, &[Day::Upper, Day::Lower, Day::Upper, Day::Lower])]
    #[case(Template::UpperLower4d, u32::MAX, &[Day::Upper, Day::Lower, Day::Upper, Day::Lower])]
    fn test_template_days_for(
        #[case] template: Template,
        #[case] schedule: u32,
        #[case] expected: &[Day],
    ) {
        assert_eq!(template.days_for(schedule), expected);
    }

    #[test]
    fn test_template_display() {
        assert_eq!(Template::FullBody3d.to_string(), "full_body_3d");
        assert_eq!(Template::UpperLower4d.to_string(), "upper_lower_4d");
    }

    #[test]
    fn test_generate_full_body() {
        let ids = SequentialIds::new();
        let plan = generate(
            GeneratorInput {
                equipment: &equipment(&[Equipment::Dumbbells, Equipment::Bodyweight]),
                schedule: 3,
            },
            &ids,
        );

        assert_eq!(plan.id, PlanID::from("plan_7"));
        assert_eq!(plan.name, DEFAULT_PLAN_NAME);
        assert_eq!(plan.weeks.len(), 2);
        assert_eq!(
            titles(&plan.weeks[0]),
            vec!["Full Body A", "Full Body B", "Full Body A"]
        );
        assert_eq!(
            plan.weeks[0].days[0],
            Workout {
                id: "wo_1".into(),
                title: "Full Body A".to_string(),
                exercises: vec![
                    exercise("db_squat", target(8, 7).repeat(3)),
                    exercise("db_press", target(8, 7).repeat(3)),
                    exercise("db_row", target(10, 7).repeat(3)),
                    exercise("plank", target(45, 6).repeat(3)),
                ],
            }
        );
        assert_eq!(
            plan.weeks[0].days[1].exercises,
            vec![
                exercise("bw_squat", target(12, 6).repeat(3)),
                exercise("ohp_db", target(8, 7).repeat(3)),
                exercise("row_band", target(12, 7).repeat(3)),
                exercise("plank", target(45, 6).repeat(3)),
            ]
        );
        assert_eq!(
            plan.workouts().map(|w| w.id.as_str()).collect::<Vec<_>>(),
            vec!["wo_1", "wo_2", "wo_3", "wo_4", "wo_5", "wo_6"]
        );
    }

    #[rstest]
    #[case(&[Equipment::Gym], 1, 3)]
    #[case(&[Equipment::Gym], 3, 3)]
    #[case(&[Equipment::Gym], 4, 4)]
    #[case(&[Equipment::Dumbbells], 5, 4)]
    #[case(&[Equipment::Bodyweight, Equipment::Gym], 7, 4)]
    fn test_generate_upper_lower(
        #[case] tags: &[Equipment],
        #[case] schedule: u32,
        #[case] expected_days: usize,
    ) {
        let plan = generate(
            GeneratorInput {
                equipment: &equipment(tags),
                schedule,
            },
            &SequentialIds::new(),
        );

        let expected_titles = ["Upper", "Lower", "Upper", "Lower"][..expected_days].to_vec();
        assert_eq!(titles(&plan.weeks[0]), expected_titles);
        assert_eq!(titles(&plan.weeks[1]), expected_titles);
        assert_eq!(
            plan.weeks[0].days[0].exercises,
            vec![
                exercise("bench", target(5, 7).repeat(3)),
                exercise("lat_pulldown", target(10, 7).repeat(3)),
                exercise("ohp_db", target(8, 7).repeat(3)),
                exercise("plank", target(45, 6).repeat(3)),
            ]
        );
        assert_eq!(
            plan.weeks[0].days[1].exercises,
            vec![
                exercise("leg_press", target(10, 7).repeat(3)),
                exercise("deadlift", target(5, 7).repeat(3)),
                exercise("bw_squat", target(12, 6).repeat(3)),
                exercise("plank", target(45, 6).repeat(3)),
            ]
        );
    }

    #[rstest]
    #[case(&[Equipment::Bodyweight], 1)]
    #[case(&[Equipment::Dumbbells, Equipment::Bands], 3)]
    #[case(&[Equipment::Gym], 2)]
    #[case(&[Equipment::Gym], 4)]
    #[case(&[Equipment::Dumbbells], 6)]
    fn test_generate_invariants(#[case] tags: &[Equipment], #[case] schedule: u32) {
        let plan = generate(
            GeneratorInput {
                equipment: &equipment(tags),
                schedule,
            },
            &SequentialIds::new(),
        );

        let ids = plan.workouts().map(|w| &w.id).collect::<HashSet<_>>();
        assert_eq!(ids.len(), plan.workouts().count());

        for id in plan.exercises() {
            assert!(catalog::exercise(id).is_ok(), "unknown exercise {id}");
        }

        let [first_week, second_week] = &plan.weeks[..] else {
            panic!("expected two weeks");
        };
        assert_eq!(first_week.days.len(), second_week.days.len());
        for (base, progressed) in first_week.days.iter().zip(&second_week.days) {
            assert_ne!(base.id, progressed.id);
            assert_eq!(base.title, progressed.title);
            assert_eq!(&base.exercises[1..], &progressed.exercises[1..]);
            assert_eq!(
                base.exercises[0].exercise_id,
                progressed.exercises[0].exercise_id
            );
            assert_ne!(base.exercises[0].sets, progressed.exercises[0].sets);
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let ids = SequentialIds::new();
        let owned = equipment(&[Equipment::Gym]);
        let input = GeneratorInput {
            equipment: &owned,
            schedule: 4,
        };

        let first = generate(input, &ids);
        let second = generate(input, &ids);
        assert_ne!(first, second);
        assert_eq!(second.id, PlanID::from("plan_18"));

        ids.reset();
        assert_eq!(generate(input, &ids), first);
    }

    #[test]
    fn test_generate_named() {
        let plan = generate_named(
            GeneratorInput {
                equipment: &equipment(&[Equipment::Bands]),
                schedule: 2,
            },
            &SequentialIds::starting_at(100),
            "Home block",
        );
        assert_eq!(plan.name, "Home block");
        assert_eq!(plan.weeks[0].days[0].id, WorkoutID::from("wo_100"));
        assert_eq!(plan.id, PlanID::from("plan_106"));
    }

    #[test]
    fn test_generate_from_profile() {
        let profile = OnboardingProfile::new(
            "Sam",
            BTreeSet::from([Equipment::Dumbbells, Equipment::Bodyweight]),
            3,
            crate::Experience::Novice,
            crate::Goal::Strength,
            crate::Unit::Kg,
        )
        .unwrap();
        let plan = generate((&profile).into(), &SequentialIds::new());
        assert_eq!(
            titles(&plan.weeks[0]),
            vec!["Full Body A", "Full Body B", "Full Body A"]
        );
    }

    #[test]
    fn test_progress_bodyweight() {
        let workout = Workout {
            id: "wo_1".into(),
            title: "Full Body B".to_string(),
            exercises: vec![
                exercise("bw_squat", target(12, 6).repeat(3)),
                exercise("pushup", target(10, 6).repeat(3)),
            ],
        };
        assert_eq!(
            progress(&workout, &SequentialIds::starting_at(9)),
            Workout {
                id: "wo_9".into(),
                title: "Full Body B".to_string(),
                exercises: vec![
                    exercise(
                        "bw_squat",
                        vec![target(14, 6), target(12, 6), target(12, 6)]
                    ),
                    exercise("pushup", target(10, 6).repeat(3)),
                ],
            }
        );
    }

    #[test]
    fn test_progress_weighted() {
        let workout = Workout {
            id: "wo_1".into(),
            title: "Full Body A".to_string(),
            exercises: vec![
                exercise("db_squat", target(8, 7).repeat(3)),
                exercise("plank", target(45, 6).repeat(3)),
            ],
        };
        assert_eq!(
            progress(&workout, &SequentialIds::new()).exercises,
            vec![
                exercise("db_squat", target(8, 7).repeat(4)),
                exercise("plank", target(45, 6).repeat(3)),
            ]
        );
    }

    #[rstest]
    #[case(target(5, 7), target(5, 7))]
    #[case(target(5, 8), target(5, 8))]
    #[case(target(5, 9), target(5, 8))]
    #[case(target(5, 10), target(5, 8))]
    fn test_progress_weighted_effort_cap(#[case] first: SetTarget, #[case] added: SetTarget) {
        let progressed = progress_primary(&exercise("deadlift", vec![first, target(5, 6)]));
        assert_eq!(progressed.sets, vec![first, target(5, 6), added]);
    }

    #[test]
    fn test_progress_unknown_exercise() {
        assert_eq!(
            progress_primary(&exercise("sled_push", target(20, 8).repeat(2))),
            exercise("sled_push", target(20, 8).repeat(3))
        );
    }

    #[test]
    fn test_progress_empty() {
        assert_eq!(
            progress_primary(&exercise("plank", vec![])),
            exercise("plank", vec![])
        );
        let workout = Workout {
            id: "wo_1".into(),
            title: String::new(),
            exercises: vec![],
        };
        assert!(
            progress(&workout, &SequentialIds::new())
                .exercises
                .is_empty()
        );
    }
}
