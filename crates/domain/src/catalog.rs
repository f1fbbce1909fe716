use std::collections::BTreeMap;

use crate::{Equipment, ExerciseID, MuscleGroup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    /// Owning any one of these is sufficient.
    pub equipment: &'static [Equipment],
    pub muscle_group: MuscleGroup,
    pub default_sets: u32,
    pub default_reps: u32,
}

impl Exercise {
    #[must_use]
    pub fn requires(&self, equipment: Equipment) -> bool {
        self.equipment.contains(&equipment)
    }

    #[must_use]
    pub fn is_bodyweight(&self) -> bool {
        self.requires(Equipment::Bodyweight)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Unknown exercise \"{0}\"")]
    NotFound(String),
}

pub(crate) static EXERCISES: std::sync::LazyLock<BTreeMap<&'static str, &'static Exercise>> =
    std::sync::LazyLock::new(|| CATALOG.iter().map(|e| (e.id, e)).collect());

/// Look up an exercise by its identifier.
///
/// Every identifier referenced by a generated plan is guaranteed to resolve.
/// Identifiers read back from stored plans may not, e.g. after an exercise
/// was removed from the catalog.
pub fn exercise(id: &ExerciseID) -> Result<&'static Exercise, CatalogError> {
    EXERCISES
        .get(id.as_str())
        .copied()
        .ok_or_else(|| CatalogError::NotFound(id.to_string()))
}

static CATALOG: [Exercise; 12] = [
    Exercise {
        id: "db_squat",
        name: "Dumbbell Squat",
        equipment: &[Equipment::Dumbbells],
        muscle_group: MuscleGroup::Legs,
        default_sets: 3,
        default_reps: 8,
    },
    Exercise {
        id: "db_press",
        name: "Dumbbell Bench Press",
        equipment: &[Equipment::Dumbbells],
        muscle_group: MuscleGroup::Chest,
        default_sets: 3,
        default_reps: 8,
    },
    Exercise {
        id: "db_row",
        name: "Dumbbell Row",
        equipment: &[Equipment::Dumbbells],
        muscle_group: MuscleGroup::Back,
        default_sets: 3,
        default_reps: 10,
    },
    Exercise {
        id: "plank",
        name: "Plank",
        equipment: &[Equipment::Bodyweight],
        muscle_group: MuscleGroup::Core,
        default_sets: 3,
        default_reps: 45,
    },
    Exercise {
        id: "bw_squat",
        name: "Bodyweight Squat",
        equipment: &[Equipment::Bodyweight],
        muscle_group: MuscleGroup::Legs,
        default_sets: 3,
        default_reps: 12,
    },
    Exercise {
        id: "pushup",
        name: "Push-up",
        equipment: &[Equipment::Bodyweight],
        muscle_group: MuscleGroup::Chest,
        default_sets: 3,
        default_reps: 10,
    },
    Exercise {
        id: "row_band",
        name: "Band Row",
        equipment: &[Equipment::Bands],
        muscle_group: MuscleGroup::Back,
        default_sets: 3,
        default_reps: 12,
    },
    Exercise {
        id: "ohp_db",
        name: "DB Overhead Press",
        equipment: &[Equipment::Dumbbells],
        muscle_group: MuscleGroup::Shoulders,
        default_sets: 3,
        default_reps: 8,
    },
    Exercise {
        id: "lat_pulldown",
        name: "Lat Pulldown (Gym)",
        equipment: &[Equipment::Gym],
        muscle_group: MuscleGroup::Back,
        default_sets: 3,
        default_reps: 10,
    },
    Exercise {
        id: "leg_press",
        name: "Leg Press (Gym)",
        equipment: &[Equipment::Gym],
        muscle_group: MuscleGroup::Legs,
        default_sets: 3,
        default_reps: 10,
    },
    Exercise {
        id: "bench",
        name: "Barbell Bench (Gym)",
        equipment: &[Equipment::Gym],
        muscle_group: MuscleGroup::Chest,
        default_sets: 3,
        default_reps: 5,
    },
    Exercise {
        id: "deadlift",
        name: "Deadlift (Gym)",
        equipment: &[Equipment::Gym],
        muscle_group: MuscleGroup::Posterior,
        default_sets: 3,
        default_reps: 5,
    },
];
