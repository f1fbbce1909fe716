use chrono::NaiveDateTime;
use derive_more::{Display, Into};

use crate::{
    Adherence, CreateError, Effort, ExerciseID, PlanID, ReadError, Reps, Workout, WorkoutID,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutLogService {
    async fn log_workout(&self, log: WorkoutLog) -> Result<WorkoutLog, CreateError>;
    async fn get_workout_logs(&self) -> Result<Vec<WorkoutLog>, ReadError>;
    /// Adherence to the first week of the accepted plan.
    async fn adherence(&self) -> Result<Adherence, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutLogRepository {
    async fn create_workout_log(&self, log: WorkoutLog) -> Result<WorkoutLog, CreateError>;
    /// Newest first.
    async fn read_workout_logs(&self) -> Result<Vec<WorkoutLog>, ReadError>;
}

/// Sets actually performed for one workout occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub workout_id: WorkoutID,
    pub plan_id: Option<PlanID>,
    pub entries: Vec<LogEntry>,
    pub created_at: NaiveDateTime,
}

impl WorkoutLog {
    /// A log with one entry per target set, ready to be adjusted.
    #[must_use]
    pub fn prefill(workout: &Workout, plan_id: Option<PlanID>, created_at: NaiveDateTime) -> Self {
        Self {
            workout_id: workout.id.clone(),
            plan_id,
            entries: workout
                .exercises
                .iter()
                .flat_map(|e| {
                    e.sets.iter().zip(1..).map(|(s, set)| LogEntry {
                        exercise_id: e.exercise_id.clone(),
                        set,
                        weight: Weight::default(),
                        reps: s.reps,
                        effort: s.effort,
                        notes: String::new(),
                    })
                })
                .collect(),
            created_at,
        }
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.entries.len()
    }

    /// Sum of reps times weight over all entries.
    #[must_use]
    pub fn volume_load(&self) -> f32 {
        self.entries.iter().map(LogEntry::volume_load).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub exercise_id: ExerciseID,
    /// Set number within the exercise, starting at 1.
    pub set: u32,
    pub weight: Weight,
    pub reps: Reps,
    pub effort: Effort,
    pub notes: String,
}

impl LogEntry {
    #[must_use]
    pub fn volume_load(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let reps = u32::from(self.reps) as f32;
        reps * f32::from(self.weight)
    }
}

/// Load in the unit chosen by the user.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}
