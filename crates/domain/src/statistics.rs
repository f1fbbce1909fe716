use std::cmp::min;

use crate::{Plan, WorkoutLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adherence {
    pub scheduled: u32,
    pub completed: u32,
}

impl Adherence {
    /// Share of scheduled workouts completed, capped at 1.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        if self.scheduled == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.completed as f32 / self.scheduled as f32;
        ratio.min(1.0)
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.ratio() * 100.0).round() as u32;
        percent
    }
}

/// Adherence to the first week of a plan.
///
/// Every log of a first-week occurrence counts as completed, so logging the
/// same occurrence twice counts twice.
#[must_use]
pub fn adherence(plan: Option<&Plan>, schedule: u32, logs: &[WorkoutLog]) -> Adherence {
    let Some(plan) = plan else {
        return Adherence {
            scheduled: 0,
            completed: 0,
        };
    };

    let days = u32::try_from(plan.first_week_len()).unwrap_or(u32::MAX);
    let ids = plan.first_week_ids();
    let completed = logs.iter().filter(|l| ids.contains(&l.workout_id)).count();

    Adherence {
        scheduled: min(days, schedule),
        completed: u32::try_from(completed).unwrap_or(u32::MAX),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingStats {
    pub workouts: usize,
    pub sets: usize,
    pub volume_load: f32,
}

#[must_use]
pub fn training_stats(logs: &[WorkoutLog]) -> TrainingStats {
    TrainingStats {
        workouts: logs.len(),
        sets: logs.iter().map(WorkoutLog::num_sets).sum(),
        volume_load: logs.iter().map(WorkoutLog::volume_load).sum(),
    }
}
