use std::{collections::BTreeSet, fmt, ops::Add};

use chrono::NaiveDateTime;
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, ExerciseID, IdAllocator, OnboardingProfile, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait PlanService {
    async fn generate_plan(&self, profile: &OnboardingProfile) -> Plan;
    async fn save_plan(&self, plan: Plan) -> Result<StoredPlan, CreateError>;
    async fn get_plans(&self) -> Result<Vec<StoredPlan>, ReadError>;
    async fn get_plan(&self, id: StoredPlanID) -> Result<StoredPlan, ReadError>;
    async fn accept_plan(&self, id: StoredPlanID) -> Result<StoredPlan, UpdateError>;

    /// The most recently accepted plan, if any.
    async fn get_accepted_plan(&self) -> Result<Option<StoredPlan>, ReadError> {
        Ok(self.get_plans().await?.into_iter().find(|p| p.accepted))
    }
}

#[allow(async_fn_in_trait)]
pub trait PlanRepository {
    async fn create_plan(&self, plan: Plan) -> Result<StoredPlan, CreateError>;
    /// Newest first.
    async fn read_plans(&self) -> Result<Vec<StoredPlan>, ReadError>;
    async fn read_plan(&self, id: StoredPlanID) -> Result<StoredPlan, ReadError>;
    async fn accept_plan(&self, id: StoredPlanID) -> Result<StoredPlan, UpdateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub id: PlanID,
    pub name: String,
    pub weeks: Vec<Week>,
}

impl Plan {
    pub fn workouts(&self) -> impl Iterator<Item = &Workout> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    #[must_use]
    pub fn workout(&self, id: &WorkoutID) -> Option<&Workout> {
        self.workouts().find(|w| w.id == *id)
    }

    /// Occurrence ids of the base week.
    #[must_use]
    pub fn first_week_ids(&self) -> BTreeSet<&WorkoutID> {
        self.weeks
            .first()
            .map(|w| w.days.iter().map(|d| &d.id).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn first_week_len(&self) -> usize {
        self.weeks.first().map_or(0, |w| w.days.len())
    }

    #[must_use]
    pub fn exercises(&self) -> BTreeSet<&ExerciseID> {
        self.workouts().flat_map(Workout::exercises).collect()
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.workouts().map(Workout::num_sets).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Week {
    pub days: Vec<Workout>,
}

/// One concrete session of a plan.
///
/// Each occurrence has its own id, even if it shares its content with other
/// occurrences of the same plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub id: WorkoutID,
    pub title: String,
    pub exercises: Vec<WorkoutExercise>,
}

impl Workout {
    pub fn exercises(&self) -> impl Iterator<Item = &ExerciseID> {
        self.exercises.iter().map(|e| &e.exercise_id)
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutExercise {
    pub exercise_id: ExerciseID,
    pub sets: Vec<SetTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTarget {
    pub reps: Reps,
    pub effort: Effort,
}

impl SetTarget {
    #[must_use]
    pub fn repeat(self, count: u32) -> Vec<SetTarget> {
        (0..count).map(|_| self).collect()
    }
}

#[derive(Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl WorkoutID {
    pub fn allocate(ids: &impl IdAllocator) -> Self {
        Self(format!("wo_{}", ids.next_id()))
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanID(String);

impl PlanID {
    pub fn allocate(ids: &impl IdAllocator) -> Self {
        Self(format!("plan_{}", ids.next_id()))
    }
}

impl From<&str> for PlanID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlanID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A plan as kept by a persistence store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPlan {
    pub id: StoredPlanID,
    pub plan: Plan,
    pub accepted: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoredPlanID(Uuid);

impl StoredPlanID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for StoredPlanID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for StoredPlanID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reps(pub(crate) u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl Add<u32> for Reps {
    type Output = Reps;

    fn add(self, rhs: u32) -> Self::Output {
        Reps(self.0.saturating_add(rhs))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Target exertion on a 1 to 10 scale (RPE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Effort(pub(crate) u8);

impl Effort {
    pub const ONE: Effort = Effort(1);
    pub const SIX: Effort = Effort(6);
    pub const SEVEN: Effort = Effort(7);
    pub const EIGHT: Effort = Effort(8);
    pub const TEN: Effort = Effort(10);

    pub fn new(value: u8) -> Result<Self, EffortError> {
        if !(1..=10).contains(&value) {
            return Err(EffortError::OutOfRange(value));
        }

        Ok(Self(value))
    }
}

impl Add<u8> for Effort {
    type Output = Effort;

    fn add(self, rhs: u8) -> Self::Output {
        Effort(self.0.saturating_add(rhs).min(Effort::TEN.0))
    }
}

impl From<Effort> for u8 {
    fn from(value: Effort) -> Self {
        value.0
    }
}

impl TryFrom<&str> for Effort {
    type Error = EffortError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u8>() {
            Ok(parsed_value) => Effort::new(parsed_value),
            Err(_) => Err(EffortError::ParseError),
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EffortError {
    #[error("Effort must be in the range 1 to 10 ({0})")]
    OutOfRange(u8),
    #[error("Effort must be an integer")]
    ParseError,
}
