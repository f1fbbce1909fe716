use std::str::FromStr;

use chrono::NaiveDateTime;
use fitcoach_domain as domain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(thiserror::Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error(transparent)]
    Effort(#[from] domain::EffortError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error(transparent)]
    Equipment(#[from] domain::EquipmentError),
    #[error(transparent)]
    Profile(#[from] domain::ProfileError),
    #[error(transparent)]
    Level(#[from] log::ParseLevelError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlan {
    pub id: Uuid,
    pub plan: Plan,
    pub accepted: bool,
    pub created_at: NaiveDateTime,
}

impl From<&domain::StoredPlan> for StoredPlan {
    fn from(value: &domain::StoredPlan) -> Self {
        Self {
            id: *value.id,
            plan: Plan::from(&value.plan),
            accepted: value.accepted,
            created_at: value.created_at,
        }
    }
}

impl TryFrom<StoredPlan> for domain::StoredPlan {
    type Error = ConversionError;

    fn try_from(value: StoredPlan) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            plan: value.plan.try_into()?,
            accepted: value.accepted,
            created_at: value.created_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub weeks: Vec<Week>,
}

impl From<&domain::Plan> for Plan {
    fn from(value: &domain::Plan) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            weeks: value
                .weeks
                .iter()
                .map(|w| Week {
                    days: w.days.iter().map(Workout::from).collect(),
                })
                .collect(),
        }
    }
}

impl TryFrom<Plan> for domain::Plan {
    type Error = ConversionError;

    fn try_from(value: Plan) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: value.name,
            weeks: value
                .weeks
                .into_iter()
                .map(|w| {
                    Ok(domain::Week {
                        days: w
                            .days
                            .into_iter()
                            .map(domain::Workout::try_from)
                            .collect::<Result<_, _>>()?,
                    })
                })
                .collect::<Result<_, ConversionError>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<Workout>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: String,
    pub title: String,
    pub exercises: Vec<WorkoutExercise>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title.clone(),
            exercises: value
                .exercises
                .iter()
                .map(|e| WorkoutExercise {
                    exercise_id: e.exercise_id.to_string(),
                    sets: e
                        .sets
                        .iter()
                        .map(|s| SetTarget {
                            reps: s.reps.into(),
                            rpe: s.effort.into(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = ConversionError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            title: value.title,
            exercises: value
                .exercises
                .into_iter()
                .map(|e| {
                    Ok(domain::WorkoutExercise {
                        exercise_id: e.exercise_id.into(),
                        sets: e
                            .sets
                            .into_iter()
                            .map(|s| {
                                Ok(domain::SetTarget {
                                    reps: domain::Reps::new(s.reps)?,
                                    effort: domain::Effort::new(s.rpe)?,
                                })
                            })
                            .collect::<Result<_, ConversionError>>()?,
                    })
                })
                .collect::<Result<_, ConversionError>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub exercise_id: String,
    pub sets: Vec<SetTarget>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SetTarget {
    pub reps: u32,
    pub rpe: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub equipment: Vec<String>,
    pub schedule: u32,
    pub experience: String,
    pub goal: String,
    pub unit: String,
}

impl From<&domain::OnboardingProfile> for Profile {
    fn from(value: &domain::OnboardingProfile) -> Self {
        Self {
            name: value.name.to_string(),
            equipment: value.equipment.iter().map(ToString::to_string).collect(),
            schedule: value.schedule.days(),
            experience: value.experience.to_string(),
            goal: value.goal.to_string(),
            unit: value.unit.to_string(),
        }
    }
}

impl TryFrom<Profile> for domain::OnboardingProfile {
    type Error = ConversionError;

    fn try_from(value: Profile) -> Result<Self, Self::Error> {
        let equipment = value
            .equipment
            .iter()
            .map(|e| domain::Equipment::try_from(e.as_str()))
            .collect::<Result<_, _>>()?;
        Ok(domain::OnboardingProfile::new(
            &value.name,
            equipment,
            value.schedule,
            value.experience.as_str().into(),
            value.goal.as_str().into(),
            value.unit.as_str().into(),
        )?)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub workout_id: String,
    pub plan_id: Option<String>,
    pub entries: Vec<LogEntry>,
    pub created_at: NaiveDateTime,
}

impl From<&domain::WorkoutLog> for WorkoutLog {
    fn from(value: &domain::WorkoutLog) -> Self {
        Self {
            workout_id: value.workout_id.to_string(),
            plan_id: value.plan_id.as_ref().map(ToString::to_string),
            entries: value
                .entries
                .iter()
                .map(|e| LogEntry {
                    exercise_id: e.exercise_id.to_string(),
                    set: e.set,
                    weight: e.weight.into(),
                    reps: e.reps.into(),
                    rpe: e.effort.into(),
                    notes: e.notes.clone(),
                })
                .collect(),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<WorkoutLog> for domain::WorkoutLog {
    type Error = ConversionError;

    fn try_from(value: WorkoutLog) -> Result<Self, Self::Error> {
        Ok(Self {
            workout_id: value.workout_id.into(),
            plan_id: value.plan_id.map(domain::PlanID::from),
            entries: value
                .entries
                .into_iter()
                .map(|e| {
                    Ok(domain::LogEntry {
                        exercise_id: e.exercise_id.into(),
                        set: e.set,
                        weight: domain::Weight::new(e.weight)?,
                        reps: domain::Reps::new(e.reps)?,
                        effort: domain::Effort::new(e.rpe)?,
                        notes: e.notes,
                    })
                })
                .collect::<Result<_, ConversionError>>()?,
            created_at: value.created_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub exercise_id: String,
    pub set: u32,
    pub weight: f32,
    pub reps: u32,
    pub rpe: u8,
    #[serde(default)]
    pub notes: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub unit: String,
    pub show_effort: bool,
    pub plan_name: String,
}

impl From<&domain::Settings> for Settings {
    fn from(value: &domain::Settings) -> Self {
        Self {
            unit: value.unit.to_string(),
            show_effort: value.show_effort,
            plan_name: value.plan_name.clone(),
        }
    }
}

impl From<Settings> for domain::Settings {
    fn from(value: Settings) -> Self {
        Self {
            unit: value.unit.as_str().into(),
            show_effort: value.show_effort,
            plan_name: value.plan_name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl From<&domain::log::Entry> for Entry {
    fn from(value: &domain::log::Entry) -> Self {
        Self {
            time: value.time.clone(),
            level: value.level.to_string(),
            message: value.message.clone(),
        }
    }
}

impl TryFrom<Entry> for domain::log::Entry {
    type Error = ConversionError;

    fn try_from(value: Entry) -> Result<Self, Self::Error> {
        Ok(Self {
            time: value.time,
            level: log::Level::from_str(&value.level)?,
            message: value.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::tests::data;

    use super::*;

    #[test]
    fn test_stored_plan_try_from() {
        assert_eq!(
            domain::StoredPlan::try_from(StoredPlan::from(&*data::STORED_PLAN)).unwrap(),
            data::STORED_PLAN.clone()
        );
    }

    #[test]
    fn test_set_target_serde() {
        let workout = Workout::from(&data::PLAN.weeks[0].days[0]);
        let value = json!(workout.exercises[0]);
        assert_eq!(
            value,
            json!({
                "exerciseId": "db_squat",
                "sets": [
                    { "reps": 8, "rpe": 7 },
                    { "reps": 8, "rpe": 7 },
                    { "reps": 8, "rpe": 7 },
                ],
            })
        );
    }

    #[test]
    fn test_stored_plan_invalid_effort() {
        let mut plan = StoredPlan::from(&*data::STORED_PLAN);
        plan.plan.weeks[0].days[0].exercises[0].sets[0].rpe = 11;
        assert!(matches!(
            domain::StoredPlan::try_from(plan),
            Err(ConversionError::Effort(domain::EffortError::OutOfRange(11)))
        ));
    }

    #[test]
    fn test_profile_try_from() {
        assert_eq!(
            domain::OnboardingProfile::try_from(Profile::from(&*data::PROFILE)).unwrap(),
            data::PROFILE.clone()
        );
    }

    #[test]
    fn test_profile_serde() {
        let value = json!(Profile::from(&*data::PROFILE));
        assert_eq!(
            value,
            json!({
                "name": "Sam",
                "equipment": ["dumbbells", "bodyweight"],
                "schedule": 3,
                "experience": "novice",
                "goal": "fat-loss",
                "unit": "kg",
            })
        );
        let deserialized: Profile = serde_json::from_value(value).unwrap();
        assert_eq!(deserialized, Profile::from(&*data::PROFILE));
    }

    #[test]
    fn test_profile_unknown_equipment() {
        let mut profile = Profile::from(&*data::PROFILE);
        profile.equipment.push(String::from("kettlebell"));
        assert!(matches!(
            domain::OnboardingProfile::try_from(profile),
            Err(ConversionError::Equipment(_))
        ));
    }

    #[test]
    fn test_workout_log_try_from() {
        assert_eq!(
            domain::WorkoutLog::try_from(WorkoutLog::from(&*data::WORKOUT_LOG)).unwrap(),
            data::WORKOUT_LOG.clone()
        );
    }

    #[test]
    fn test_log_entry_without_notes() {
        let entry: LogEntry = serde_json::from_value(json!({
            "exerciseId": "pushup",
            "set": 1,
            "weight": 0.0,
            "reps": 10,
            "rpe": 7,
        }))
        .unwrap();
        assert_eq!(entry.notes, "");
    }

    #[test]
    fn test_settings_from() {
        let settings = domain::Settings {
            unit: domain::Unit::Lb,
            show_effort: false,
            plan_name: String::from("Block 1"),
        };
        assert_eq!(domain::Settings::from(Settings::from(&settings)), settings);
    }

    #[test]
    fn test_entry_try_from() {
        let entry = domain::log::Entry {
            time: String::from("Jan 01 00:00:00"),
            level: log::Level::Warn,
            message: String::from("offline"),
        };
        assert_eq!(
            domain::log::Entry::try_from(Entry::from(&entry)).unwrap(),
            entry
        );
    }
}
