use std::{collections::BTreeSet, fmt};

use derive_more::Into;

use crate::{Equipment, Name, NameError, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self) -> Result<Option<OnboardingProfile>, ReadError>;
    async fn set_profile(
        &self,
        profile: OnboardingProfile,
    ) -> Result<OnboardingProfile, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self) -> Result<Option<OnboardingProfile>, ReadError>;
    /// Insert or replace.
    async fn write_profile(
        &self,
        profile: OnboardingProfile,
    ) -> Result<OnboardingProfile, UpdateError>;
}

/// Answers collected during onboarding.
///
/// Only `equipment` and `schedule` influence plan generation. The remaining
/// fields are kept for display and for the coach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingProfile {
    pub name: Name,
    pub equipment: BTreeSet<Equipment>,
    pub schedule: Schedule,
    pub experience: Experience,
    pub goal: Goal,
    pub unit: Unit,
}

impl OnboardingProfile {
    pub fn new(
        name: &str,
        equipment: BTreeSet<Equipment>,
        schedule: u32,
        experience: Experience,
        goal: Goal,
        unit: Unit,
    ) -> Result<Self, ProfileError> {
        let name = Name::new(name)?;

        if equipment.is_empty() {
            return Err(ProfileError::NoEquipment);
        }

        Ok(Self {
            name,
            equipment,
            schedule: Schedule::new(schedule)?,
            experience,
            goal,
            unit,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProfileError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("At least one piece of equipment must be selected")]
    NoEquipment,
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Desired training days per week.
#[derive(Debug, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Schedule(u32);

impl Schedule {
    pub fn new(days: u32) -> Result<Self, ScheduleError> {
        if !(1..=7).contains(&days) {
            return Err(ScheduleError::OutOfRange(days));
        }

        Ok(Self(days))
    }

    #[must_use]
    pub fn days(self) -> u32 {
        self.0
    }
}

impl TryFrom<&str> for Schedule {
    type Error = ScheduleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Schedule::new(parsed_value),
            Err(_) => Err(ScheduleError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("Schedule must be between 1 and 7 days per week ({0})")]
    OutOfRange(u32),
    #[error("Schedule must be an integer")]
    ParseError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experience {
    Novice,
    Intermediate,
    Advanced,
}

impl From<&str> for Experience {
    fn from(value: &str) -> Self {
        match value {
            "intermediate" => Experience::Intermediate,
            "advanced" => Experience::Advanced,
            _ => Experience::Novice,
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Experience::Novice => "novice",
                Experience::Intermediate => "intermediate",
                Experience::Advanced => "advanced",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Strength,
    FatLoss,
    General,
}

impl From<&str> for Goal {
    fn from(value: &str) -> Self {
        match value {
            "strength" => Goal::Strength,
            "fat-loss" => Goal::FatLoss,
            _ => Goal::General,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Goal::Strength => "strength",
                Goal::FatLoss => "fat-loss",
                Goal::General => "general",
            }
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    #[default]
    Kg,
    Lb,
}

impl From<&str> for Unit {
    fn from(value: &str) -> Self {
        match value {
            "lb" => Unit::Lb,
            _ => Unit::Kg,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Unit::Kg => "kg",
                Unit::Lb => "lb",
            }
        )
    }
}
