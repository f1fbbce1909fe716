use std::{fmt, slice::Iter};

use derive_more::{Deref, Display};

#[derive(Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(String);

impl ExerciseID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ExerciseID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Equipment {
    Dumbbells,
    Bands,
    Bodyweight,
    Gym,
}

impl Equipment {
    pub fn iter() -> Iter<'static, Equipment> {
        static EQUIPMENT: [Equipment; 4] = [
            Equipment::Dumbbells,
            Equipment::Bands,
            Equipment::Bodyweight,
            Equipment::Gym,
        ];
        EQUIPMENT.iter()
    }

    /// Equipment a person can own without access to a gym.
    #[must_use]
    pub fn is_minimal(self) -> bool {
        matches!(
            self,
            Equipment::Dumbbells | Equipment::Bands | Equipment::Bodyweight
        )
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Equipment::Dumbbells => "dumbbells",
            Equipment::Bands => "bands",
            Equipment::Bodyweight => "bodyweight",
            Equipment::Gym => "gym",
        }
    }
}

impl TryFrom<&str> for Equipment {
    type Error = EquipmentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Equipment::iter()
            .find(|e| e.tag() == value)
            .copied()
            .ok_or_else(|| EquipmentError::Unknown(value.to_string()))
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EquipmentError {
    #[error("Unknown equipment \"{0}\"")]
    Unknown(String),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MuscleGroup {
    Legs,
    Chest,
    Back,
    Shoulders,
    Core,
    Posterior,
}
