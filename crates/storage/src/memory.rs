use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

use chrono::Local;
use fitcoach_domain::{self as domain, log};

/// Storage that lives as long as the process.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    plans: Vec<domain::StoredPlan>,
    workout_logs: Vec<domain::WorkoutLog>,
    profile: Option<domain::OnboardingProfile>,
    settings: Option<domain::Settings>,
    log: VecDeque<log::Entry>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, domain::StorageError> {
        self.state
            .lock()
            .map_err(|_| domain::StorageError::Other("storage lock poisoned".into()))
    }
}

impl domain::PlanRepository for MemoryStorage {
    async fn create_plan(
        &self,
        plan: domain::Plan,
    ) -> Result<domain::StoredPlan, domain::CreateError> {
        let mut state = self.lock()?;
        if state.plans.iter().any(|p| p.plan.id == plan.id) {
            return Err(domain::CreateError::Conflict);
        }
        let stored = domain::StoredPlan {
            id: domain::StoredPlanID::random(),
            plan,
            accepted: false,
            created_at: Local::now().naive_local(),
        };
        state.plans.push(stored.clone());
        Ok(stored)
    }

    async fn read_plans(&self) -> Result<Vec<domain::StoredPlan>, domain::ReadError> {
        Ok(self.lock()?.plans.iter().rev().cloned().collect())
    }

    async fn read_plan(
        &self,
        id: domain::StoredPlanID,
    ) -> Result<domain::StoredPlan, domain::ReadError> {
        self.lock()?
            .plans
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)
    }

    async fn accept_plan(
        &self,
        id: domain::StoredPlanID,
    ) -> Result<domain::StoredPlan, domain::UpdateError> {
        let mut state = self.lock()?;
        let plan = state
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(domain::UpdateError::NotFound)?;
        plan.accepted = true;
        Ok(plan.clone())
    }
}

impl domain::WorkoutLogRepository for MemoryStorage {
    async fn create_workout_log(
        &self,
        log: domain::WorkoutLog,
    ) -> Result<domain::WorkoutLog, domain::CreateError> {
        self.lock()?.workout_logs.push(log.clone());
        Ok(log)
    }

    async fn read_workout_logs(&self) -> Result<Vec<domain::WorkoutLog>, domain::ReadError> {
        Ok(self.lock()?.workout_logs.iter().rev().cloned().collect())
    }
}

impl domain::ProfileRepository for MemoryStorage {
    async fn read_profile(&self) -> Result<Option<domain::OnboardingProfile>, domain::ReadError> {
        Ok(self.lock()?.profile.clone())
    }

    async fn write_profile(
        &self,
        profile: domain::OnboardingProfile,
    ) -> Result<domain::OnboardingProfile, domain::UpdateError> {
        self.lock()?.profile = Some(profile.clone());
        Ok(profile)
    }
}

impl domain::SettingsRepository for MemoryStorage {
    async fn read_settings(&self) -> Result<domain::Settings, domain::ReadError> {
        Ok(self.lock()?.settings.clone().unwrap_or_default())
    }

    async fn write_settings(
        &self,
        settings: domain::Settings,
    ) -> Result<domain::Settings, domain::UpdateError> {
        self.lock()?.settings = Some(settings.clone());
        Ok(settings)
    }
}

impl log::Repository for MemoryStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.lock()
            .map(|state| state.log.clone())
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut state = self
            .lock()
            .map_err(|err| log::Error::Unknown(err.to_string()))?;
        log::push(&mut state.log, entry);
        Ok(())
    }
}
