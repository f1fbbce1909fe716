use std::{
    collections::VecDeque,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::Context;
use chrono::Local;
use fitcoach_domain::{self as domain, log};
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

use crate::dto;

/// Storage keeping one JSON document per key in a directory.
///
/// A missing document reads as empty. Clones share one lock, so every
/// read-modify-write of a document is serialized across them.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    lock: Arc<Mutex<()>>,
}

#[derive(AsRefStr, Clone, Copy)]
enum Key {
    #[strum(serialize = "plans")]
    Plans,
    #[strum(serialize = "workout_logs")]
    WorkoutLogs,
    #[strum(serialize = "profile")]
    Profile,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, domain::StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))
            .map_err(to_storage_error)?;
        Ok(Self {
            dir,
            lock: Arc::new(Mutex::new(())),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: Key) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_ref()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, domain::StorageError> {
        self.lock
            .lock()
            .map_err(|_| domain::StorageError::Other("storage lock poisoned".into()))
    }

    // The helpers below expect the caller to hold `lock`.

    fn read<V: DeserializeOwned>(&self, key: Key) -> Result<Option<V>, domain::StorageError> {
        let path = self.path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(to_storage_error(
                    anyhow::Error::new(err).context(format!("failed to read {}", path.display())),
                ));
            }
        };
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
            .map_err(to_storage_error)
    }

    fn write<V: Serialize>(&self, key: Key, value: &V) -> Result<(), domain::StorageError> {
        let path = self.path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key.as_ref()));
        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("failed to serialize {}", key.as_ref()))
            .map_err(to_storage_error)?;
        fs::write(&tmp, content)
            .with_context(|| format!("failed to write {}", tmp.display()))
            .map_err(to_storage_error)?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace {}", path.display()))
            .map_err(to_storage_error)
    }

    fn read_plans_dto(&self) -> Result<Vec<dto::StoredPlan>, domain::StorageError> {
        Ok(self.read(Key::Plans)?.unwrap_or_default())
    }

    fn read_workout_logs_dto(&self) -> Result<Vec<dto::WorkoutLog>, domain::StorageError> {
        Ok(self.read(Key::WorkoutLogs)?.unwrap_or_default())
    }

    fn read_log_entries(&self) -> Result<VecDeque<log::Entry>, domain::StorageError> {
        self.read::<Vec<dto::Entry>>(Key::Log)?
            .unwrap_or_default()
            .into_iter()
            .map(log::Entry::try_from)
            .collect::<Result<_, _>>()
            .map_err(|err| domain::StorageError::Other(err.into()))
    }
}

fn to_storage_error(err: anyhow::Error) -> domain::StorageError {
    domain::StorageError::Other(err.into())
}

impl domain::PlanRepository for FileStorage {
    async fn create_plan(
        &self,
        plan: domain::Plan,
    ) -> Result<domain::StoredPlan, domain::CreateError> {
        let _guard = self.lock()?;
        let mut plans = self.read_plans_dto()?;
        if plans.iter().any(|p| p.plan.id == *plan.id) {
            return Err(domain::CreateError::Conflict);
        }
        let stored = domain::StoredPlan {
            id: domain::StoredPlanID::random(),
            plan,
            accepted: false,
            created_at: Local::now().naive_local(),
        };
        plans.push(dto::StoredPlan::from(&stored));
        self.write(Key::Plans, &plans)?;
        Ok(stored)
    }

    async fn read_plans(&self) -> Result<Vec<domain::StoredPlan>, domain::ReadError> {
        let _guard = self.lock()?;
        self.read_plans_dto()?
            .into_iter()
            .rev()
            .map(|p| {
                domain::StoredPlan::try_from(p).map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    async fn read_plan(
        &self,
        id: domain::StoredPlanID,
    ) -> Result<domain::StoredPlan, domain::ReadError> {
        let _guard = self.lock()?;
        let plan = self
            .read_plans_dto()?
            .into_iter()
            .find(|p| p.id == *id)
            .ok_or(domain::ReadError::NotFound)?;
        domain::StoredPlan::try_from(plan).map_err(|err| domain::ReadError::Other(err.into()))
    }

    async fn accept_plan(
        &self,
        id: domain::StoredPlanID,
    ) -> Result<domain::StoredPlan, domain::UpdateError> {
        let _guard = self.lock()?;
        let mut plans = self.read_plans_dto()?;
        let plan = plans
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or(domain::UpdateError::NotFound)?;
        plan.accepted = true;
        let accepted = domain::StoredPlan::try_from(plan.clone())
            .map_err(|err| domain::UpdateError::Other(err.into()))?;
        self.write(Key::Plans, &plans)?;
        Ok(accepted)
    }
}

impl domain::WorkoutLogRepository for FileStorage {
    async fn create_workout_log(
        &self,
        log: domain::WorkoutLog,
    ) -> Result<domain::WorkoutLog, domain::CreateError> {
        let _guard = self.lock()?;
        let mut logs = self.read_workout_logs_dto()?;
        logs.push(dto::WorkoutLog::from(&log));
        self.write(Key::WorkoutLogs, &logs)?;
        Ok(log)
    }

    async fn read_workout_logs(&self) -> Result<Vec<domain::WorkoutLog>, domain::ReadError> {
        let _guard = self.lock()?;
        self.read_workout_logs_dto()?
            .into_iter()
            .rev()
            .map(|l| {
                domain::WorkoutLog::try_from(l).map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }
}

impl domain::ProfileRepository for FileStorage {
    async fn read_profile(&self) -> Result<Option<domain::OnboardingProfile>, domain::ReadError> {
        let _guard = self.lock()?;
        self.read::<dto::Profile>(Key::Profile)?
            .map(domain::OnboardingProfile::try_from)
            .transpose()
            .map_err(|err| domain::ReadError::Other(err.into()))
    }

    async fn write_profile(
        &self,
        profile: domain::OnboardingProfile,
    ) -> Result<domain::OnboardingProfile, domain::UpdateError> {
        let _guard = self.lock()?;
        self.write(Key::Profile, &dto::Profile::from(&profile))?;
        Ok(profile)
    }
}

impl domain::SettingsRepository for FileStorage {
    async fn read_settings(&self) -> Result<domain::Settings, domain::ReadError> {
        let _guard = self.lock()?;
        Ok(self
            .read::<dto::Settings>(Key::Settings)?
            .map(domain::Settings::from)
            .unwrap_or_default())
    }

    async fn write_settings(
        &self,
        settings: domain::Settings,
    ) -> Result<domain::Settings, domain::UpdateError> {
        let _guard = self.lock()?;
        self.write(Key::Settings, &dto::Settings::from(&settings))?;
        Ok(settings)
    }
}

impl log::Repository for FileStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.lock()
            .and_then(|_guard| self.read_log_entries())
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let _guard = self
            .lock()
            .map_err(|err| log::Error::Unknown(err.to_string()))?;
        let mut entries = self
            .read_log_entries()
            .map_err(|err| log::Error::Unknown(err.to_string()))?;
        log::push(&mut entries, entry);
        self.write(
            Key::Log,
            &entries.iter().map(dto::Entry::from).collect::<Vec<_>>(),
        )
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
