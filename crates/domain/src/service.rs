use log::{debug, error, warn};

use crate::{
    Adherence, CreateError, IdAllocator, OnboardingProfile, Plan, PlanRepository, PlanService,
    ProfileRepository, ProfileService, ReadError, SequentialIds, Settings, SettingsRepository,
    SettingsService, StoredPlan, StoredPlanID, UpdateError, WorkoutLog, WorkoutLogRepository,
    WorkoutLogService, adherence, generate_named,
};

pub struct Service<R, I = SequentialIds> {
    repository: R,
    ids: I,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self::with_ids(repository, SequentialIds::new())
    }
}

impl<R, I: IdAllocator> Service<R, I> {
    pub fn with_ids(repository: R, ids: I) -> Self {
        Self { repository, ids }
    }

    pub fn ids(&self) -> &I {
        &self.ids
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R, I> PlanService for Service<R, I>
where
    R: PlanRepository + SettingsRepository,
    I: IdAllocator,
{
    async fn generate_plan(&self, profile: &OnboardingProfile) -> Plan {
        let settings = match self.repository.read_settings().await {
            Ok(settings) => settings,
            Err(err) => {
                warn!("failed to get settings, using defaults: {err}");
                Settings::default()
            }
        };
        generate_named(profile.into(), &self.ids, &settings.plan_name)
    }

    async fn save_plan(&self, plan: Plan) -> Result<StoredPlan, CreateError> {
        log_on_error!(
            self.repository.create_plan(plan),
            CreateError,
            "save",
            "plan"
        )
    }

    async fn get_plans(&self) -> Result<Vec<StoredPlan>, ReadError> {
        log_on_error!(self.repository.read_plans(), ReadError, "get", "plans")
    }

    async fn get_plan(&self, id: StoredPlanID) -> Result<StoredPlan, ReadError> {
        log_on_error!(self.repository.read_plan(id), ReadError, "get", "plan")
    }

    async fn accept_plan(&self, id: StoredPlanID) -> Result<StoredPlan, UpdateError> {
        log_on_error!(
            self.repository.accept_plan(id),
            UpdateError,
            "accept",
            "plan"
        )
    }
}

impl<R, I> WorkoutLogService for Service<R, I>
where
    R: WorkoutLogRepository + PlanRepository + ProfileRepository,
{
    async fn log_workout(&self, log: WorkoutLog) -> Result<WorkoutLog, CreateError> {
        log_on_error!(
            self.repository.create_workout_log(log),
            CreateError,
            "create",
            "workout log"
        )
    }

    async fn get_workout_logs(&self) -> Result<Vec<WorkoutLog>, ReadError> {
        log_on_error!(
            self.repository.read_workout_logs(),
            ReadError,
            "get",
            "workout logs"
        )
    }

    async fn adherence(&self) -> Result<Adherence, ReadError> {
        let plans = log_on_error!(self.repository.read_plans(), ReadError, "get", "plans")?;
        let plan = plans.iter().find(|p| p.accepted).map(|p| &p.plan);
        let schedule = log_on_error!(
            self.repository.read_profile(),
            ReadError,
            "get",
            "profile"
        )?
        .map_or(0, |p| p.schedule.days());
        let logs = self.get_workout_logs().await?;
        Ok(adherence(plan, schedule, &logs))
    }
}

impl<R: ProfileRepository, I> ProfileService for Service<R, I> {
    async fn get_profile(&self) -> Result<Option<OnboardingProfile>, ReadError> {
        log_on_error!(
            self.repository.read_profile(),
            ReadError,
            "get",
            "profile"
        )
    }

    async fn set_profile(
        &self,
        profile: OnboardingProfile,
    ) -> Result<OnboardingProfile, UpdateError> {
        log_on_error!(
            self.repository.write_profile(profile),
            UpdateError,
            "set",
            "profile"
        )
    }
}

impl<R: SettingsRepository, I> SettingsService for Service<R, I> {
    async fn get_settings(&self) -> Result<Settings, ReadError> {
        log_on_error!(
            self.repository.read_settings(),
            ReadError,
            "get",
            "settings"
        )
    }

    async fn set_settings(&self, settings: Settings) -> Result<Settings, UpdateError> {
        log_on_error!(
            self.repository.write_settings(settings),
            UpdateError,
            "set",
            "settings"
        )
    }
}
