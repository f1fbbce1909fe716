use crate::{DEFAULT_PLAN_NAME, ReadError, Unit, UpdateError};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, ReadError>;
    async fn set_settings(&self, settings: Settings) -> Result<Settings, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    /// Returns the default settings if none were written yet.
    async fn read_settings(&self) -> Result<Settings, ReadError>;
    async fn write_settings(&self, settings: Settings) -> Result<Settings, UpdateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub unit: Unit,
    pub show_effort: bool,
    pub plan_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit: Unit::Kg,
            show_effort: true,
            plan_name: DEFAULT_PLAN_NAME.to_string(),
        }
    }
}
