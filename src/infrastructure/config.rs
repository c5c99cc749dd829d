// Configuration loading - defaults, optional file and environment overrides
use crate::application::auto_refresh::RefreshSettings;
use crate::domain::duration::DurationWindow;
use crate::domain::error::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub backend: BackendSettings,
    pub auto_refresh: AutoRefreshSettings,
    pub dashboard: ViewSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AutoRefreshSettings {
    pub enabled: bool,
    #[serde(default)]
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewSettings {
    pub default_duration: String,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AutoRefreshSettings {
    pub fn to_settings(&self) -> RefreshSettings {
        RefreshSettings {
            enabled: self.enabled,
            interval_secs: self.interval_secs,
        }
    }
}

impl ViewSettings {
    pub fn duration(&self) -> Result<DurationWindow> {
        self.default_duration.parse()
    }
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("backend.base_url", "http://localhost:8080")?
        .set_default("backend.timeout_secs", 10_i64)?
        .set_default("auto_refresh.enabled", false)?
        .set_default("dashboard.default_duration", "8")?)
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__*` variables
pub fn load_dashboard_config() -> Result<DashboardConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
