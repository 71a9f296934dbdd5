use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub sqlx_logging: bool,
}

/// Tunables for the pipeline rules. The defaults match the product
/// behavior: a deal untouched for 30 days is stagnant, velocity counts
/// moves over a trailing 7-day window.
#[derive(Debug, Deserialize, Clone)]
pub struct PipelineSettings {
    pub stagnant_after_days: i64,
    pub velocity_window_days: i64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("DEALDESK"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 3000)?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("database.url", "sqlite://dealdesk.db?mode=rwc")?
            .set_default("database.max_connections", None::<u32>)?
            .set_default("database.min_connections", None::<u32>)?
            .set_default("database.sqlx_logging", false)?
            .set_default("pipeline.stagnant_after_days", 30)?
            .set_default("pipeline.velocity_window_days", 7)?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::load().expect("Failed to load default settings")
    }
}
