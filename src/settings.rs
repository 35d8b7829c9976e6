use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    pub calendar_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            enable_swagger: true,
            port: 10000,
            calendar_name: "Class Timetable".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let defaults = Settings::default();
        let config = Config::builder()
            // Load from environment variables with APP_ prefix
            .add_source(Environment::with_prefix("APP"))
            .set_default("debug", defaults.debug)?
            .set_default("enable_swagger", defaults.enable_swagger)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("calendar_name", defaults.calendar_name)?
            .build()?;

        config.try_deserialize()
    }
}
