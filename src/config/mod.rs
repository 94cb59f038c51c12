//! Application configuration.
//!
//! Type-safe configuration loaded from environment variables via the
//! `config` and `dotenvy` crates. Variables carry the `TUZA` prefix and
//! nest with double underscores:
//!
//! - `TUZA__SERVER__PORT=8080` -> `server.port`
//! - `TUZA__DATABASE__URL=...` -> `database.url`
//! - `TUZA__USSD__DAILY_STORAGE_FEE=19000` -> `ussd.daily_storage_fee`

mod database;
mod error;
mod server;
mod ussd;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use server::{Environment, ServerConfig};
pub use ussd::UssdConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment).
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection).
    pub database: DatabaseConfig,

    /// USSD service configuration (dial code, fees, reply encoding).
    #[serde(default)]
    pub ussd: UssdConfig,
}

impl AppConfig {
    /// Loads configuration from the environment, reading `.env` first when
    /// present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when required variables are missing or a value
    /// cannot be parsed into its typed field.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("TUZA").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates all sections.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ussd.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize these tests.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("TUZA__DATABASE__URL", "postgresql://test@localhost/tuza");
    }

    fn clear_env() {
        env::remove_var("TUZA__DATABASE__URL");
        env::remove_var("TUZA__SERVER__PORT");
        env::remove_var("TUZA__USSD__DAILY_STORAGE_FEE");
        env::remove_var("TUZA__USSD__REPLY_ENCODING");
    }

    #[test]
    fn loads_from_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("load should succeed");
        assert_eq!(config.database.url, "postgresql://test@localhost/tuza");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ussd.daily_storage_fee, 19_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TUZA__SERVER__PORT", "3000");
        env::set_var("TUZA__USSD__DAILY_STORAGE_FEE", "25000");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("load should succeed");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ussd.daily_storage_fee, 25_000);
    }
}
