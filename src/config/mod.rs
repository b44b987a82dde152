//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `ELEVATION_QUOTE`
//! prefix and nested values are separated by a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use elevation_quote::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod content;
mod error;
mod intake;
mod server;

pub use content::ContentConfig;
pub use error::{ConfigError, ValidationError};
pub use intake::{IntakeConfig, IntakeMode};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// development server with the simulated intake dispatcher.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Where submitted quote requests go
    #[serde(default)]
    pub intake: IntakeConfig,

    #[serde(default)]
    pub content: ContentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `ELEVATION_QUOTE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ELEVATION_QUOTE__INTAKE__MODE=http` -> `intake.mode = Http`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ELEVATION_QUOTE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.intake.validate(&self.server.environment)?;
        if self.intake.max_dispatch_duration() >= self.server.request_timeout() {
            return Err(ValidationError::IntakeOutlastsRequestTimeout);
        }
        self.content.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "ELEVATION_QUOTE__SERVER__PORT",
        "ELEVATION_QUOTE__SERVER__ENVIRONMENT",
        "ELEVATION_QUOTE__SERVER__REQUEST_TIMEOUT_SECS",
        "ELEVATION_QUOTE__INTAKE__MODE",
        "ELEVATION_QUOTE__INTAKE__ENDPOINT",
        "ELEVATION_QUOTE__INTAKE__API_KEY",
        "ELEVATION_QUOTE__INTAKE__SIGNING_SECRET",
        "ELEVATION_QUOTE__INTAKE__SIMULATED_DELAY_MS",
        "ELEVATION_QUOTE__INTAKE__TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn empty_environment_loads_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.intake.mode, IntakeMode::Simulated);
        assert_eq!(config.intake.simulated_delay_ms, 1500);
        assert!(config.content.seed_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_values_are_read() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ELEVATION_QUOTE__SERVER__PORT", "3000");
        env::set_var("ELEVATION_QUOTE__INTAKE__MODE", "http");
        env::set_var("ELEVATION_QUOTE__INTAKE__ENDPOINT", "https://crm.example.com/intake");
        env::set_var("ELEVATION_QUOTE__INTAKE__API_KEY", "key_live_abc");
        env::set_var("ELEVATION_QUOTE__INTAKE__SIGNING_SECRET", "sig_abc");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.intake.mode, IntakeMode::Http);
        assert_eq!(
            config.intake.api_key.as_ref().unwrap().expose_secret(),
            "key_live_abc"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn production_flag() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ELEVATION_QUOTE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn http_mode_without_endpoint_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ELEVATION_QUOTE__INTAKE__MODE", "http");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(
            result.unwrap().validate(),
            Err(ValidationError::MissingRequired("intake.endpoint"))
        );
    }

    #[test]
    fn intake_timeout_must_fit_inside_request_timeout() {
        let mut config = AppConfig::default();
        config.intake.mode = IntakeMode::Http;
        config.intake.endpoint = Some("https://crm.example.com/intake".to_string());
        config.intake.api_key = Some(secrecy::SecretString::new("key".to_string()));
        config.intake.signing_secret = Some(secrecy::SecretString::new("sig".to_string()));
        config.intake.timeout_secs = 60;
        config.server.request_timeout_secs = 30;

        assert_eq!(
            config.validate(),
            Err(ValidationError::IntakeOutlastsRequestTimeout)
        );

        config.intake.timeout_secs = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn simulated_delay_counts_against_request_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ELEVATION_QUOTE__SERVER__REQUEST_TIMEOUT_SECS", "2");
        env::set_var("ELEVATION_QUOTE__INTAKE__SIMULATED_DELAY_MS", "2000");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(
            result.unwrap().validate(),
            Err(ValidationError::IntakeOutlastsRequestTimeout)
        );
    }
}
