//! Intake dispatch configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

const MAX_SIMULATED_DELAY_MS: u64 = 30_000;

/// Which dispatcher handles submitted quote requests.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntakeMode {
    /// Wait a fixed delay, then acknowledge. Nothing leaves the process.
    #[default]
    Simulated,
    /// POST the request to an external intake endpoint.
    Http,
}

/// Intake configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    #[serde(default)]
    pub mode: IntakeMode,

    /// Intake endpoint URL, required in `http` mode
    pub endpoint: Option<String>,

    /// Bearer token sent to the intake endpoint
    pub api_key: Option<SecretString>,

    /// Shared secret for the `Intake-Signature` header
    pub signing_secret: Option<SecretString>,

    /// Acknowledgement delay for the simulated dispatcher
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,

    /// Per-request timeout for the HTTP dispatcher
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl IntakeConfig {
    /// Longest a single dispatch can take before the dispatcher gives up.
    pub fn max_dispatch_duration(&self) -> Duration {
        match self.mode {
            IntakeMode::Simulated => Duration::from_millis(self.simulated_delay_ms),
            IntakeMode::Http => Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.simulated_delay_ms > MAX_SIMULATED_DELAY_MS {
            return Err(ValidationError::SimulatedDelayTooLarge);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.mode == IntakeMode::Http {
            let endpoint = self
                .endpoint
                .as_deref()
                .ok_or(ValidationError::MissingRequired("intake.endpoint"))?;
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidIntakeEndpoint);
            }
            if *environment == Environment::Production && !endpoint.starts_with("https://") {
                return Err(ValidationError::IntakeEndpointMustBeHttps);
            }
            if self.api_key.is_none() {
                return Err(ValidationError::MissingRequired("intake.api_key"));
            }
            if self.signing_secret.is_none() {
                return Err(ValidationError::MissingRequired("intake.signing_secret"));
            }
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            mode: IntakeMode::default(),
            endpoint: None,
            api_key: None,
            signing_secret: None,
            simulated_delay_ms: default_simulated_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_simulated_delay_ms() -> u64 {
    1500
}

fn default_timeout_secs() -> u64 {
    10
}
