//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Wizard idle TTL must be longer than the request timeout")]
    InvalidWizardTtl,

    #[error("Intake dispatch can outlast the request timeout")]
    IntakeOutlastsRequestTimeout,

    #[error("Invalid intake endpoint URL")]
    InvalidIntakeEndpoint,

    #[error("Intake endpoint must use HTTPS in production")]
    IntakeEndpointMustBeHttps,

    #[error("Simulated intake delay exceeds maximum allowed (30000 ms)")]
    SimulatedDelayTooLarge,

    #[error("Content seed file not found: {0}")]
    SeedFileNotFound(String),
}
