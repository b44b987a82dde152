//! Intake dispatch adapters.
//!
//! Implementations of `ConsultationDispatcher`:
//!
//! - `SimulatedDispatcher` - fixed delay, then acknowledge
//! - `HttpIntakeDispatcher` - signed JSON POST to an intake endpoint
//! - `MockDispatcher` - call recording and error injection for tests

mod http;
mod mock;
mod signer;
mod simulated;

pub use http::HttpIntakeDispatcher;
pub use mock::MockDispatcher;
pub use signer::{IntakeSigner, SignatureError, MAX_SIGNATURE_AGE_SECS, SIGNATURE_HEADER};
pub use simulated::SimulatedDispatcher;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{IntakeConfig, IntakeMode};
use crate::ports::{ConsultationDispatcher, DispatchError};

/// Build the dispatcher selected by configuration.
///
/// # Errors
///
/// `Unavailable` when `http` mode lacks an endpoint or credentials, or the
/// HTTP client cannot be built.
pub fn dispatcher_from_config(
    config: &IntakeConfig,
) -> Result<Arc<dyn ConsultationDispatcher>, DispatchError> {
    match config.mode {
        IntakeMode::Simulated => Ok(Arc::new(SimulatedDispatcher::new(Duration::from_millis(
            config.simulated_delay_ms,
        )))),
        IntakeMode::Http => {
            let missing = |what: &str| DispatchError::Unavailable(format!("intake.{} not configured", what));
            let endpoint = config.endpoint.clone().ok_or_else(|| missing("endpoint"))?;
            let api_key = config.api_key.clone().ok_or_else(|| missing("api_key"))?;
            let signing_secret = config
                .signing_secret
                .clone()
                .ok_or_else(|| missing("signing_secret"))?;
            Ok(Arc::new(HttpIntakeDispatcher::new(
                endpoint,
                api_key,
                signing_secret,
                Duration::from_secs(config.timeout_secs),
            )?))
        }
    }
}
