//! Errors returned by quote handlers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, WizardId};
use crate::domain::quote::WizardError;
use crate::ports::DispatchError;

#[derive(Debug, Error)]
pub enum QuoteHandlerError {
    #[error("Wizard {0} not found")]
    NotFound(WizardId),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// The intake system did not acknowledge. The wizard is back on step 5
    /// with its answers intact.
    #[error("Dispatch failed: {0}")]
    Dispatch(DispatchError),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

impl QuoteHandlerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QuoteHandlerError::NotFound(_) => ErrorCode::WizardNotFound,
            QuoteHandlerError::Wizard(err) => err.code(),
            QuoteHandlerError::Dispatch(_) => ErrorCode::DispatchFailed,
            QuoteHandlerError::Storage(err) => err.code,
        }
    }
}
