//! Quote wizard error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 422 |
//! | InvalidTransition | 409 |
//! | NotAtFinalStep | 409 |
//! | AlreadySubmitted | 409 |
//! | SubmissionInProgress | 409 |
//! | NoSubmissionPending | 409 |
//! | UnknownSubmission | 409 |

use thiserror::Error;

use super::step::WizardStep;
use super::validation::FieldErrors;
use crate::domain::foundation::{DomainError, ErrorCode, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("{} field(s) need attention", .0.len())]
    ValidationFailed(FieldErrors),

    #[error("Cannot {action} from {from}")]
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },

    #[error("Submission is only possible from step 5, wizard is at {0}")]
    NotAtFinalStep(WizardStep),

    #[error("Quote request has already been submitted")]
    AlreadySubmitted,

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("No submission is pending")]
    NoSubmissionPending,

    #[error("Submission {0} is not the pending submission")]
    UnknownSubmission(SubmissionId),
}

impl WizardError {
    pub fn invalid_transition(from: WizardStep, action: &'static str) -> Self {
        WizardError::InvalidTransition { from, action }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            WizardError::InvalidTransition { .. }
            | WizardError::NotAtFinalStep(_)
            | WizardError::AlreadySubmitted => ErrorCode::InvalidStateTransition,
            WizardError::SubmissionInProgress => ErrorCode::SubmissionInProgress,
            WizardError::NoSubmissionPending | WizardError::UnknownSubmission(_) => {
                ErrorCode::UnknownSubmission
            }
        }
    }

    /// Field errors carried by a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            WizardError::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<WizardError> for DomainError {
    fn from(err: WizardError) -> Self {
        let mut domain = DomainError::new(err.code(), err.to_string());
        if let Some(errors) = err.field_errors() {
            for (field, message) in errors.iter() {
                domain = domain.with_detail(field.as_str(), message);
            }
        }
        domain
    }
}
