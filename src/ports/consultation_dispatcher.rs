//! Consultation dispatcher port.
//!
//! The boundary where a completed quote request leaves this service for an
//! external intake system (CRM, email inbox). The dispatcher receives the raw
//! answer record only; the pricing estimate stays a client-side preview.
//!
//! # Design
//!
//! - **Fire once**: no retry contract; a failure goes back to the visitor
//! - **Idempotency key**: `submission_id` is unique per attempt

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{SubmissionId, Timestamp, WizardId};
use crate::domain::quote::{FormAnswers, SubmissionTicket};

/// Port for handing a consultation request to the intake system.
#[async_trait]
pub trait ConsultationDispatcher: Send + Sync {
    /// Deliver the request. Returns once the intake system acknowledged it.
    async fn dispatch(&self, request: &ConsultationRequest) -> Result<DispatchReceipt, DispatchError>;
}

/// Flat record sent to the intake system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub submission_id: SubmissionId,
    pub wizard_id: WizardId,
    pub submitted_at: Timestamp,
    #[serde(flatten)]
    pub answers: FormAnswers,
}

impl From<SubmissionTicket> for ConsultationRequest {
    fn from(ticket: SubmissionTicket) -> Self {
        Self {
            submission_id: ticket.submission_id,
            wizard_id: ticket.wizard_id,
            submitted_at: ticket.requested_at,
            answers: ticket.answers,
        }
    }
}

/// Acknowledgement from the intake system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReceipt {
    /// Reference assigned by the intake system, if it returns one.
    pub reference: Option<String>,
    pub accepted_at: Timestamp,
}

impl DispatchReceipt {
    pub fn now(reference: Option<String>) -> Self {
        Self {
            reference,
            accepted_at: Timestamp::now(),
        }
    }
}

/// Errors from the intake system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Intake service unavailable: {0}")]
    Unavailable(String),

    #[error("Intake service rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Intake service timed out")]
    Timeout,

    #[error("Failed to encode request: {0}")]
    Serialization(String),
}

impl DispatchError {
    /// Message shown to the visitor. Every dispatch failure leaves the
    /// answers intact, so the visitor can always try again.
    pub fn user_message(&self) -> &'static str {
        match self {
            DispatchError::Timeout | DispatchError::Unavailable(_) => {
                "We couldn't reach our team just now. Your answers are saved, please try again."
            }
            DispatchError::Rejected { .. } | DispatchError::Serialization(_) => {
                "Something went wrong sending your request. Your answers are saved, please try again."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::Industry;

    #[test]
    fn request_flattens_answers() {
        let request = ConsultationRequest {
            submission_id: SubmissionId::new(),
            wizard_id: WizardId::new(),
            submitted_at: Timestamp::now(),
            answers: FormAnswers {
                industry: Some(Industry::Enterprise),
                email: "ops@example.com".into(),
                ..FormAnswers::default()
            },
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["industry"], "enterprise");
        assert_eq!(json["email"], "ops@example.com");
        assert_eq!(json["team_size_tier"], 1);
        assert!(json.get("answers").is_none());
        assert!(json.get("monthly_price").is_none());
    }

    #[test]
    fn request_built_from_ticket_keeps_ids() {
        let ticket = SubmissionTicket {
            submission_id: SubmissionId::new(),
            wizard_id: WizardId::new(),
            answers: FormAnswers::default(),
            requested_at: Timestamp::now(),
        };
        let request = ConsultationRequest::from(ticket.clone());
        assert_eq!(request.submission_id, ticket.submission_id);
        assert_eq!(request.wizard_id, ticket.wizard_id);
        assert_eq!(request.submitted_at, ticket.requested_at);
    }

    #[test]
    fn rejected_error_displays_status() {
        let err = DispatchError::Rejected {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(
            err.to_string(),
            "Intake service rejected the request with status 503: maintenance"
        );
        assert!(err.user_message().contains("try again"));
    }
}
