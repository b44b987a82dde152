//! Data Transfer Objects for quote endpoints.
//!
//! Answers and pricing serialize as the domain types do; only the wizard
//! view is flattened into an explicit response shape.

use serde::Serialize;

use crate::domain::pricing::PricingResult;
use crate::domain::quote::{FieldErrors, FormAnswers, QuoteWizard, WizardStep};
use crate::ports::DispatchReceipt;

/// Wizard state as shown to the form.
#[derive(Debug, Clone, Serialize)]
pub struct WizardResponse {
    pub id: String,
    pub step: WizardStep,
    pub step_number: u8,
    pub step_title: &'static str,
    pub answers: FormAnswers,
    pub field_errors: FieldErrors,
    pub submission_pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_dispatch_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingResult>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&QuoteWizard> for WizardResponse {
    fn from(wizard: &QuoteWizard) -> Self {
        Self {
            id: wizard.id().to_string(),
            step: wizard.step(),
            step_number: wizard.step().number(),
            step_title: wizard.step().title(),
            answers: wizard.answers().clone(),
            field_errors: wizard.field_errors().clone(),
            submission_pending: wizard.is_submission_pending(),
            last_dispatch_error: wizard.last_dispatch_error().map(str::to_string),
            pricing: wizard.pricing().cloned(),
            created_at: wizard.created_at().to_rfc3339(),
            updated_at: wizard.updated_at().to_rfc3339(),
        }
    }
}

/// Pricing preview with the display lines for the summary card.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub pricing: PricingResult,
    pub summary: Vec<String>,
}

impl From<PricingResult> for EstimateResponse {
    fn from(pricing: PricingResult) -> Self {
        let summary = pricing.summary_lines();
        Self { pricing, summary }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleComplianceResponse {
    pub selected: bool,
    pub wizard: WizardResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitQuoteResponse {
    pub wizard: WizardResponse,
    pub estimate: EstimateResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub accepted_at: String,
}

impl SubmitQuoteResponse {
    pub fn new(wizard: &QuoteWizard, pricing: PricingResult, receipt: DispatchReceipt) -> Self {
        Self {
            wizard: wizard.into(),
            estimate: pricing.into(),
            reference: receipt.reference,
            accepted_at: receipt.accepted_at.to_rfc3339(),
        }
    }
}
