//! Quote wizard aggregate.
//!
//! Owns the answer record for one consultation request and moves it through
//! the five form steps to submission.
//!
//! # Design Decisions
//!
//! - **Single writer**: one wizard per visitor session, mutated only through
//!   the methods here.
//! - **Two-phase submit**: `begin_submission` validates and hands out a
//!   ticket; the dispatcher's outcome is reported back with
//!   `complete_submission` or `fail_submission`.
//! - **Locked while in flight**: answers, `back` and a second submit are
//!   rejected while a ticket is outstanding. `reset` is always allowed and
//!   voids the ticket.

use serde::{Deserialize, Serialize};

use super::answers::{ComplianceNeed, FormAnswers};
use super::errors::WizardError;
use super::step::WizardStep;
use super::validation::{validate_all, validate_step, FieldErrors};
use crate::domain::foundation::{StateMachine, SubmissionId, Timestamp, WizardId};
use crate::domain::pricing::{estimate, PricingResult};

/// Handed out by `begin_submission`; carries the exact record to dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionTicket {
    pub submission_id: SubmissionId,
    pub wizard_id: WizardId,
    pub answers: FormAnswers,
    pub requested_at: Timestamp,
}

/// Quote wizard aggregate.
///
/// # Invariants
///
/// - `pricing` is `Some` exactly when `step == Submitted`
/// - `pending` is `None` whenever `step != Step5`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteWizard {
    id: WizardId,
    step: WizardStep,
    answers: FormAnswers,
    field_errors: FieldErrors,
    pending: Option<SubmissionId>,
    pricing: Option<PricingResult>,
    last_dispatch_error: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl QuoteWizard {
    /// Starts a wizard at step 1 with default answers.
    pub fn new(id: WizardId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            step: WizardStep::Step1,
            answers: FormAnswers::default(),
            field_errors: FieldErrors::new(),
            pending: None,
            pricing: None,
            last_dispatch_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> WizardId {
        self.id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn answers(&self) -> &FormAnswers {
        &self.answers
    }

    /// Inline errors from the last rejected `next` or submission.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// The estimate shown once the request has been submitted.
    pub fn pricing(&self) -> Option<&PricingResult> {
        self.pricing.as_ref()
    }

    pub fn is_submission_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_submission(&self) -> Option<SubmissionId> {
        self.pending
    }

    /// Retryable message from the last failed dispatch.
    pub fn last_dispatch_error(&self) -> Option<&str> {
        self.last_dispatch_error.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Applies an edit to the answers.
    ///
    /// Errors for fields the edit fixed are cleared; remaining errors stay
    /// until the next validation.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitted` once the request has been submitted
    /// - `SubmissionInProgress` while a dispatch is outstanding
    pub fn edit<F>(&mut self, edit: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut FormAnswers),
    {
        self.ensure_editable()?;
        edit(&mut self.answers);
        self.field_errors.retain_failing(&self.answers);
        self.touch();
        Ok(())
    }

    /// Replaces the whole answer record.
    pub fn replace_answers(&mut self, answers: FormAnswers) -> Result<(), WizardError> {
        self.edit(|current| *current = answers)
    }

    /// Toggles one compliance checkbox, keeping `none` exclusive.
    ///
    /// Returns whether the need is selected afterwards.
    pub fn toggle_compliance(&mut self, need: ComplianceNeed) -> Result<bool, WizardError> {
        let mut selected = false;
        self.edit(|answers| selected = answers.compliance_needs.toggle(need))?;
        Ok(selected)
    }

    /// Advances one step if the current step's fields are valid.
    ///
    /// On failure the field errors are recorded and the step is unchanged.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        if self.step == WizardStep::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        let target = self
            .step
            .following()
            .ok_or_else(|| WizardError::invalid_transition(self.step, "advance"))?;

        if let Err(errors) = validate_step(self.step, &self.answers) {
            self.field_errors = errors.clone();
            self.touch();
            return Err(WizardError::ValidationFailed(errors));
        }

        self.step = self
            .step
            .transition_to(target)
            .map_err(|_| WizardError::invalid_transition(self.step, "advance"))?;
        self.field_errors = FieldErrors::new();
        self.touch();
        Ok(self.step)
    }

    /// Goes back one step without validating or touching the answers.
    ///
    /// At step 1 this is a no-op.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::Submitted => {
                return Err(WizardError::invalid_transition(self.step, "go back"))
            }
            _ if self.pending.is_some() => return Err(WizardError::SubmissionInProgress),
            _ => {}
        }
        if let Some(previous) = self.step.preceding() {
            self.step = previous;
            self.touch();
        }
        Ok(self.step)
    }

    /// Validates the whole record and opens a submission.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitted` after a successful submission
    /// - `NotAtFinalStep` from any step but 5
    /// - `SubmissionInProgress` if a ticket is already outstanding
    /// - `ValidationFailed` if any required field anywhere is invalid; the
    ///   wizard stays on step 5
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, WizardError> {
        match self.step {
            WizardStep::Submitted => return Err(WizardError::AlreadySubmitted),
            WizardStep::Step5 => {}
            other => return Err(WizardError::NotAtFinalStep(other)),
        }
        if self.pending.is_some() {
            return Err(WizardError::SubmissionInProgress);
        }
        if let Err(errors) = validate_all(&self.answers) {
            self.field_errors = errors.clone();
            self.touch();
            return Err(WizardError::ValidationFailed(errors));
        }

        let submission_id = SubmissionId::new();
        self.pending = Some(submission_id);
        self.field_errors = FieldErrors::new();
        self.last_dispatch_error = None;
        self.touch();

        Ok(SubmissionTicket {
            submission_id,
            wizard_id: self.id,
            answers: self.answers.clone(),
            requested_at: self.updated_at,
        })
    }

    /// Records that the dispatcher acknowledged the submission, computes the
    /// estimate and enters `Submitted`.
    pub fn complete_submission(
        &mut self,
        submission_id: SubmissionId,
    ) -> Result<PricingResult, WizardError> {
        self.claim_pending(submission_id)?;
        self.step = self
            .step
            .transition_to(WizardStep::Submitted)
            .map_err(|_| WizardError::invalid_transition(self.step, "submit"))?;
        let pricing = estimate(&self.answers);
        self.pricing = Some(pricing.clone());
        self.touch();
        Ok(pricing)
    }

    /// Records a failed dispatch. The wizard stays on step 5 with every
    /// answer intact so the visitor can retry.
    pub fn fail_submission(
        &mut self,
        submission_id: SubmissionId,
        reason: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.claim_pending(submission_id)?;
        self.last_dispatch_error = Some(reason.into());
        self.touch();
        Ok(())
    }

    /// Clears everything back to a fresh step 1. Idempotent.
    pub fn reset(&mut self) {
        self.step = WizardStep::Step1;
        self.answers = FormAnswers::default();
        self.field_errors = FieldErrors::new();
        self.pending = None;
        self.pricing = None;
        self.last_dispatch_error = None;
        self.touch();
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.step == WizardStep::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.pending.is_some() {
            return Err(WizardError::SubmissionInProgress);
        }
        Ok(())
    }

    fn claim_pending(&mut self, submission_id: SubmissionId) -> Result<(), WizardError> {
        match self.pending {
            None => Err(WizardError::NoSubmissionPending),
            Some(pending) if pending != submission_id => {
                Err(WizardError::UnknownSubmission(submission_id))
            }
            Some(_) => {
                self.pending = None;
                Ok(())
            }
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
