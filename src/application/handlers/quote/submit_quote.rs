//! SubmitQuoteHandler - Validates, dispatches and finalizes a quote request.
//!
//! Opening the submission is a single atomic store update, so two requests
//! racing on the same wizard cannot both dispatch. Dispatch and the
//! recording of its outcome run in a task of their own: if the HTTP request
//! is dropped (client gone, request timeout) the ticket is still settled and
//! the wizard never stays pending. No store lock is held while the intake
//! system is called, and a reset that lands in between voids the ticket so
//! the late outcome is rejected.

use std::sync::Arc;

use tracing::Instrument;

use crate::domain::foundation::{DomainError, ErrorCode, WizardId};
use crate::domain::pricing::PricingResult;
use crate::domain::quote::QuoteWizard;
use crate::ports::{ConsultationDispatcher, ConsultationRequest, DispatchReceipt, WizardStore};

use super::{update_wizard, QuoteHandlerError};

#[derive(Debug, Clone)]
pub struct SubmitQuoteCommand {
    pub wizard_id: WizardId,
}

#[derive(Debug, Clone)]
pub struct SubmitQuoteResult {
    pub wizard: QuoteWizard,
    pub pricing: PricingResult,
    pub receipt: DispatchReceipt,
}

pub struct SubmitQuoteHandler {
    store: Arc<dyn WizardStore>,
    dispatcher: Arc<dyn ConsultationDispatcher>,
}

impl SubmitQuoteHandler {
    pub fn new(store: Arc<dyn WizardStore>, dispatcher: Arc<dyn ConsultationDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    #[tracing::instrument(skip(self), fields(wizard_id = %cmd.wizard_id))]
    pub async fn handle(&self, cmd: SubmitQuoteCommand) -> Result<SubmitQuoteResult, QuoteHandlerError> {
        // 1. Open the submission; field errors from a failed validation are kept
        let (_, begun) = update_wizard(self.store.as_ref(), cmd.wizard_id, |wizard| {
            wizard.begin_submission()
        })
        .await?;
        let request = ConsultationRequest::from(begun?);

        // 2. Dispatch and settle the ticket outside the request future
        let store = Arc::clone(&self.store);
        let dispatcher = Arc::clone(&self.dispatcher);
        let wizard_id = cmd.wizard_id;
        let settle = tokio::spawn(
            async move {
                dispatch_and_settle(store.as_ref(), dispatcher.as_ref(), wizard_id, request).await
            }
            .in_current_span(),
        );

        settle.await.map_err(|err| {
            tracing::error!(error = %err, "Submission task did not complete");
            QuoteHandlerError::Storage(DomainError::new(
                ErrorCode::InternalError,
                "Submission task did not complete",
            ))
        })?
    }
}

async fn dispatch_and_settle(
    store: &dyn WizardStore,
    dispatcher: &dyn ConsultationDispatcher,
    wizard_id: WizardId,
    request: ConsultationRequest,
) -> Result<SubmitQuoteResult, QuoteHandlerError> {
    let submission_id = request.submission_id;
    tracing::info!(submission_id = %submission_id, "Dispatching consultation request");
    let outcome = dispatcher.dispatch(&request).await;

    match outcome {
        Ok(receipt) => {
            let (wizard, completed) = update_wizard(store, wizard_id, |wizard| {
                wizard.complete_submission(submission_id)
            })
            .await?;
            let pricing = completed.map_err(|err| {
                tracing::warn!(
                    submission_id = %submission_id,
                    error = %err,
                    "Acknowledged submission no longer pending"
                );
                err
            })?;
            tracing::info!(
                submission_id = %submission_id,
                reference = ?receipt.reference,
                monthly_price = pricing.monthly_price,
                "Quote request submitted"
            );
            Ok(SubmitQuoteResult {
                wizard,
                pricing,
                receipt,
            })
        }
        Err(err) => {
            tracing::warn!(
                submission_id = %submission_id,
                error = %err,
                "Consultation dispatch failed"
            );
            let reason = err.user_message();
            let (_, failed) = update_wizard(store, wizard_id, |wizard| {
                wizard.fail_submission(submission_id, reason)
            })
            .await?;
            failed?;
            Err(QuoteHandlerError::Dispatch(err))
        }
    }
}
