//! Quote wizard command and query handlers.
//!
//! Each command applies one domain operation through `WizardStore::update`,
//! so the read-check-write of a guard cannot interleave with another request.
//! The result is kept even when the operation fails after recording field
//! errors.

mod close_wizard;
mod error;
mod estimate_quote;
mod evict_idle_wizards;
mod get_wizard;
mod navigate_wizard;
mod reset_wizard;
mod start_wizard;
mod submit_quote;
mod toggle_compliance;
mod update_answers;

pub use close_wizard::{CloseWizardCommand, CloseWizardHandler};
pub use error::QuoteHandlerError;
pub use estimate_quote::{EstimateQuoteHandler, EstimateQuoteQuery};
pub use evict_idle_wizards::EvictIdleWizardsHandler;
pub use get_wizard::{GetWizardHandler, GetWizardQuery};
pub use navigate_wizard::{Direction, NavigateWizardCommand, NavigateWizardHandler};
pub use reset_wizard::{ResetWizardCommand, ResetWizardHandler};
pub use start_wizard::StartWizardHandler;
pub use submit_quote::{SubmitQuoteCommand, SubmitQuoteHandler, SubmitQuoteResult};
pub use toggle_compliance::{ToggleComplianceCommand, ToggleComplianceHandler, ToggleComplianceResult};
pub use update_answers::{UpdateAnswersCommand, UpdateAnswersHandler};

use crate::domain::foundation::WizardId;
use crate::domain::quote::QuoteWizard;
use crate::ports::WizardStore;

async fn load_wizard(
    store: &dyn WizardStore,
    id: WizardId,
) -> Result<QuoteWizard, QuoteHandlerError> {
    store
        .find(id)
        .await?
        .ok_or(QuoteHandlerError::NotFound(id))
}

/// Applies `operation` to the stored wizard atomically and returns the
/// updated wizard together with the operation's outcome.
async fn update_wizard<R, F>(
    store: &dyn WizardStore,
    id: WizardId,
    operation: F,
) -> Result<(QuoteWizard, R), QuoteHandlerError>
where
    R: Send,
    F: FnOnce(&mut QuoteWizard) -> R + Send,
{
    let mut outcome = None;
    let updated = store
        .update(
            id,
            Box::new(|wizard: &mut QuoteWizard| outcome = Some(operation(wizard))),
        )
        .await?;

    match (updated, outcome) {
        (Some(wizard), Some(outcome)) => Ok((wizard, outcome)),
        _ => Err(QuoteHandlerError::NotFound(id)),
    }
}
