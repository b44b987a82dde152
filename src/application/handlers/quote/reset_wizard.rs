//! ResetWizardHandler - Clears a wizard back to step 1.

use std::sync::Arc;

use crate::domain::foundation::WizardId;
use crate::domain::quote::QuoteWizard;
use crate::ports::WizardStore;

use super::{update_wizard, QuoteHandlerError};

#[derive(Debug, Clone)]
pub struct ResetWizardCommand {
    pub wizard_id: WizardId,
}

pub struct ResetWizardHandler {
    store: Arc<dyn WizardStore>,
}

impl ResetWizardHandler {
    pub fn new(store: Arc<dyn WizardStore>) -> Self {
        Self { store }
    }

    /// Always succeeds for a known wizard, including while a dispatch is in
    /// flight; the outstanding submission is voided.
    pub async fn handle(&self, cmd: ResetWizardCommand) -> Result<QuoteWizard, QuoteHandlerError> {
        let (wizard, voided) = update_wizard(self.store.as_ref(), cmd.wizard_id, |wizard| {
            let voided = wizard.pending_submission();
            wizard.reset();
            voided
        })
        .await?;
        if let Some(voided) = voided {
            tracing::info!(
                wizard_id = %cmd.wizard_id,
                submission_id = %voided,
                "Reset voided in-flight submission"
            );
        }
        Ok(wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryWizardStore;
    use crate::domain::quote::{FormAnswers, WizardStep};

    #[tokio::test]
    async fn reset_clears_answers_and_step() {
        let store = Arc::new(InMemoryWizardStore::new());
        let mut wizard = QuoteWizard::new(WizardId::new());
        wizard.replace_answers(FormAnswers::test_fixture()).unwrap();
        wizard.next().unwrap();
        store.save(&wizard).await.unwrap();
        let handler = ResetWizardHandler::new(store);

        let reset = handler
            .handle(ResetWizardCommand { wizard_id: wizard.id() })
            .await
            .unwrap();

        assert_eq!(reset.step(), WizardStep::Step1);
        assert_eq!(reset.answers(), &FormAnswers::default());
    }

    #[tokio::test]
    async fn reset_voids_pending_submission() {
        let store = Arc::new(InMemoryWizardStore::new());
        let mut wizard = QuoteWizard::new(WizardId::new());
        wizard.replace_answers(FormAnswers::test_fixture()).unwrap();
        for _ in 0..4 {
            wizard.next().unwrap();
        }
        wizard.begin_submission().unwrap();
        store.save(&wizard).await.unwrap();
        let handler = ResetWizardHandler::new(store);

        let reset = handler
            .handle(ResetWizardCommand { wizard_id: wizard.id() })
            .await
            .unwrap();

        assert!(!reset.is_submission_pending());
    }
}
