//! UpdateAnswersHandler - Replaces a wizard's answer record.
//!
//! The form posts the whole record on every change, so partial updates are
//! not modelled.

use std::sync::Arc;

use crate::domain::foundation::WizardId;
use crate::domain::quote::{FormAnswers, QuoteWizard};
use crate::ports::WizardStore;

use super::{update_wizard, QuoteHandlerError};

#[derive(Debug, Clone)]
pub struct UpdateAnswersCommand {
    pub wizard_id: WizardId,
    pub answers: FormAnswers,
}

pub struct UpdateAnswersHandler {
    store: Arc<dyn WizardStore>,
}

impl UpdateAnswersHandler {
    pub fn new(store: Arc<dyn WizardStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: UpdateAnswersCommand) -> Result<QuoteWizard, QuoteHandlerError> {
        let answers = cmd.answers;
        let (wizard, replaced) = update_wizard(self.store.as_ref(), cmd.wizard_id, |wizard| {
            wizard.replace_answers(answers)
        })
        .await?;
        replaced?;
        Ok(wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryWizardStore;
    use crate::domain::pricing::Industry;
    use crate::domain::quote::{FormField, WizardError};

    #[tokio::test]
    async fn replaced_answers_are_persisted() {
        let store = Arc::new(InMemoryWizardStore::new());
        let wizard = QuoteWizard::new(WizardId::new());
        store.save(&wizard).await.unwrap();
        let handler = UpdateAnswersHandler::new(store.clone());

        handler
            .handle(UpdateAnswersCommand {
                wizard_id: wizard.id(),
                answers: FormAnswers {
                    industry: Some(Industry::ConsultingFirm),
                    ..FormAnswers::default()
                },
            })
            .await
            .unwrap();

        let stored = store.find(wizard.id()).await.unwrap().unwrap();
        assert_eq!(stored.answers().industry, Some(Industry::ConsultingFirm));
    }

    #[tokio::test]
    async fn fixing_a_field_clears_its_error() {
        let store = Arc::new(InMemoryWizardStore::new());
        let mut wizard = QuoteWizard::new(WizardId::new());
        let _ = wizard.next();
        assert!(wizard.field_errors().contains(FormField::Industry));
        store.save(&wizard).await.unwrap();
        let handler = UpdateAnswersHandler::new(store);

        let updated = handler
            .handle(UpdateAnswersCommand {
                wizard_id: wizard.id(),
                answers: FormAnswers {
                    industry: Some(Industry::FamilyOffice),
                    ..FormAnswers::default()
                },
            })
            .await
            .unwrap();

        assert!(updated.field_errors().is_empty());
    }

    #[tokio::test]
    async fn edits_rejected_while_submission_pending() {
        let store = Arc::new(InMemoryWizardStore::new());
        let mut wizard = QuoteWizard::new(WizardId::new());
        wizard.replace_answers(FormAnswers::test_fixture()).unwrap();
        for _ in 0..4 {
            wizard.next().unwrap();
        }
        wizard.begin_submission().unwrap();
        store.save(&wizard).await.unwrap();
        let handler = UpdateAnswersHandler::new(store);

        let err = handler
            .handle(UpdateAnswersCommand {
                wizard_id: wizard.id(),
                answers: FormAnswers::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            QuoteHandlerError::Wizard(WizardError::SubmissionInProgress)
        ));
    }
}
