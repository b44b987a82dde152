//! NavigateWizardHandler - Next and Back.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::foundation::WizardId;
use crate::domain::quote::QuoteWizard;
use crate::ports::WizardStore;

use super::{update_wizard, QuoteHandlerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Back,
}

#[derive(Debug, Clone)]
pub struct NavigateWizardCommand {
    pub wizard_id: WizardId,
    pub direction: Direction,
}

pub struct NavigateWizardHandler {
    store: Arc<dyn WizardStore>,
}

impl NavigateWizardHandler {
    pub fn new(store: Arc<dyn WizardStore>) -> Self {
        Self { store }
    }

    /// Moves the wizard one step.
    ///
    /// A rejected `Next` still saves the wizard so the recorded field errors
    /// are shown on the next read.
    pub async fn handle(&self, cmd: NavigateWizardCommand) -> Result<QuoteWizard, QuoteHandlerError> {
        let direction = cmd.direction;
        let (wizard, (from, moved)) =
            update_wizard(self.store.as_ref(), cmd.wizard_id, |wizard| {
                let from = wizard.step();
                let moved = match direction {
                    Direction::Next => wizard.next(),
                    Direction::Back => wizard.back(),
                };
                (from, moved)
            })
            .await?;

        match moved {
            Ok(to) => {
                tracing::debug!(
                    wizard_id = %cmd.wizard_id,
                    from = %from,
                    to = %to,
                    "Wizard step changed"
                );
                Ok(wizard)
            }
            Err(err) => {
                tracing::debug!(
                    wizard_id = %cmd.wizard_id,
                    step = %from,
                    direction = ?cmd.direction,
                    error = %err,
                    "Wizard navigation rejected"
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryWizardStore;
    use crate::domain::quote::{FormAnswers, FormField, WizardError, WizardStep};

    async fn setup(answers: FormAnswers) -> (Arc<InMemoryWizardStore>, NavigateWizardHandler, WizardId) {
        let store = Arc::new(InMemoryWizardStore::new());
        let mut wizard = QuoteWizard::new(WizardId::new());
        wizard.replace_answers(answers).unwrap();
        store.save(&wizard).await.unwrap();
        let handler = NavigateWizardHandler::new(store.clone());
        (store, handler, wizard.id())
    }

    fn cmd(wizard_id: WizardId, direction: Direction) -> NavigateWizardCommand {
        NavigateWizardCommand {
            wizard_id,
            direction,
        }
    }

    #[tokio::test]
    async fn next_with_valid_step_advances_and_persists() {
        let (store, handler, id) = setup(FormAnswers::test_fixture()).await;

        let wizard = handler.handle(cmd(id, Direction::Next)).await.unwrap();

        assert_eq!(wizard.step(), WizardStep::Step2);
        let stored = store.find(id).await.unwrap().unwrap();
        assert_eq!(stored.step(), WizardStep::Step2);
    }

    #[tokio::test]
    async fn rejected_next_persists_field_errors() {
        let (store, handler, id) = setup(FormAnswers::default()).await;

        let err = handler.handle(cmd(id, Direction::Next)).await.unwrap_err();

        assert!(matches!(
            err,
            QuoteHandlerError::Wizard(WizardError::ValidationFailed(_))
        ));
        let stored = store.find(id).await.unwrap().unwrap();
        assert_eq!(stored.step(), WizardStep::Step1);
        assert!(stored.field_errors().contains(FormField::Industry));
    }

    #[tokio::test]
    async fn back_from_step1_stays_put() {
        let (_, handler, id) = setup(FormAnswers::default()).await;

        let wizard = handler.handle(cmd(id, Direction::Back)).await.unwrap();

        assert_eq!(wizard.step(), WizardStep::Step1);
    }

    #[tokio::test]
    async fn next_then_back_returns_to_same_step_with_same_answers() {
        let (_, handler, id) = setup(FormAnswers::test_fixture()).await;

        handler.handle(cmd(id, Direction::Next)).await.unwrap();
        let wizard = handler.handle(cmd(id, Direction::Back)).await.unwrap();

        assert_eq!(wizard.step(), WizardStep::Step1);
        assert_eq!(wizard.answers(), &FormAnswers::test_fixture());
    }

    #[test]
    fn direction_parses_lowercase() {
        let direction: Direction = serde_json::from_str("\"back\"").unwrap();
        assert_eq!(direction, Direction::Back);
    }
}
