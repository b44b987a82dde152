//! CloseWizardHandler - Discards a wizard when the visitor closes the form.

use std::sync::Arc;

use crate::domain::foundation::WizardId;
use crate::ports::WizardStore;

use super::QuoteHandlerError;

#[derive(Debug, Clone)]
pub struct CloseWizardCommand {
    pub wizard_id: WizardId,
}

pub struct CloseWizardHandler {
    store: Arc<dyn WizardStore>,
}

impl CloseWizardHandler {
    pub fn new(store: Arc<dyn WizardStore>) -> Self {
        Self { store }
    }

    /// Removes the wizard. Closing an unknown or already closed wizard
    /// succeeds. A dispatch still in flight finishes, but its outcome has
    /// nowhere to land.
    pub async fn handle(&self, cmd: CloseWizardCommand) -> Result<(), QuoteHandlerError> {
        self.store.remove(cmd.wizard_id).await?;
        tracing::debug!(wizard_id = %cmd.wizard_id, "Quote wizard closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryWizardStore;
    use crate::domain::quote::QuoteWizard;

    #[tokio::test]
    async fn close_removes_wizard() {
        let store = Arc::new(InMemoryWizardStore::new());
        let wizard = QuoteWizard::new(WizardId::new());
        store.save(&wizard).await.unwrap();
        let handler = CloseWizardHandler::new(store.clone());

        handler
            .handle(CloseWizardCommand { wizard_id: wizard.id() })
            .await
            .unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn closing_twice_is_fine() {
        let store = Arc::new(InMemoryWizardStore::new());
        let handler = CloseWizardHandler::new(store);
        let cmd = CloseWizardCommand { wizard_id: WizardId::new() };

        handler.handle(cmd.clone()).await.unwrap();
        handler.handle(cmd).await.unwrap();
    }
}
