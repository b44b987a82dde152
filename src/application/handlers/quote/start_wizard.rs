//! StartWizardHandler - Opens a new quote wizard.

use std::sync::Arc;

use crate::domain::foundation::WizardId;
use crate::domain::quote::QuoteWizard;
use crate::ports::WizardStore;

use super::QuoteHandlerError;

pub struct StartWizardHandler {
    store: Arc<dyn WizardStore>,
}

impl StartWizardHandler {
    pub fn new(store: Arc<dyn WizardStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<QuoteWizard, QuoteHandlerError> {
        let wizard = QuoteWizard::new(WizardId::new());
        self.store.save(&wizard).await?;
        tracing::debug!(wizard_id = %wizard.id(), "Quote wizard started");
        Ok(wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryWizardStore;
    use crate::domain::quote::WizardStep;

    #[tokio::test]
    async fn started_wizard_is_stored_at_step1() {
        let store = Arc::new(InMemoryWizardStore::new());
        let handler = StartWizardHandler::new(store.clone());

        let wizard = handler.handle().await.unwrap();

        assert_eq!(wizard.step(), WizardStep::Step1);
        assert!(store.find(wizard.id()).await.unwrap().is_some());
    }
}
