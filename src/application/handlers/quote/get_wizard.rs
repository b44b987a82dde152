//! GetWizardHandler - Query handler for the current wizard state.

use std::sync::Arc;

use crate::domain::foundation::WizardId;
use crate::domain::quote::QuoteWizard;
use crate::ports::WizardStore;

use super::{load_wizard, QuoteHandlerError};

#[derive(Debug, Clone)]
pub struct GetWizardQuery {
    pub wizard_id: WizardId,
}

pub struct GetWizardHandler {
    store: Arc<dyn WizardStore>,
}

impl GetWizardHandler {
    pub fn new(store: Arc<dyn WizardStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetWizardQuery) -> Result<QuoteWizard, QuoteHandlerError> {
        load_wizard(self.store.as_ref(), query.wizard_id).await
    }
}
