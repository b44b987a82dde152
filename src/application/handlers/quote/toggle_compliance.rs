//! ToggleComplianceHandler - Flips one compliance checkbox.

use std::sync::Arc;

use crate::domain::foundation::WizardId;
use crate::domain::quote::{ComplianceNeed, QuoteWizard};
use crate::ports::WizardStore;

use super::{update_wizard, QuoteHandlerError};

#[derive(Debug, Clone)]
pub struct ToggleComplianceCommand {
    pub wizard_id: WizardId,
    pub need: ComplianceNeed,
}

#[derive(Debug, Clone)]
pub struct ToggleComplianceResult {
    pub wizard: QuoteWizard,
    /// Whether the need is selected after the toggle.
    pub selected: bool,
}

pub struct ToggleComplianceHandler {
    store: Arc<dyn WizardStore>,
}

impl ToggleComplianceHandler {
    pub fn new(store: Arc<dyn WizardStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ToggleComplianceCommand,
    ) -> Result<ToggleComplianceResult, QuoteHandlerError> {
        let need = cmd.need;
        let (wizard, toggled) = update_wizard(self.store.as_ref(), cmd.wizard_id, |wizard| {
            wizard.toggle_compliance(need)
        })
        .await?;
        let selected = toggled?;
        Ok(ToggleComplianceResult { wizard, selected })
    }
}
