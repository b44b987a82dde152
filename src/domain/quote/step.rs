//! Wizard step state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::FormField;
use crate::domain::foundation::StateMachine;

/// Position of the quote wizard.
///
/// Five linear form steps followed by the terminal `Submitted` state.
/// Resetting is not a transition; it replaces the wizard's state wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Step1,
    Step2,
    Step3,
    Step4,
    Step5,
    Submitted,
}

impl WizardStep {
    /// The steps that collect answers, in order.
    pub const FORM_STEPS: [WizardStep; 5] = [
        WizardStep::Step1,
        WizardStep::Step2,
        WizardStep::Step3,
        WizardStep::Step4,
        WizardStep::Step5,
    ];

    /// 1-based step number; `Submitted` is 6.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Step1 => 1,
            WizardStep::Step2 => 2,
            WizardStep::Step3 => 3,
            WizardStep::Step4 => 4,
            WizardStep::Step5 => 5,
            WizardStep::Submitted => 6,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Step1 => "Your Organization",
            WizardStep::Step2 => "Entity Structure",
            WizardStep::Step3 => "Requirements",
            WizardStep::Step4 => "Plan & Add-ons",
            WizardStep::Step5 => "Contact Details",
            WizardStep::Submitted => "Request Received",
        }
    }

    /// The step `Next` leads to. `Step5` only leaves through submission.
    pub fn following(self) -> Option<WizardStep> {
        match self {
            WizardStep::Step1 => Some(WizardStep::Step2),
            WizardStep::Step2 => Some(WizardStep::Step3),
            WizardStep::Step3 => Some(WizardStep::Step4),
            WizardStep::Step4 => Some(WizardStep::Step5),
            WizardStep::Step5 | WizardStep::Submitted => None,
        }
    }

    /// The step `Back` leads to.
    pub fn preceding(self) -> Option<WizardStep> {
        match self {
            WizardStep::Step2 => Some(WizardStep::Step1),
            WizardStep::Step3 => Some(WizardStep::Step2),
            WizardStep::Step4 => Some(WizardStep::Step3),
            WizardStep::Step5 => Some(WizardStep::Step4),
            WizardStep::Step1 | WizardStep::Submitted => None,
        }
    }

    pub fn is_final_form_step(self) -> bool {
        self == WizardStep::Step5
    }

    /// Fields collected on this step.
    pub fn fields(self) -> &'static [FormField] {
        match self {
            WizardStep::Step1 => &[FormField::Industry, FormField::TeamSizeTier],
            WizardStep::Step2 => &[
                FormField::OperatingEntitiesTier,
                FormField::NonOperatingEntitiesTier,
                FormField::DataSourcesTier,
            ],
            WizardStep::Step3 => &[
                FormField::WorkflowComplexity,
                FormField::SecurityLevel,
                FormField::ComplianceNeeds,
            ],
            WizardStep::Step4 => &[FormField::AddOns, FormField::SupportLevel],
            WizardStep::Step5 => &[
                FormField::FirstName,
                FormField::LastName,
                FormField::Email,
                FormField::Company,
                FormField::Phone,
                FormField::PreferredTime,
                FormField::Timezone,
                FormField::AdditionalNotes,
            ],
            WizardStep::Submitted => &[],
        }
    }
}

impl StateMachine for WizardStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        let mut targets: Vec<Self> = self.preceding().into_iter().collect();
        targets.extend(self.following());
        if self.is_final_form_step() {
            targets.push(WizardStep::Submitted);
        }
        targets
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::Submitted => f.write_str("submitted"),
            step => write!(f, "step {}", step.number()),
        }
    }
}
