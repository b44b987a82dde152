//! Quote wizard domain module.
//!
//! # Module Structure
//!
//! - `answers` - The answer record and its selection types
//! - `validation` - Per-field validators, step and whole-record validation
//! - `step` - WizardStep state machine
//! - `wizard` - QuoteWizard aggregate
//! - `errors` - Wizard error types

mod answers;
mod errors;
mod step;
mod validation;
mod wizard;

pub use answers::{
    ComplianceNeed, ComplianceNeeds, FormAnswers, PreferredTime, SecurityLevel, SupportLevel,
    Timezone, WorkflowComplexity,
};
pub use errors::WizardError;
pub use step::WizardStep;
pub use validation::{
    validate_all, validate_field, validate_fields, validate_step, FieldErrors, FormField,
};
pub use wizard::{QuoteWizard, SubmissionTicket};
