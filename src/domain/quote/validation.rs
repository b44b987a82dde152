//! Field validators for the quote wizard.
//!
//! One validator per field, looked up by [`FormField`]. Step validation runs
//! the validators for the fields on that step; submission runs all of them.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::answers::FormAnswers;
use super::step::WizardStep;
use crate::domain::foundation::ValidationError;

const MAX_NOTES_LEN: usize = 2000;
const MIN_PHONE_LEN: usize = 7;
const MAX_PHONE_LEN: usize = 20;

/// Every field the wizard collects, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Industry,
    TeamSizeTier,
    OperatingEntitiesTier,
    NonOperatingEntitiesTier,
    DataSourcesTier,
    WorkflowComplexity,
    SecurityLevel,
    ComplianceNeeds,
    AddOns,
    SupportLevel,
    FirstName,
    LastName,
    Email,
    Company,
    Phone,
    PreferredTime,
    Timezone,
    AdditionalNotes,
}

impl FormField {
    pub const ALL: [FormField; 18] = [
        FormField::Industry,
        FormField::TeamSizeTier,
        FormField::OperatingEntitiesTier,
        FormField::NonOperatingEntitiesTier,
        FormField::DataSourcesTier,
        FormField::WorkflowComplexity,
        FormField::SecurityLevel,
        FormField::ComplianceNeeds,
        FormField::AddOns,
        FormField::SupportLevel,
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Company,
        FormField::Phone,
        FormField::PreferredTime,
        FormField::Timezone,
        FormField::AdditionalNotes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Industry => "industry",
            FormField::TeamSizeTier => "team_size_tier",
            FormField::OperatingEntitiesTier => "operating_entities_tier",
            FormField::NonOperatingEntitiesTier => "non_operating_entities_tier",
            FormField::DataSourcesTier => "data_sources_tier",
            FormField::WorkflowComplexity => "workflow_complexity",
            FormField::SecurityLevel => "security_level",
            FormField::ComplianceNeeds => "compliance_needs",
            FormField::AddOns => "add_ons",
            FormField::SupportLevel => "support_level",
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Email => "email",
            FormField::Company => "company",
            FormField::Phone => "phone",
            FormField::PreferredTime => "preferred_time",
            FormField::Timezone => "timezone",
            FormField::AdditionalNotes => "additional_notes",
        }
    }

    /// The wizard step that collects this field.
    pub fn step(self) -> WizardStep {
        WizardStep::FORM_STEPS
            .into_iter()
            .find(|step| step.fields().contains(&self))
            .unwrap_or(WizardStep::Step5)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline error messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops errors whose field now passes validation.
    pub fn retain_failing(&mut self, answers: &FormAnswers) {
        self.0
            .retain(|field, _| validate_field(*field, answers).is_err());
    }
}

type FieldValidator = fn(&FormAnswers) -> Result<(), ValidationError>;

static VALIDATORS: Lazy<HashMap<FormField, FieldValidator>> = Lazy::new(|| {
    let mut table: HashMap<FormField, FieldValidator> = HashMap::new();
    table.insert(FormField::Industry, |a| {
        require_selected("industry", a.industry.is_some())
    });
    table.insert(FormField::SupportLevel, |a| {
        require_selected("support_level", a.support_level.is_some())
    });
    table.insert(FormField::FirstName, |a| require_text("first_name", &a.first_name));
    table.insert(FormField::LastName, |a| require_text("last_name", &a.last_name));
    table.insert(FormField::Company, |a| require_text("company", &a.company));
    table.insert(FormField::Email, |a| validate_email(&a.email));
    table.insert(FormField::Phone, |a| validate_phone(a.phone.as_deref()));
    table.insert(FormField::PreferredTime, |a| {
        require_selected("preferred_time", a.preferred_time.is_some())
    });
    table.insert(FormField::Timezone, |a| {
        require_selected("timezone", a.timezone.is_some())
    });
    table.insert(FormField::AdditionalNotes, |a| {
        validate_notes(a.additional_notes.as_deref())
    });
    table
});

/// Validates a single field. Fields without a validator (sliders, optional
/// selections) always pass.
pub fn validate_field(field: FormField, answers: &FormAnswers) -> Result<(), ValidationError> {
    match VALIDATORS.get(&field) {
        Some(validator) => validator(answers),
        None => Ok(()),
    }
}

/// Validates a subset of fields, collecting every failure.
pub fn validate_fields(fields: &[FormField], answers: &FormAnswers) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for field in fields {
        if let Err(err) = validate_field(*field, answers) {
            errors.insert(*field, message_for(&err));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the fields that belong to one step.
pub fn validate_step(step: WizardStep, answers: &FormAnswers) -> Result<(), FieldErrors> {
    validate_fields(step.fields(), answers)
}

/// Validates the whole record.
pub fn validate_all(answers: &FormAnswers) -> Result<(), FieldErrors> {
    validate_fields(&FormField::ALL, answers)
}

fn message_for(err: &ValidationError) -> String {
    match err {
        ValidationError::EmptyField { .. } => "This field is required".to_string(),
        ValidationError::OutOfRange { min, max, .. } => {
            format!("Must be between {} and {}", min, max)
        }
        ValidationError::InvalidFormat { reason, .. } => reason.clone(),
    }
}

fn require_selected(field: &str, selected: bool) -> Result<(), ValidationError> {
    if selected {
        Ok(())
    } else {
        Err(ValidationError::empty_field(field))
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::empty_field(field))
    } else {
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    require_text("email", email)?;

    let invalid = || ValidationError::invalid_format("email", "Please enter a valid email address");
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

fn validate_phone(phone: Option<&str>) -> Result<(), ValidationError> {
    let phone = match phone.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => return Ok(()),
    };
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')');
    let len = phone.chars().count();
    if !(MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&len) || !phone.chars().all(allowed) {
        return Err(ValidationError::invalid_format(
            "phone",
            "Please enter a valid phone number",
        ));
    }
    Ok(())
}

fn validate_notes(notes: Option<&str>) -> Result<(), ValidationError> {
    match notes {
        Some(n) if n.chars().count() > MAX_NOTES_LEN => Err(ValidationError::invalid_format(
            "additional_notes",
            format!("Must be at most {} characters", MAX_NOTES_LEN),
        )),
        _ => Ok(()),
    }
}
