//! Answer record accumulated by the quote wizard.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::pricing::{AddOnId, Industry, TierPosition};

/// How involved the customer's workflows are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowComplexity {
    Simple,
    Moderate,
    Complex,
}

/// Requested security posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Standard,
    Enhanced,
    Enterprise,
}

/// A compliance regime the customer must satisfy.
///
/// `None` is an explicit "no compliance requirements" answer and is
/// exclusive with every other member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceNeed {
    Gdpr,
    Soc2,
    Hipaa,
    None,
}

impl ComplianceNeed {
    pub const ALL: [ComplianceNeed; 4] = [
        ComplianceNeed::Gdpr,
        ComplianceNeed::Soc2,
        ComplianceNeed::Hipaa,
        ComplianceNeed::None,
    ];
}

impl std::str::FromStr for ComplianceNeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gdpr" => Ok(ComplianceNeed::Gdpr),
            "soc2" => Ok(ComplianceNeed::Soc2),
            "hipaa" => Ok(ComplianceNeed::Hipaa),
            "none" => Ok(ComplianceNeed::None),
            other => Err(format!("unknown compliance need '{}'", other)),
        }
    }
}

/// Selected compliance needs.
///
/// The set can only change through [`select`](Self::select),
/// [`deselect`](Self::deselect) and [`toggle`](Self::toggle), which keep
/// `none` exclusive with every other member at all times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComplianceNeeds(BTreeSet<ComplianceNeed>);

impl ComplianceNeeds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a need. Selecting `none` clears everything else; selecting
    /// anything else drops `none`.
    pub fn select(&mut self, need: ComplianceNeed) {
        if need == ComplianceNeed::None {
            self.0.clear();
        } else {
            self.0.remove(&ComplianceNeed::None);
        }
        self.0.insert(need);
    }

    pub fn deselect(&mut self, need: ComplianceNeed) {
        self.0.remove(&need);
    }

    /// Flips a checkbox. Returns whether the need is selected afterwards.
    pub fn toggle(&mut self, need: ComplianceNeed) -> bool {
        if self.contains(need) {
            self.deselect(need);
            false
        } else {
            self.select(need);
            true
        }
    }

    pub fn contains(&self, need: ComplianceNeed) -> bool {
        self.0.contains(&need)
    }

    pub fn iter(&self) -> impl Iterator<Item = ComplianceNeed> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ComplianceNeed> for ComplianceNeeds {
    fn from_iter<I: IntoIterator<Item = ComplianceNeed>>(iter: I) -> Self {
        let mut needs = ComplianceNeeds::new();
        for need in iter {
            needs.select(need);
        }
        needs
    }
}

impl<'de> Deserialize<'de> for ComplianceNeeds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Routed through `select` so a payload can never smuggle in `none`
        // alongside another member. Later entries win.
        let raw = Vec::<ComplianceNeed>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// Level of support included with the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportLevel {
    PlatformSupport,
    ConciergeSupport,
}

/// Preferred call-back slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredTime {
    Morning,
    Midday,
    Afternoon,
    Evening,
}

impl PreferredTime {
    pub fn label(self) -> &'static str {
        match self {
            PreferredTime::Morning => "9:00 AM - 12:00 PM",
            PreferredTime::Midday => "12:00 PM - 2:00 PM",
            PreferredTime::Afternoon => "2:00 PM - 5:00 PM",
            PreferredTime::Evening => "5:00 PM - 7:00 PM",
        }
    }
}

/// Timezone the call-back slot is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timezone {
    #[serde(rename = "ET")]
    Eastern,
    #[serde(rename = "CT")]
    Central,
    #[serde(rename = "MT")]
    Mountain,
    #[serde(rename = "PT")]
    Pacific,
    #[serde(rename = "GMT")]
    Greenwich,
    #[serde(rename = "CET")]
    CentralEuropean,
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timezone::Eastern => "ET",
            Timezone::Central => "CT",
            Timezone::Mountain => "MT",
            Timezone::Pacific => "PT",
            Timezone::Greenwich => "GMT",
            Timezone::CentralEuropean => "CET",
        };
        f.write_str(s)
    }
}

/// Everything the customer has entered so far.
///
/// Sliders have no empty state and start at position 1. Selections that
/// must be made explicitly are `Option`s starting at `None`; required text
/// fields start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormAnswers {
    // Step 1
    pub industry: Option<Industry>,
    pub team_size_tier: TierPosition,

    // Step 2
    pub operating_entities_tier: TierPosition,
    pub non_operating_entities_tier: TierPosition,
    pub data_sources_tier: TierPosition,

    // Step 3
    pub workflow_complexity: Option<WorkflowComplexity>,
    pub security_level: Option<SecurityLevel>,
    pub compliance_needs: ComplianceNeeds,

    // Step 4
    pub add_ons: BTreeSet<AddOnId>,
    pub support_level: Option<SupportLevel>,

    // Step 5
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub phone: Option<String>,
    pub preferred_time: Option<PreferredTime>,
    pub timezone: Option<Timezone>,
    pub additional_notes: Option<String>,
}

impl FormAnswers {
    /// Full contact name, trimmed.
    pub fn contact_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[cfg(test)]
impl FormAnswers {
    /// A record that passes every validator.
    ///
    /// Only available in test builds.
    pub fn test_fixture() -> Self {
        Self {
            industry: Some(Industry::Enterprise),
            support_level: Some(SupportLevel::ConciergeSupport),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            company: "Analytical Engines".into(),
            preferred_time: Some(PreferredTime::Afternoon),
            timezone: Some(Timezone::Greenwich),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_put_sliders_at_first_position() {
        let answers = FormAnswers::default();
        assert_eq!(answers.team_size_tier, TierPosition::FIRST);
        assert_eq!(answers.data_sources_tier, TierPosition::FIRST);
        assert!(answers.industry.is_none());
        assert!(answers.support_level.is_none());
        assert!(answers.email.is_empty());
    }

    #[test]
    fn selecting_none_leaves_singleton() {
        let mut needs = ComplianceNeeds::new();
        needs.select(ComplianceNeed::Gdpr);
        needs.select(ComplianceNeed::Hipaa);

        needs.select(ComplianceNeed::None);

        assert_eq!(needs.iter().collect::<Vec<_>>(), vec![ComplianceNeed::None]);
    }

    #[test]
    fn selecting_other_need_removes_none() {
        let mut needs = ComplianceNeeds::new();
        needs.select(ComplianceNeed::None);

        needs.select(ComplianceNeed::Soc2);

        assert!(!needs.contains(ComplianceNeed::None));
        assert!(needs.contains(ComplianceNeed::Soc2));
        assert_eq!(needs.len(), 1);
    }

    #[test]
    fn toggle_flips_selection() {
        let mut needs = ComplianceNeeds::new();
        assert!(needs.toggle(ComplianceNeed::Gdpr));
        assert!(!needs.toggle(ComplianceNeed::Gdpr));
        assert!(needs.is_empty());
    }

    #[test]
    fn deserializing_mixed_set_keeps_exclusivity() {
        let needs: ComplianceNeeds = serde_json::from_str(r#"["gdpr", "none"]"#).unwrap();
        assert_eq!(needs.iter().collect::<Vec<_>>(), vec![ComplianceNeed::None]);

        let needs: ComplianceNeeds = serde_json::from_str(r#"["none", "hipaa"]"#).unwrap();
        assert_eq!(needs.iter().collect::<Vec<_>>(), vec![ComplianceNeed::Hipaa]);
    }

    #[test]
    fn answers_deserialize_from_partial_payload() {
        let answers: FormAnswers = serde_json::from_str(
            r#"{"industry": "enterprise", "team_size_tier": 2, "add_ons": ["mobile-app"]}"#,
        )
        .unwrap();
        assert_eq!(answers.industry, Some(Industry::Enterprise));
        assert_eq!(answers.team_size_tier.get(), 2);
        assert!(answers.add_ons.contains(&AddOnId::MobileApp));
        assert_eq!(answers.operating_entities_tier, TierPosition::FIRST);
    }

    #[test]
    fn answers_reject_out_of_range_slider() {
        let result = serde_json::from_str::<FormAnswers>(r#"{"team_size_tier": 5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn timezone_uses_short_codes() {
        assert_eq!(serde_json::to_string(&Timezone::Eastern).unwrap(), "\"ET\"");
        assert_eq!(Timezone::CentralEuropean.to_string(), "CET");
    }

    #[test]
    fn compliance_need_parses_case_insensitively() {
        assert_eq!("SOC2".parse::<ComplianceNeed>(), Ok(ComplianceNeed::Soc2));
        assert!("pci".parse::<ComplianceNeed>().is_err());
    }

    #[test]
    fn contact_name_joins_trimmed_parts() {
        let answers = FormAnswers {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            ..FormAnswers::default()
        };
        assert_eq!(answers.contact_name(), "Ada Lovelace");
    }
}
