//! Quote pricing estimator.
//!
//! Turns a snapshot of wizard answers into monthly price, credits and
//! concierge hours. Pure and total: unset fields contribute zero instead of
//! failing.

use serde::{Deserialize, Serialize};

use super::add_on::{total_delta, AddOnId};
use super::industry::{Industry, IndustryPricing};
use super::tier::{TierRange, TierTable};
use crate::domain::quote::{FormAnswers, SupportLevel};

/// Divisor applied to range upper bounds when deriving multipliers.
const SCALING_DIVISOR: f64 = 10.0;

/// Derived quote figures. Never persisted, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub industry: Option<Industry>,
    /// One-time onboarding price, unscaled.
    pub base_price: u64,
    /// Final monthly price after add-ons and scaling.
    pub monthly_price: u64,
    /// Final monthly credit allotment.
    pub credits: u64,
    /// Final monthly concierge hours.
    pub concierge_hours: u64,
    pub entity_multiplier: f64,
    pub team_multiplier: f64,
    pub team_size: TierRange,
    pub operating_entities: TierRange,
    pub non_operating_entities: TierRange,
    pub add_ons: Vec<AddOnId>,
    pub support_level: Option<SupportLevel>,
}

impl PricingResult {
    /// Human-readable lines for the result summary panel.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Industry: {}",
                self.industry
                    .map(|i| i.display_name())
                    .unwrap_or("Not selected")
            ),
            format!("Team size: {}", self.team_size),
            format!("Operating entities: {}", self.operating_entities),
            format!("Non-operating entities: {}", self.non_operating_entities),
        ];
        if !self.add_ons.is_empty() {
            let names: Vec<&str> = self.add_ons.iter().map(|a| a.display_name()).collect();
            lines.push(format!("Add-ons: {}", names.join(", ")));
        }
        lines.push(format!("Monthly price: ${}", self.monthly_price));
        lines.push(format!("Credits: {}", self.credits));
        lines.push(format!("Concierge hours: {}", self.concierge_hours));
        lines
    }
}

/// Estimates pricing for a set of answers.
///
/// 1. Industry figures (zero when unset).
/// 2. Add-on deltas summed.
/// 3. `entity = max(1, (operating.high + non_operating.high) / 10)`.
/// 4. `team = max(1, team_size.high / 10)`.
/// 5. Monthly price scales by both multipliers, credits and concierge hours
///    by the entity multiplier only. Results are rounded to the nearest
///    whole number, halves rounding up.
pub fn estimate(answers: &FormAnswers) -> PricingResult {
    let pricing = IndustryPricing::for_selection(answers.industry);
    let add_on = total_delta(&answers.add_ons);

    let team_size = TierTable::TeamSize.range(answers.team_size_tier);
    let operating_entities = TierTable::OperatingEntities.range(answers.operating_entities_tier);
    let non_operating_entities =
        TierTable::NonOperatingEntities.range(answers.non_operating_entities_tier);

    let entity_multiplier = multiplier(operating_entities.high + non_operating_entities.high);
    let team_multiplier = multiplier(team_size.high);

    let monthly_price = round_whole(
        (pricing.monthly_price + add_on.monthly) as f64 * entity_multiplier * team_multiplier,
    );
    let credits = round_whole((pricing.credits + add_on.credits) as f64 * entity_multiplier);
    let concierge_hours = round_whole(pricing.concierge_hours as f64 * entity_multiplier);

    PricingResult {
        industry: answers.industry,
        base_price: pricing.base_price,
        monthly_price,
        credits,
        concierge_hours,
        entity_multiplier,
        team_multiplier,
        team_size,
        operating_entities,
        non_operating_entities,
        add_ons: answers.add_ons.iter().copied().collect(),
        support_level: answers.support_level,
    }
}

fn multiplier(upper_bound: u32) -> f64 {
    (upper_bound as f64 / SCALING_DIVISOR).max(1.0)
}

// Inputs are never negative, so half-away-from-zero is half-up.
fn round_whole(value: f64) -> u64 {
    value.round() as u64
}
