//! Industry selection and the per-industry pricing table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of organization requesting a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    FamilyOffice,
    Enterprise,
    InvestmentFirms,
    ConsultingFirm,
    IndividualAccount,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::FamilyOffice,
        Industry::Enterprise,
        Industry::InvestmentFirms,
        Industry::ConsultingFirm,
        Industry::IndividualAccount,
    ];

    /// Returns the display name for this industry.
    pub fn display_name(&self) -> &'static str {
        match self {
            Industry::FamilyOffice => "Family Office",
            Industry::Enterprise => "Enterprise",
            Industry::InvestmentFirms => "Investment Firms",
            Industry::ConsultingFirm => "Consulting Firm",
            Industry::IndividualAccount => "Individual Account",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Starting figures for an industry before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryPricing {
    /// One-time onboarding price in USD.
    pub base_price: u64,
    /// Monthly subscription price in USD.
    pub monthly_price: u64,
    /// Monthly credit allotment.
    pub credits: u64,
    /// Monthly concierge hours.
    pub concierge_hours: u64,
}

impl IndustryPricing {
    /// Get the pricing for an industry.
    ///
    /// | Industry | Base | Monthly | Credits | Concierge hours |
    /// |----------|------|---------|---------|-----------------|
    /// | Family Office | 5000 | 2500 | 5000 | 80 |
    /// | Enterprise | 2500 | 1000 | 2500 | 40 |
    /// | Investment Firms | 4000 | 2000 | 4000 | 60 |
    /// | Consulting Firm | 1500 | 750 | 1500 | 20 |
    /// | Individual Account | 250 | 100 | 200 | 5 |
    pub fn for_industry(industry: Industry) -> Self {
        match industry {
            Industry::FamilyOffice => Self::new(5000, 2500, 5000, 80),
            Industry::Enterprise => Self::new(2500, 1000, 2500, 40),
            Industry::InvestmentFirms => Self::new(4000, 2000, 4000, 60),
            Industry::ConsultingFirm => Self::new(1500, 750, 1500, 20),
            Industry::IndividualAccount => Self::new(250, 100, 200, 5),
        }
    }

    /// Pricing used when no industry has been chosen yet.
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Pricing for an optional selection.
    pub fn for_selection(industry: Option<Industry>) -> Self {
        industry.map(Self::for_industry).unwrap_or(Self::zero())
    }

    const fn new(base_price: u64, monthly_price: u64, credits: u64, concierge_hours: u64) -> Self {
        Self {
            base_price,
            monthly_price,
            credits,
            concierge_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enterprise_pricing_matches_table() {
        let p = IndustryPricing::for_industry(Industry::Enterprise);
        assert_eq!(p.monthly_price, 1000);
        assert_eq!(p.credits, 2500);
        assert_eq!(p.concierge_hours, 40);
    }

    #[test]
    fn individual_account_pricing_matches_table() {
        let p = IndustryPricing::for_industry(Industry::IndividualAccount);
        assert_eq!(p, IndustryPricing::new(250, 100, 200, 5));
    }

    #[test]
    fn unset_industry_contributes_nothing() {
        assert_eq!(IndustryPricing::for_selection(None), IndustryPricing::zero());
    }

    #[test]
    fn industry_serializes_kebab_case() {
        let json = serde_json::to_string(&Industry::FamilyOffice).unwrap();
        assert_eq!(json, "\"family-office\"");
        let parsed: Industry = serde_json::from_str("\"investment-firms\"").unwrap();
        assert_eq!(parsed, Industry::InvestmentFirms);
    }

    #[test]
    fn every_industry_has_non_zero_pricing() {
        for industry in Industry::ALL {
            let p = IndustryPricing::for_industry(industry);
            assert!(p.monthly_price > 0, "{} has no monthly price", industry);
        }
    }
}
