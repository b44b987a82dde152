//! Optional add-on capabilities and their flat contributions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an optional add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddOnId {
    MobileApp,
    AdvancedAnalytics,
    CustomIntegrations,
    ApiAccess,
    WhiteLabeling,
    DedicatedInfrastructure,
}

/// Monthly price and credit contribution of one add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnDelta {
    pub monthly: u64,
    pub credits: u64,
}

impl AddOnId {
    pub const ALL: [AddOnId; 6] = [
        AddOnId::MobileApp,
        AddOnId::AdvancedAnalytics,
        AddOnId::CustomIntegrations,
        AddOnId::ApiAccess,
        AddOnId::WhiteLabeling,
        AddOnId::DedicatedInfrastructure,
    ];

    /// Flat contribution of this add-on.
    ///
    /// | Add-on | Monthly | Credits |
    /// |--------|---------|---------|
    /// | mobile-app | 50 | 100 |
    /// | advanced-analytics | 200 | 500 |
    /// | custom-integrations | 300 | 750 |
    /// | api-access | 150 | 1000 |
    /// | white-labeling | 400 | 0 |
    /// | dedicated-infrastructure | 750 | 2000 |
    pub fn delta(self) -> AddOnDelta {
        let (monthly, credits) = match self {
            AddOnId::MobileApp => (50, 100),
            AddOnId::AdvancedAnalytics => (200, 500),
            AddOnId::CustomIntegrations => (300, 750),
            AddOnId::ApiAccess => (150, 1000),
            AddOnId::WhiteLabeling => (400, 0),
            AddOnId::DedicatedInfrastructure => (750, 2000),
        };
        AddOnDelta { monthly, credits }
    }

    /// Kebab-case identifier used on the wire.
    pub fn slug(self) -> &'static str {
        match self {
            AddOnId::MobileApp => "mobile-app",
            AddOnId::AdvancedAnalytics => "advanced-analytics",
            AddOnId::CustomIntegrations => "custom-integrations",
            AddOnId::ApiAccess => "api-access",
            AddOnId::WhiteLabeling => "white-labeling",
            AddOnId::DedicatedInfrastructure => "dedicated-infrastructure",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AddOnId::MobileApp => "Mobile App",
            AddOnId::AdvancedAnalytics => "Advanced Analytics",
            AddOnId::CustomIntegrations => "Custom Integrations",
            AddOnId::ApiAccess => "API Access",
            AddOnId::WhiteLabeling => "White Labeling",
            AddOnId::DedicatedInfrastructure => "Dedicated Infrastructure",
        }
    }
}

impl fmt::Display for AddOnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Sums the deltas of every selected add-on.
pub fn total_delta<'a>(add_ons: impl IntoIterator<Item = &'a AddOnId>) -> AddOnDelta {
    add_ons
        .into_iter()
        .map(|id| id.delta())
        .fold(AddOnDelta { monthly: 0, credits: 0 }, |acc, d| AddOnDelta {
            monthly: acc.monthly + d.monthly,
            credits: acc.credits + d.credits,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_app_delta() {
        assert_eq!(
            AddOnId::MobileApp.delta(),
            AddOnDelta {
                monthly: 50,
                credits: 100
            }
        );
    }

    #[test]
    fn slug_matches_serde_name() {
        for id in AddOnId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.slug()));
        }
    }

    #[test]
    fn total_delta_of_nothing_is_zero() {
        let none: [AddOnId; 0] = [];
        assert_eq!(total_delta(&none), AddOnDelta { monthly: 0, credits: 0 });
    }

    #[test]
    fn total_delta_sums_selected() {
        let selected = [AddOnId::MobileApp, AddOnId::ApiAccess];
        assert_eq!(
            total_delta(&selected),
            AddOnDelta {
                monthly: 200,
                credits: 1100
            }
        );
    }
}
