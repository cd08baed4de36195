//! Membership plan identifiers.
//!
//! One-time credit purchases never reach this enum; they land directly as
//! credits at checkout time, outside this service.

use serde::{Deserialize, Serialize};

/// A time-bounded or lifetime entitlement granting unlimited analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipPlan {
    Monthly,
    Quarter,
    Semiannual,
    Annual,
    Lifetime,
}

impl MembershipPlan {
    /// Parses the plan key as stored in the billing table.
    /// Unknown keys are treated as "no plan" by callers.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "monthly" => Some(Self::Monthly),
            "quarter" => Some(Self::Quarter),
            "semiannual" => Some(Self::Semiannual),
            "annual" => Some(Self::Annual),
            "lifetime" => Some(Self::Lifetime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarter => "quarter",
            Self::Semiannual => "semiannual",
            Self::Annual => "annual",
            Self::Lifetime => "lifetime",
        }
    }

    /// Lifetime plans never expire and carry no expiry timestamp.
    pub fn is_lifetime(&self) -> bool {
        matches!(self, Self::Lifetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_plan() {
        for plan in [
            MembershipPlan::Monthly,
            MembershipPlan::Quarter,
            MembershipPlan::Semiannual,
            MembershipPlan::Annual,
            MembershipPlan::Lifetime,
        ] {
            assert_eq!(MembershipPlan::parse(plan.as_str()), Some(plan));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_one_time() {
        assert_eq!(MembershipPlan::parse("one_time"), None);
        assert_eq!(MembershipPlan::parse("MONTHLY"), None);
        assert_eq!(MembershipPlan::parse(""), None);
    }

    #[test]
    fn test_only_lifetime_is_lifetime() {
        assert!(MembershipPlan::Lifetime.is_lifetime());
        assert!(!MembershipPlan::Annual.is_lifetime());
    }
}
