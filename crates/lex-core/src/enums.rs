//! Billing plans, agreement statuses, and risk levels.
//!
//! Enums use `snake_case` serialization unless the stored value dictates
//! otherwise (billing plans are persisted as `1_year`, `2_year`, ...).
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// BillingPlan
// ---------------------------------------------------------------------------

/// Subscription plan chosen for an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum BillingPlan {
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "1_year")]
    OneYear,
    #[serde(rename = "2_year")]
    TwoYear,
    #[serde(rename = "5_year")]
    FiveYear,
}

impl BillingPlan {
    pub const ALL: [Self; 4] = [Self::Monthly, Self::OneYear, Self::TwoYear, Self::FiveYear];

    /// Return the string representation used in the `organizations.plan` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::OneYear => "1_year",
            Self::TwoYear => "2_year",
            Self::FiveYear => "5_year",
        }
    }

    /// Human-facing plan name.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::OneYear => "Annual",
            Self::TwoYear => "2 Years",
            Self::FiveYear => "5 Years",
        }
    }

    /// Committed term in months. `None` for the cancel-anytime monthly plan.
    #[must_use]
    pub const fn term_months(self) -> Option<u32> {
        match self {
            Self::Monthly => None,
            Self::OneYear => Some(12),
            Self::TwoYear => Some(24),
            Self::FiveYear => Some(60),
        }
    }
}

impl fmt::Display for BillingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AgreementStatus
// ---------------------------------------------------------------------------

/// Status of an agreement through its lifecycle.
///
/// ```text
/// draft → review → approved → active → expired
///           ↓
///         draft (changes requested)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    Draft,
    Review,
    Active,
    Approved,
    Expired,
}

impl AgreementStatus {
    /// Fixed reporting order used by analytics.
    pub const ALL: [Self; 5] = [
        Self::Active,
        Self::Draft,
        Self::Review,
        Self::Approved,
        Self::Expired,
    ];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Review],
            Self::Review => &[Self::Draft, Self::Approved],
            Self::Approved => &[Self::Active],
            Self::Active => &[Self::Expired],
            Self::Expired => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Active => "active",
            Self::Approved => "approved",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Risk rating attached to an agreement by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Capitalized label, matching the wording the analysis model is asked to emit.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Serde roundtrip tests ---

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(plan_monthly, BillingPlan, BillingPlan::Monthly, "monthly");
    test_serde_roundtrip!(plan_one_year, BillingPlan, BillingPlan::OneYear, "1_year");
    test_serde_roundtrip!(plan_five_year, BillingPlan, BillingPlan::FiveYear, "5_year");
    test_serde_roundtrip!(
        status_approved,
        AgreementStatus,
        AgreementStatus::Approved,
        "approved"
    );
    test_serde_roundtrip!(risk_high, RiskLevel, RiskLevel::High, "high");

    // --- State machine tests ---

    #[test]
    fn agreement_valid_transitions() {
        use AgreementStatus::*;
        assert!(Draft.can_transition_to(Review));
        assert!(Review.can_transition_to(Approved));
        assert!(Review.can_transition_to(Draft));
        assert!(Approved.can_transition_to(Active));
        assert!(Active.can_transition_to(Expired));
    }

    #[test]
    fn agreement_invalid_transitions() {
        use AgreementStatus::*;
        assert!(!Draft.can_transition_to(Active));
        assert!(!Draft.can_transition_to(Approved));
        assert!(!Active.can_transition_to(Draft));
        assert!(!Approved.can_transition_to(Review));
    }

    #[test]
    fn expired_is_terminal() {
        assert!(AgreementStatus::Expired.allowed_next_states().is_empty());
    }

    #[test]
    fn plan_terms() {
        assert_eq!(BillingPlan::Monthly.term_months(), None);
        assert_eq!(BillingPlan::OneYear.term_months(), Some(12));
        assert_eq!(BillingPlan::TwoYear.term_months(), Some(24));
        assert_eq!(BillingPlan::FiveYear.term_months(), Some(60));
        assert_eq!(BillingPlan::OneYear.title(), "Annual");
    }

    #[test]
    fn display_matches_as_str() {
        for plan in BillingPlan::ALL {
            assert_eq!(plan.to_string(), plan.as_str());
        }
        for status in AgreementStatus::ALL {
            assert_eq!(status.to_string(), status.as_str());
        }
        assert_eq!(RiskLevel::Medium.to_string(), "medium");
        assert_eq!(RiskLevel::Medium.label(), "Medium");
    }
}
