//! Risk classification of free-form model output.
//!
//! Plain substring search, "High" before "Medium", case-sensitive. A reply
//! such as "not High risk" is therefore rated High.

use lex_core::enums::RiskLevel;

use crate::{RISK_DEFAULT_REASON, RiskAssessment};

/// Rate `output`. The whole reply becomes the reason; an empty or missing
/// reply is Low with a stock reason.
#[must_use]
pub fn classify(output: Option<&str>) -> RiskAssessment {
    let text = output.unwrap_or_default();
    let level = if text.contains(RiskLevel::High.label()) {
        RiskLevel::High
    } else if text.contains(RiskLevel::Medium.label()) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };
    let reason = if text.is_empty() {
        RISK_DEFAULT_REASON.to_string()
    } else {
        text.to_string()
    };
    RiskAssessment { level, reason }
}
