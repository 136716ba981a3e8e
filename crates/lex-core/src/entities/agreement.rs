use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AgreementStatus, RiskLevel};
use crate::errors::CoreError;

/// A contract managed through the status workflow.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Agreement {
    pub id: String,
    pub title: String,
    pub counterparty: String,
    /// Agreement type, e.g. `NDA`, `MSA`, `SaaS`.
    #[serde(rename = "type")]
    pub kind: String,
    pub status: AgreementStatus,
    /// Contract value in whole currency units.
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub risk: Option<RiskLevel>,
}

impl Agreement {
    /// Move the agreement to `next`, enforcing the status state machine.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if `next` is not reachable from
    /// the current status.
    pub fn transition_to(&mut self, next: AgreementStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "agreement".into(),
                id: self.id.clone(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Agreement {
        Agreement {
            id: "agr-1".into(),
            title: "Mutual NDA".into(),
            counterparty: "Globex".into(),
            kind: "NDA".into(),
            status: AgreementStatus::Draft,
            value: 0,
            owner: None,
            effective_date: None,
            expiry_date: None,
            risk: None,
        }
    }

    #[test]
    fn transition_follows_workflow() {
        let mut agreement = draft();
        agreement.transition_to(AgreementStatus::Review).unwrap();
        agreement.transition_to(AgreementStatus::Approved).unwrap();
        agreement.transition_to(AgreementStatus::Active).unwrap();
        assert_eq!(agreement.status, AgreementStatus::Active);
    }

    #[test]
    fn invalid_transition_leaves_status() {
        let mut agreement = draft();
        let err = agreement
            .transition_to(AgreementStatus::Active)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert!(err.to_string().contains("from draft to active"));
        assert_eq!(agreement.status, AgreementStatus::Draft);
    }

    #[test]
    fn kind_serializes_as_type() {
        let json = serde_json::to_value(draft()).unwrap();
        assert_eq!(json["type"], "NDA");
        assert!(json.get("kind").is_none());
    }
}
