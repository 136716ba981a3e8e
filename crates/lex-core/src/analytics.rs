//! Portfolio-level aggregates over a set of agreements.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Agreement;
use crate::enums::{AgreementStatus, RiskLevel};

/// Number of agreements in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusCount {
    pub status: AgreementStatus,
    pub count: usize,
}

/// Dashboard totals for an agreement portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PortfolioSummary {
    pub total: usize,
    /// One entry per status in [`AgreementStatus::ALL`] order, zero-filled.
    pub by_status: Vec<StatusCount>,
    pub total_value: u64,
    pub high_risk: usize,
}

impl PortfolioSummary {
    #[must_use]
    pub fn from_agreements(agreements: &[Agreement]) -> Self {
        let by_status = AgreementStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: agreements.iter().filter(|a| a.status == status).count(),
            })
            .collect();

        Self {
            total: agreements.len(),
            by_status,
            total_value: agreements.iter().map(|a| a.value).sum(),
            high_risk: agreements
                .iter()
                .filter(|a| a.risk == Some(RiskLevel::High))
                .count(),
        }
    }

    #[must_use]
    pub fn count_for(&self, status: AgreementStatus) -> usize {
        self.by_status
            .iter()
            .find(|entry| entry.status == status)
            .map_or(0, |entry| entry.count)
    }
}
