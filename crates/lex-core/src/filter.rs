//! Agreement list filtering (status tab + free-text search).

use serde::{Deserialize, Serialize};

use crate::entities::Agreement;
use crate::enums::AgreementStatus;

/// Criteria for narrowing an agreement list.
///
/// `status: None` means "all statuses". `search` is matched
/// case-insensitively as a substring of the title or counterparty; an empty
/// search matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementFilter {
    pub status: Option<AgreementStatus>,
    pub search: String,
}

impl AgreementFilter {
    #[must_use]
    pub fn matches(&self, agreement: &Agreement) -> bool {
        let status_ok = self.status.is_none_or(|status| agreement.status == status);
        if !status_ok {
            return false;
        }
        let needle = self.search.to_lowercase();
        agreement.title.to_lowercase().contains(&needle)
            || agreement.counterparty.to_lowercase().contains(&needle)
    }

    /// Borrow the matching agreements, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, agreements: &'a [Agreement]) -> Vec<&'a Agreement> {
        agreements.iter().filter(|a| self.matches(a)).collect()
    }
}
