//! Organization record store contract.

use async_trait::async_trait;
use lex_core::entities::{NewOrganization, Organization};

use crate::error::StoreError;

/// Keyed store holding at most one organization per user.
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// The organization owned by `user_id`, if any.
    async fn fetch_by_user(&self, user_id: &str) -> Result<Option<Organization>, StoreError>;

    /// Insert a new row. Fails if the user already owns one.
    async fn insert(&self, record: &NewOrganization) -> Result<Organization, StoreError>;

    /// Insert or update the row keyed on `record.user_id`.
    async fn upsert_by_user(&self, record: &NewOrganization) -> Result<Organization, StoreError>;
}
