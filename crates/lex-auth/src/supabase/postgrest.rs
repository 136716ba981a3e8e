//! PostgREST-backed organization store.

use std::sync::Arc;

use async_trait::async_trait;
use lex_core::entities::{NewOrganization, Organization};
use reqwest::Method;

use super::SupabaseClient;
use super::http::check_response;
use crate::error::StoreError;
use crate::store::OrganizationStore;

const RETURN_ROW: &str = "return=representation";
const UPSERT_ROW: &str = "resolution=merge-duplicates,return=representation";

/// Organizations table behind Supabase's REST API, one row per `user_id`.
pub struct SupabaseOrganizationStore {
    client: Arc<SupabaseClient>,
}

impl SupabaseOrganizationStore {
    #[must_use]
    pub const fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    async fn write(
        &self,
        query: &str,
        prefer: &str,
        record: &NewOrganization,
    ) -> Result<Organization, StoreError> {
        let resp = self
            .client
            .organizations_request(Method::POST, query)
            .header("Prefer", prefer)
            .json(record)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let rows = decode_rows(check_response(resp).await?).await?;
        single_row(rows, &record.user_id)?
            .ok_or_else(|| StoreError::Decode("write returned no row".into()))
    }
}

#[async_trait]
impl OrganizationStore for SupabaseOrganizationStore {
    async fn fetch_by_user(&self, user_id: &str) -> Result<Option<Organization>, StoreError> {
        let query = format!("?user_id=eq.{}&select=*", urlencoding::encode(user_id));
        let resp = self
            .client
            .organizations_request(Method::GET, &query)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let rows = decode_rows(check_response(resp).await?).await?;
        single_row(rows, user_id)
    }

    async fn insert(&self, record: &NewOrganization) -> Result<Organization, StoreError> {
        self.write("", RETURN_ROW, record).await
    }

    async fn upsert_by_user(&self, record: &NewOrganization) -> Result<Organization, StoreError> {
        self.write("?on_conflict=user_id", UPSERT_ROW, record).await
    }
}

async fn decode_rows(resp: reqwest::Response) -> Result<Vec<Organization>, StoreError> {
    resp.json()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// At most one row per owner; more is a data integrity failure.
fn single_row(
    mut rows: Vec<Organization>,
    user_id: &str,
) -> Result<Option<Organization>, StoreError> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        count => Err(StoreError::MultipleRows {
            user_id: user_id.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lex_core::enums::BillingPlan;

    fn org(id: &str) -> Organization {
        Organization {
            id: id.into(),
            user_id: "u1".into(),
            name: "Acme".into(),
            hq_location: "NYC".into(),
            plan: BillingPlan::Monthly,
            created_at: None,
        }
    }

    fn mock_response(body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(200)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[test]
    fn single_row_cardinality() {
        assert_eq!(single_row(vec![], "u1").unwrap(), None);
        assert_eq!(single_row(vec![org("o1")], "u1").unwrap(), Some(org("o1")));
        let err = single_row(vec![org("o1"), org("o2")], "u1").unwrap_err();
        assert!(matches!(err, StoreError::MultipleRows { count: 2, .. }));
    }

    #[tokio::test]
    async fn decode_rows_reads_postgrest_array() {
        let resp = mock_response(
            r#"[{"id":"o1","user_id":"u1","name":"Acme","hq_location":"NYC","plan":"1_year","created_at":"2026-01-01T00:00:00Z"}]"#,
        );
        let rows = decode_rows(resp).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].plan, BillingPlan::OneYear);
    }

    #[tokio::test]
    async fn decode_rows_rejects_unknown_plan() {
        let resp = mock_response(
            r#"[{"id":"o1","user_id":"u1","name":"Acme","hq_location":"NYC","plan":"weekly"}]"#,
        );
        assert!(matches!(
            decode_rows(resp).await.unwrap_err(),
            StoreError::Decode(_)
        ));
    }
}
