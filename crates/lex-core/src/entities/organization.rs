use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::BillingPlan;
use crate::errors::CoreError;

/// The single business entity owned by a user. `user_id` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Organization {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub hq_location: String,
    pub plan: BillingPlan,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row payload for inserting or upserting an organization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewOrganization {
    pub user_id: String,
    pub name: String,
    pub hq_location: String,
    pub plan: BillingPlan,
}

/// Profile fields a user supplies at sign-up or when completing setup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OrganizationProfile {
    pub name: String,
    pub hq_location: String,
    pub plan: BillingPlan,
}

impl OrganizationProfile {
    /// Require a non-blank name and headquarters location.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if either field is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() || self.hq_location.trim().is_empty() {
            return Err(CoreError::Validation(
                "Please provide your organization name and headquarters.".into(),
            ));
        }
        Ok(())
    }

    /// Attach the owning user id, producing a storable row.
    #[must_use]
    pub fn into_record(self, user_id: impl Into<String>) -> NewOrganization {
        NewOrganization {
            user_id: user_id.into(),
            name: self.name,
            hq_location: self.hq_location,
            plan: self.plan,
        }
    }
}
