//! Supabase (GoTrue auth + PostgREST) configuration.

use serde::{Deserialize, Serialize};

fn default_organizations_table() -> String {
    "organizations".into()
}

fn default_signup_role() -> String {
    "org_admin".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g., `https://abcd.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public anon key, sent as `apikey` on every request.
    #[serde(default)]
    pub anon_key: String,

    /// Where the email-confirmation link sends the user after sign-up.
    #[serde(default)]
    pub redirect_url: String,

    /// Table holding one organization row per user.
    #[serde(default = "default_organizations_table")]
    pub organizations_table: String,

    /// Role marker embedded in the metadata of newly signed-up users.
    #[serde(default = "default_signup_role")]
    pub signup_role: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            redirect_url: String::new(),
            organizations_table: default_organizations_table(),
            signup_role: default_signup_role(),
        }
    }
}

impl SupabaseConfig {
    /// Check if the project URL and anon key are both present.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// Project URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// GoTrue endpoint root (`{url}/auth/v1`).
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.base_url())
    }

    /// PostgREST endpoint root (`{url}/rest/v1`).
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.base_url())
    }

    /// Redirect target for confirmation emails, if one is configured.
    pub fn redirect_to(&self) -> Option<&str> {
        Some(self.redirect_url.as_str()).filter(|url| !url.is_empty())
    }
}
