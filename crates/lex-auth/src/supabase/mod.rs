//! Supabase adapters: GoTrue for identity, PostgREST for organizations.
//!
//! Both share one [`SupabaseClient`], so row-level-security requests made by
//! the store carry the access token of whoever the auth adapter signed in.

mod gotrue;
mod http;
mod postgrest;

pub use gotrue::SupabaseAuth;
pub use postgrest::SupabaseOrganizationStore;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use lex_config::SupabaseConfig;
use reqwest::{Method, RequestBuilder};

use crate::error::ProviderError;

/// Connection to one Supabase project.
#[derive(Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    auth_url: String,
    rest_url: String,
    anon_key: String,
    organizations_table: String,
    access_token: RwLock<Option<String>>,
}

impl SupabaseClient {
    /// # Errors
    ///
    /// Returns `ProviderError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &SupabaseConfig, timeout: Duration) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("lexcorp/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(format!("build HTTP client: {e}")))?;
        Ok(Self {
            http,
            auth_url: config.auth_url(),
            rest_url: config.rest_url(),
            anon_key: config.anon_key.clone(),
            organizations_table: config.organizations_table.clone(),
            access_token: RwLock::new(None),
        })
    }

    /// Token sent as `Bearer` on data requests. `None` reverts to the anon key.
    pub fn set_access_token(&self, token: Option<String>) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn bearer(&self) -> String {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    /// Request against `{url}/auth/v1/{path}`.
    fn auth_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{path}", self.auth_url))
            .header("apikey", &self.anon_key)
    }

    /// Request against the organizations table, authorized as the current user.
    fn organizations_request(&self, method: Method, query: &str) -> RequestBuilder {
        self.http
            .request(
                method,
                format!("{}/{}{query}", self.rest_url, self.organizations_table),
            )
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
    }
}
