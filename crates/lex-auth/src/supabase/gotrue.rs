//! GoTrue (`/auth/v1`) identity provider.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use lex_core::entities::{Session, User};
use reqwest::Method;
use serde::Deserialize;

use super::SupabaseClient;
use super::http::check_response;
use crate::error::ProviderError;
use crate::jwt;
use crate::provider::{
    IdentityProvider, SessionBroadcaster, SessionChanges, SignUpOptions, SignUpResponse,
};
use crate::session_store::SessionStore;

/// Refresh the access token when it expires within this many seconds.
const REFRESH_BUFFER_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct UserBody {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserBody> for User {
    fn from(body: UserBody) -> Self {
        Self {
            id: body.id,
            email: body.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserBody,
}

impl SessionBody {
    /// Absolute expiry: explicit `expires_at`, then the JWT `exp` claim,
    /// then `expires_in` from now.
    fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| jwt::decode_expiry(&self.access_token).ok())
            .or_else(|| {
                self.expires_in
                    .map(|secs| Utc::now() + TimeDelta::seconds(secs))
            })
    }

    fn into_session(self) -> Session {
        let expires_at = self.expiry();
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// Sign-up answers with a full session when confirmation is disabled and
/// with the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(SessionBody),
    User(UserBody),
}

/// Identity provider backed by Supabase Auth.
///
/// The session survives between processes through a [`SessionStore`].
pub struct SupabaseAuth {
    client: Arc<SupabaseClient>,
    sessions: SessionStore,
    changes: SessionBroadcaster,
    current: Mutex<Option<Session>>,
}

impl SupabaseAuth {
    #[must_use]
    pub fn new(client: Arc<SupabaseClient>, sessions: SessionStore) -> Self {
        Self {
            client,
            sessions,
            changes: SessionBroadcaster::default(),
            current: Mutex::new(None),
        }
    }

    fn cached(&self) -> Option<Session> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.is_none() {
            *current = self.sessions.load();
        }
        current.clone()
    }

    /// Make `session` current: persist it, authorize data requests with it,
    /// and announce it.
    fn adopt(&self, session: Option<Session>) -> Result<(), ProviderError> {
        match &session {
            Some(session) => self.sessions.store(session)?,
            None => self.sessions.delete()?,
        }
        self.client
            .set_access_token(session.as_ref().map(|s| s.access_token.clone()));
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = session.clone();
        self.changes.emit(session);
        Ok(())
    }

    async fn grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<Session, ProviderError> {
        let resp = self
            .client
            .auth_request(Method::POST, &format!("token?grant_type={grant_type}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let body: SessionBody = check_response(resp)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(body.into_session())
    }

    async fn refresh(&self, session: &Session) -> Result<Option<Session>, ProviderError> {
        let Some(refresh_token) = &session.refresh_token else {
            tracing::debug!("session expired without a refresh token");
            self.adopt(None)?;
            return Ok(None);
        };

        match self
            .grant(
                "refresh_token",
                serde_json::json!({ "refresh_token": refresh_token }),
            )
            .await
        {
            Ok(refreshed) => {
                tracing::debug!(user_id = %refreshed.user.id, "access token refreshed");
                self.adopt(Some(refreshed.clone()))?;
                Ok(Some(refreshed))
            }
            Err(ProviderError::Api { status, message }) if (400..500).contains(&status) => {
                tracing::warn!(status, %message, "refresh token rejected; signing out locally");
                self.adopt(None)?;
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn current_session(&self) -> Result<Option<Session>, ProviderError> {
        let Some(session) = self.cached() else {
            return Ok(None);
        };
        if session.is_near_expiry(REFRESH_BUFFER_SECS) {
            return self.refresh(&session).await;
        }
        self.client
            .set_access_token(Some(session.access_token.clone()));
        Ok(Some(session))
    }

    fn subscribe(&self) -> SessionChanges {
        self.changes.subscribe()
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), ProviderError> {
        let session = self
            .grant(
                "password",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        tracing::info!(user_id = %session.user.id, "signed in");
        self.adopt(Some(session))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: &SignUpOptions,
    ) -> Result<SignUpResponse, ProviderError> {
        let path = options.redirect_to.as_deref().map_or_else(
            || "signup".to_string(),
            |redirect| format!("signup?redirect_to={}", urlencoding::encode(redirect)),
        );
        let resp = self
            .client
            .auth_request(Method::POST, &path)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "role": options.role },
            }))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let body: SignUpBody = check_response(resp)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        match body {
            SignUpBody::Session(body) => {
                let session = body.into_session();
                self.adopt(Some(session.clone()))?;
                Ok(SignUpResponse {
                    user: Some(session.user.clone()),
                    session: Some(session),
                })
            }
            SignUpBody::User(user) => Ok(SignUpResponse {
                user: Some(user.into()),
                session: None,
            }),
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let Some(session) = self.cached() else {
            return self.adopt(None);
        };

        let resp = self
            .client
            .auth_request(Method::POST, "logout")
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        match check_response(resp).await {
            Ok(_) => {}
            // Token already revoked or expired server-side.
            Err(failure) if matches!(failure.status, 401 | 403 | 404) => {
                tracing::debug!(status = failure.status, "session already gone server-side");
            }
            Err(failure) => return Err(failure.into()),
        }
        tracing::info!(user_id = %session.user.id, "signed out");
        self.adopt(None)
    }
}
