//! Identity provider contract and the session-change channel.

use async_trait::async_trait;
use lex_core::entities::{Session, User};
use tokio::sync::broadcast;

use crate::error::ProviderError;

/// Buffered session events per subscriber before the oldest are dropped.
const SESSION_CHANNEL_CAPACITY: usize = 16;

/// Extra parameters the provider attaches to a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOptions {
    /// Where the confirmation email sends the user.
    pub redirect_to: Option<String>,
    /// Role marker stored in the new user's metadata.
    pub role: String,
}

impl Default for SignUpOptions {
    fn default() -> Self {
        Self {
            redirect_to: None,
            role: "org_admin".into(),
        }
    }
}

/// What the provider hands back from account creation.
///
/// `session` is present only when no email confirmation is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpResponse {
    pub user: Option<User>,
    pub session: Option<Session>,
}

/// External authentication service.
///
/// Implementations announce every session transition (sign-in, token
/// refresh, sign-out) through the channel returned by [`Self::subscribe`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_session(&self) -> Result<Option<Session>, ProviderError>;

    fn subscribe(&self) -> SessionChanges;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), ProviderError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: &SignUpOptions,
    ) -> Result<SignUpResponse, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;
}

/// Sending half of the session-change channel, owned by a provider.
#[derive(Debug, Clone)]
pub struct SessionBroadcaster {
    tx: broadcast::Sender<Option<Session>>,
}

impl Default for SessionBroadcaster {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(SESSION_CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl SessionBroadcaster {
    /// Announce a session transition. Having no subscribers is not an error.
    pub fn emit(&self, session: Option<Session>) {
        let _ = self.tx.send(session);
    }

    #[must_use]
    pub fn subscribe(&self) -> SessionChanges {
        SessionChanges {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiving half of the session-change channel.
///
/// Dropping it unsubscribes.
#[derive(Debug)]
pub struct SessionChanges {
    rx: broadcast::Receiver<Option<Session>>,
}

impl SessionChanges {
    /// Wait for the next session event.
    ///
    /// Returns `None` once the provider is gone. If this subscriber fell
    /// behind, skipped events are logged and the newest retained one is
    /// returned.
    pub async fn next(&mut self) -> Option<Option<Session>> {
        loop {
            match self.rx.recv().await {
                Ok(session) => return Some(session),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "session listener lagged; skipping stale events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
