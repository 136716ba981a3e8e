use lex_core::errors::CoreError;
use thiserror::Error;

/// Failure reported by the identity provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status. `message` is the
    /// provider's own wording (e.g. "Invalid login credentials").
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("identity provider unreachable: {0}")]
    Transport(String),

    #[error("unexpected identity provider response: {0}")]
    Decode(String),

    #[error("session storage failed: {0}")]
    SessionStore(String),
}

/// Failure reading or writing organization records.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("record store unreachable: {0}")]
    Transport(String),

    #[error("unexpected record store response: {0}")]
    Decode(String),

    /// More than one organization row for a single owner.
    #[error("expected at most one organization for user {user_id}, found {count}")]
    MultipleRows { user_id: String, count: usize },
}

/// Errors surfaced by session manager actions.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("sign in failed: {0}")]
    Authentication(#[source] ProviderError),

    #[error("sign up failed: {0}")]
    SignUp(#[source] ProviderError),

    #[error("sign out failed: {0}")]
    SignOut(#[source] ProviderError),

    #[error("organization write failed: {0}")]
    OrganizationWrite(#[source] StoreError),

    #[error("You must be signed in to complete organization setup.")]
    NotAuthenticated,

    /// The provider reported success without the data it promised.
    #[error("{0}")]
    InvariantViolation(String),

    #[error(transparent)]
    InvalidProfile(#[from] CoreError),
}
