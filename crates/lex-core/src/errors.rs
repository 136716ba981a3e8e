//! Cross-cutting error types for LexCorp.
//!
//! Errors specific to a collaborator (identity provider, record store, AI
//! service) live in the crate that talks to it. `lex-cli` converges
//! everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any LexCorp crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, required fields, allowed values).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
