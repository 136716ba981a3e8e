//! # lex-auth
//!
//! Session lifecycle for LexCorp: the [`SessionManager`] keeps the signed-in
//! session and its organization in step, behind the [`IdentityProvider`] and
//! [`OrganizationStore`] seams. The [`supabase`] module supplies the
//! production implementations of both.

pub mod admin;
pub mod error;
pub mod jwt;
pub mod manager;
pub mod provider;
pub mod session_store;
pub mod store;
pub mod supabase;

pub use admin::is_org_admin;
pub use error::{AuthError, ProviderError, StoreError};
pub use manager::{SessionManager, SessionSnapshot, SessionWatcher, SignUpOutcome, Subscription};
pub use provider::{
    IdentityProvider, SessionBroadcaster, SessionChanges, SignUpOptions, SignUpResponse,
};
pub use session_store::SessionStore;
pub use store::OrganizationStore;
