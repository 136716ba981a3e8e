use std::sync::Arc;

use anyhow::Context;
use lex_ai::{DraftingService, GeminiClient};
use lex_auth::supabase::{SupabaseAuth, SupabaseClient, SupabaseOrganizationStore};
use lex_auth::{SessionManager, SessionStore, SignUpOptions};
use lex_config::LexConfig;

/// Composition root: owns the configuration and builds services on demand,
/// so commands only pay for the backends they use.
pub struct AppContext {
    pub config: LexConfig,
}

impl AppContext {
    #[must_use]
    pub const fn new(config: LexConfig) -> Self {
        Self { config }
    }

    /// Start a session manager wired to Supabase.
    ///
    /// Requires a tokio runtime; the manager tears itself down on drop.
    pub fn session_manager(&self) -> anyhow::Result<SessionManager> {
        let supabase = self.config.require_supabase()?;
        let client = Arc::new(
            SupabaseClient::new(supabase, self.config.general.request_timeout())
                .context("failed to build Supabase client")?,
        );
        let sessions = SessionStore::default_location()?;
        tracing::debug!(path = %sessions.path().display(), "session file fallback");

        let identity = Arc::new(SupabaseAuth::new(Arc::clone(&client), sessions));
        let store = Arc::new(SupabaseOrganizationStore::new(client));
        let options = SignUpOptions {
            redirect_to: supabase.redirect_to().map(ToString::to_string),
            role: supabase.signup_role.clone(),
        };
        Ok(SessionManager::start(identity, store, options))
    }

    pub fn drafting_service(&self) -> anyhow::Result<Arc<dyn DraftingService>> {
        let gemini = self.config.require_gemini()?;
        let client = GeminiClient::new(gemini, self.config.general.request_timeout())
            .context("failed to build Gemini client")?;
        Ok(Arc::new(client))
    }
}
