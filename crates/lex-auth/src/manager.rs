//! Session manager: owns the session/organization lifecycle.
//!
//! On [`SessionManager::start`] two tasks are spawned and race freely:
//! 1. initial hydration (current session, then its organization)
//! 2. a listener applying every session transition the provider announces
//!
//! Every state write is guarded by a liveness flag cleared on teardown, so
//! late provider/store results are discarded instead of applied. Organization
//! writes carry a hydration ticket taken when the session is written, in
//! event order; only the newest ticket may write, which keeps a slow fetch
//! for a previous user from overwriting a newer result. The initial session
//! load yields to any listener event that arrived while it was pending.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use lex_core::entities::{Organization, OrganizationProfile, Session, User};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::admin::is_org_admin;
use crate::error::AuthError;
use crate::provider::{IdentityProvider, SignUpOptions};
use crate::store::OrganizationStore;

/// Read-only view of the manager's state handed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub user: Option<User>,
    pub organization: Option<Organization>,
    /// True only while the initial hydration pass runs.
    pub loading: bool,
    /// True while a sign-in/up, profile completion, or sign-out is in flight.
    pub action_loading: bool,
    pub is_org_admin: bool,
}

/// Result of a successful sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignUpOutcome {
    /// The account must be confirmed by email before a session exists.
    pub requires_confirmation: bool,
}

/// Handle on the manager's auth-state listener.
#[derive(Debug)]
pub struct Subscription {
    listener: AbortHandle,
}

impl Subscription {
    /// Stop listening. Idempotent.
    pub fn unsubscribe(&self) {
        self.listener.abort();
    }
}

/// Owned session manager. Construct one per application and pass it by
/// reference to everything that needs auth state.
pub struct SessionManager {
    inner: Arc<Inner>,
    subscription: Subscription,
}

impl SessionManager {
    /// Start the manager: register the session listener and kick off initial
    /// hydration. Must be called from within a tokio runtime.
    pub fn start(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn OrganizationStore>,
        options: SignUpOptions,
    ) -> Self {
        let (state, _) = watch::channel(SessionState {
            loading: true,
            ..SessionState::default()
        });
        let inner = Arc::new(Inner {
            identity,
            store,
            options,
            state,
            alive: AtomicBool::new(true),
            hydration_seq: AtomicU64::new(0),
            session_generation: AtomicU64::new(0),
        });

        // Any listener event counts as newer than the initial load.
        let generation = inner.session_generation.load(Ordering::SeqCst);
        let mut changes = inner.identity.subscribe();
        let listener_inner = Arc::clone(&inner);
        let listener = tokio::spawn(async move {
            while let Some(session) = changes.next().await {
                listener_inner.on_session_change(session);
            }
            tracing::debug!("identity provider closed the session channel");
        });

        let init_inner = Arc::clone(&inner);
        tokio::spawn(async move { init_inner.run_init(generation).await });

        Self {
            inner,
            subscription: Subscription {
                listener: listener.abort_handle(),
            },
        }
    }

    /// Current state. `is_org_admin` is derived at call time.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().snapshot()
    }

    /// Watch for state changes.
    #[must_use]
    pub fn watch(&self) -> SessionWatcher {
        SessionWatcher {
            rx: self.inner.state.subscribe(),
        }
    }

    /// Wait until the initial hydration pass has finished.
    ///
    /// Never resolves if the manager is torn down mid-hydration.
    pub async fn ready(&self) -> SessionSnapshot {
        let mut watcher = self.watch();
        match watcher.wait_for(|snapshot| !snapshot.loading).await {
            Some(snapshot) => snapshot,
            None => self.snapshot(),
        }
    }

    /// Check credentials with the provider.
    ///
    /// Session state is not touched here; the provider's session event
    /// delivers it through the listener.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Authentication` with the provider's error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let _action = self.inner.begin_action();
        self.inner
            .identity
            .sign_in_with_password(email, password)
            .await
            .map_err(AuthError::Authentication)
    }

    /// Create an account and its organization.
    ///
    /// If the provider hands back a live session the new organization is
    /// stored immediately; otherwise the user must confirm by email first
    /// and the organization is hydrated on their next sign-in.
    ///
    /// # Errors
    ///
    /// - `AuthError::InvalidProfile` if the profile is incomplete (checked
    ///   before any network call).
    /// - `AuthError::SignUp` if the provider rejects the account.
    /// - `AuthError::InvariantViolation` if the provider returns no user.
    /// - `AuthError::OrganizationWrite` if the organization insert fails. The
    ///   account already exists at that point and is not rolled back.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: OrganizationProfile,
    ) -> Result<SignUpOutcome, AuthError> {
        profile.validate()?;
        let _action = self.inner.begin_action();

        let response = self
            .inner
            .identity
            .sign_up(email, password, &self.inner.options)
            .await
            .map_err(AuthError::SignUp)?;

        let Some(user) = response.user else {
            return Err(AuthError::InvariantViolation(
                "Sign up succeeded but no user id returned.".into(),
            ));
        };

        let organization = self
            .inner
            .store
            .insert(&profile.into_record(user.id.clone()))
            .await
            .map_err(|error| {
                tracing::error!(
                    %error,
                    user_id = %user.id,
                    "account created but organization insert failed"
                );
                AuthError::OrganizationWrite(error)
            })?;

        let requires_confirmation = response.session.is_none();
        if !requires_confirmation {
            self.inner.set_organization(Some(organization));
        }
        Ok(SignUpOutcome {
            requires_confirmation,
        })
    }

    /// Create or update the signed-in user's organization.
    ///
    /// Keyed on the user id, so repeated calls revise the same record.
    ///
    /// # Errors
    ///
    /// - `AuthError::NotAuthenticated` if nobody is signed in.
    /// - `AuthError::InvalidProfile` if the profile is incomplete.
    /// - `AuthError::OrganizationWrite` if the upsert fails.
    pub async fn complete_organization_profile(
        &self,
        profile: OrganizationProfile,
    ) -> Result<(), AuthError> {
        let user_id = self
            .inner
            .state
            .borrow()
            .session
            .as_ref()
            .map(|session| session.user.id.clone())
            .ok_or(AuthError::NotAuthenticated)?;
        profile.validate()?;

        let _action = self.inner.begin_action();
        let organization = self
            .inner
            .store
            .upsert_by_user(&profile.into_record(user_id))
            .await
            .map_err(AuthError::OrganizationWrite)?;
        self.inner.set_organization(Some(organization));
        Ok(())
    }

    /// Sign out with the provider.
    ///
    /// On success the organization is cleared at once; the session is
    /// cleared by the listener. On failure nothing local changes, so the UI
    /// does not look signed out while the account is still signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SignOut` with the provider's error.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let _action = self.inner.begin_action();
        self.inner
            .identity
            .sign_out()
            .await
            .map_err(AuthError::SignOut)?;
        self.inner.set_organization(None);
        Ok(())
    }

    /// Stop applying updates and unregister the listener.
    ///
    /// In-flight provider and store calls keep running; their results are
    /// dropped. Idempotent; also runs on drop.
    pub fn teardown(&self) {
        // Flip the flag under the state lock so no write straddles teardown.
        self.inner.state.send_if_modified(|_| {
            self.inner.alive.store(false, Ordering::SeqCst);
            false
        });
        self.subscription.unsubscribe();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.is_alive()
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Receiver for state changes.
pub struct SessionWatcher {
    rx: watch::Receiver<SessionState>,
}

impl SessionWatcher {
    #[must_use]
    pub fn current(&self) -> SessionSnapshot {
        self.rx.borrow().snapshot()
    }

    /// Wait until the state satisfies `predicate` (checked against the
    /// current state first). `None` if the manager is gone.
    pub async fn wait_for(
        &mut self,
        mut predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Option<SessionSnapshot> {
        self.rx
            .wait_for(|state| predicate(&state.snapshot()))
            .await
            .ok()
            .map(|state| state.snapshot())
    }
}

#[derive(Debug, Clone, Default)]
struct SessionState {
    // The user is read off the session so the two can never disagree.
    session: Option<Session>,
    organization: Option<Organization>,
    loading: bool,
    action_loading: bool,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        let user = self.session.as_ref().map(|session| session.user.clone());
        SessionSnapshot {
            is_org_admin: is_org_admin(user.as_ref(), self.organization.as_ref()),
            session: self.session.clone(),
            user,
            organization: self.organization.clone(),
            loading: self.loading,
            action_loading: self.action_loading,
        }
    }
}

struct Inner {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn OrganizationStore>,
    options: SignUpOptions,
    state: watch::Sender<SessionState>,
    alive: AtomicBool,
    hydration_seq: AtomicU64,
    /// Bumped by every listener event.
    session_generation: AtomicU64,
}

impl Inner {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Run `f` under the state lock unless torn down; watchers are notified
    /// when it reports a change.
    fn modify(&self, f: impl FnOnce(&mut SessionState) -> bool) -> bool {
        self.state.send_if_modified(|state| self.is_alive() && f(state))
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) -> bool {
        self.modify(|state| {
            f(state);
            true
        })
    }

    async fn run_init(self: Arc<Self>, generation: u64) {
        self.update(|state| state.loading = true);

        match self.identity.current_session().await {
            Ok(session) => {
                let user_id = session.as_ref().map(|s| s.user.id.clone());
                match self.apply_session(Some(generation), session) {
                    Some(ticket) => self.hydrate_organization(ticket, user_id.as_deref()).await,
                    None => tracing::debug!("initial session superseded by a newer event"),
                }
            }
            Err(error) => {
                tracing::error!(%error, "error initializing authentication");
                self.modify(|state| {
                    if self.session_generation.load(Ordering::SeqCst) != generation {
                        return false;
                    }
                    self.next_ticket();
                    state.session = None;
                    state.organization = None;
                    true
                });
            }
        }

        self.update(|state| state.loading = false);
    }

    fn on_session_change(self: &Arc<Self>, session: Option<Session>) {
        let user_id = session.as_ref().map(|s| s.user.id.clone());
        let Some(ticket) = self.apply_session(None, session) else {
            return;
        };

        match user_id {
            Some(user_id) => {
                let inner = Arc::clone(self);
                tokio::spawn(async move { inner.hydrate_organization(ticket, Some(&user_id)).await });
            }
            None => self.apply_organization(ticket, None),
        }
    }

    /// Store `session` and take the organization ticket for it in one step
    /// under the state lock.
    ///
    /// Listener events (`expected == None`) always apply and start a new
    /// session generation. The initial load passes the generation it saw
    /// before asking the provider and is dropped if an event arrived since.
    fn apply_session(&self, expected: Option<u64>, session: Option<Session>) -> Option<u64> {
        let mut ticket = None;
        self.modify(|state| {
            match expected {
                Some(generation) if self.session_generation.load(Ordering::SeqCst) != generation => {
                    return false;
                }
                Some(_) => {}
                None => {
                    self.session_generation.fetch_add(1, Ordering::SeqCst);
                }
            }
            state.session = session;
            ticket = Some(self.next_ticket());
            true
        });
        ticket
    }

    /// Fetch the organization for `user_id` (or clear it when absent) and
    /// apply it under `ticket`.
    ///
    /// Store failures are logged and degrade to "no organization"; the
    /// session itself stays valid.
    async fn hydrate_organization(&self, ticket: u64, user_id: Option<&str>) {
        let Some(user_id) = user_id else {
            self.apply_organization(ticket, None);
            return;
        };

        let organization = match self.store.fetch_by_user(user_id).await {
            Ok(organization) => organization,
            Err(error) => {
                tracing::warn!(%error, user_id, "organization fetch failed");
                None
            }
        };
        self.apply_organization(ticket, organization);
    }

    /// Direct organization write from an action; supersedes any hydration
    /// still in flight.
    fn set_organization(&self, organization: Option<Organization>) {
        let ticket = self.next_ticket();
        self.apply_organization(ticket, organization);
    }

    fn apply_organization(&self, ticket: u64, organization: Option<Organization>) {
        let applied = self.modify(|state| {
            if !self.is_current(ticket) {
                return false;
            }
            state.organization = organization;
            true
        });
        if !applied {
            tracing::debug!(ticket, "discarding stale organization result");
        }
    }

    fn next_ticket(&self) -> u64 {
        self.hydration_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.hydration_seq.load(Ordering::SeqCst) == ticket
    }

    fn begin_action(&self) -> ActionGuard<'_> {
        self.update(|state| state.action_loading = true);
        ActionGuard { inner: self }
    }
}

/// Clears `action_loading` when the action finishes, however it finishes.
struct ActionGuard<'a> {
    inner: &'a Inner,
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        self.inner.update(|state| state.action_loading = false);
    }
}
