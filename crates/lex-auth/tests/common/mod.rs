//! In-memory fakes for the identity provider and organization store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use lex_auth::{
    IdentityProvider, OrganizationStore, ProviderError, SessionBroadcaster, SessionChanges,
    SignUpOptions, SignUpResponse, StoreError,
};
use lex_core::entities::{NewOrganization, Organization, Session, User};
use tokio::sync::{Mutex, Notify};

pub fn session_for(user_id: &str) -> Session {
    Session {
        access_token: format!("token-{user_id}"),
        refresh_token: None,
        expires_at: None,
        user: User {
            id: user_id.into(),
            email: Some(format!("{user_id}@example.test")),
        },
    }
}

fn provider_failure(message: &str) -> ProviderError {
    ProviderError::Api {
        status: 400,
        message: message.into(),
    }
}

/// Scripted identity provider.
#[derive(Default)]
pub struct FakeIdentity {
    broadcaster: SessionBroadcaster,
    pub initial_session: std::sync::Mutex<Option<Session>>,
    pub fail_current_session: AtomicBool,
    /// When set, `current_session` waits on it before answering.
    pub init_gate: std::sync::Mutex<Option<Arc<Notify>>>,
    /// When set, `sign_out` waits on it before answering.
    pub sign_out_gate: std::sync::Mutex<Option<Arc<Notify>>>,
    pub fail_sign_in: AtomicBool,
    pub fail_sign_up: AtomicBool,
    pub fail_sign_out: AtomicBool,
    /// Sign-up returns a live session (no email confirmation).
    pub sign_up_returns_session: AtomicBool,
    /// Sign-up reports success without a user.
    pub sign_up_omits_user: AtomicBool,
    /// User id handed out by sign-in and sign-up.
    pub next_user_id: std::sync::Mutex<String>,
    pub sign_up_calls: std::sync::Mutex<Vec<(String, SignUpOptions)>>,
}

impl FakeIdentity {
    pub fn new() -> Arc<Self> {
        let fake = Self::default();
        *fake.next_user_id.lock().unwrap() = "user-1".into();
        Arc::new(fake)
    }

    pub fn with_session(user_id: &str) -> Arc<Self> {
        let fake = Self::new();
        *fake.initial_session.lock().unwrap() = Some(session_for(user_id));
        fake
    }

    /// Announce a session transition, as a token refresh or another tab would.
    pub fn emit(&self, session: Option<Session>) {
        self.broadcaster.emit(session);
    }

    fn next_user(&self) -> String {
        self.next_user_id.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn current_session(&self) -> Result<Option<Session>, ProviderError> {
        let gate = self.init_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail_current_session.load(Ordering::SeqCst) {
            return Err(ProviderError::Transport("connection refused".into()));
        }
        Ok(self.initial_session.lock().unwrap().clone())
    }

    fn subscribe(&self) -> SessionChanges {
        self.broadcaster.subscribe()
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<(), ProviderError> {
        if self.fail_sign_in.load(Ordering::SeqCst) {
            return Err(provider_failure("Invalid login credentials"));
        }
        self.broadcaster.emit(Some(session_for(&self.next_user())));
        Ok(())
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        options: &SignUpOptions,
    ) -> Result<SignUpResponse, ProviderError> {
        self.sign_up_calls
            .lock()
            .unwrap()
            .push((email.to_string(), options.clone()));
        if self.fail_sign_up.load(Ordering::SeqCst) {
            return Err(provider_failure("User already registered"));
        }
        if self.sign_up_omits_user.load(Ordering::SeqCst) {
            return Ok(SignUpResponse::default());
        }
        let session = session_for(&self.next_user());
        if self.sign_up_returns_session.load(Ordering::SeqCst) {
            self.broadcaster.emit(Some(session.clone()));
            Ok(SignUpResponse {
                user: Some(session.user.clone()),
                session: Some(session),
            })
        } else {
            Ok(SignUpResponse {
                user: Some(session.user),
                session: None,
            })
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let gate = self.sign_out_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(ProviderError::Transport("network down".into()));
        }
        self.broadcaster.emit(None);
        Ok(())
    }
}

/// Organization table keyed on `user_id`.
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<HashMap<String, Organization>>,
    next_id: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_writes: AtomicBool,
    /// Per-user gates holding `fetch_by_user` until notified.
    pub fetch_gates: std::sync::Mutex<HashMap<String, Arc<Notify>>>,
    pub fetch_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn seed(&self, record: NewOrganization) -> Organization {
        let organization = self.materialize(record, None);
        self.rows
            .lock()
            .await
            .insert(organization.user_id.clone(), organization.clone());
        organization
    }

    pub async fn rows(&self) -> Vec<Organization> {
        self.rows.lock().await.values().cloned().collect()
    }

    /// Hold fetches for `user_id` until the returned gate is notified.
    pub fn gate_fetch(&self, user_id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.fetch_gates
            .lock()
            .unwrap()
            .insert(user_id.to_string(), Arc::clone(&gate));
        gate
    }

    fn materialize(&self, record: NewOrganization, id: Option<String>) -> Organization {
        let id = id.unwrap_or_else(|| {
            format!("org-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
        });
        Organization {
            id,
            user_id: record.user_id,
            name: record.name,
            hq_location: record.hq_location,
            plan: record.plan,
            created_at: None,
        }
    }

    fn write_failure(&self) -> Option<StoreError> {
        self.fail_writes
            .load(Ordering::SeqCst)
            .then(|| StoreError::Transport("store offline".into()))
    }
}

#[async_trait]
impl OrganizationStore for FakeStore {
    async fn fetch_by_user(&self, user_id: &str) -> Result<Option<Organization>, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.fetch_gates.lock().unwrap().get(user_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("store offline".into()));
        }
        Ok(self.rows.lock().await.get(user_id).cloned())
    }

    async fn insert(&self, record: &NewOrganization) -> Result<Organization, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.write_failure() {
            return Err(error);
        }
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&record.user_id) {
            return Err(StoreError::Api {
                status: 409,
                message: "duplicate key value violates unique constraint".into(),
            });
        }
        let organization = self.materialize(record.clone(), None);
        rows.insert(record.user_id.clone(), organization.clone());
        Ok(organization)
    }

    async fn upsert_by_user(&self, record: &NewOrganization) -> Result<Organization, StoreError> {
        if let Some(error) = self.write_failure() {
            return Err(error);
        }
        let mut rows = self.rows.lock().await;
        let existing_id = rows.get(&record.user_id).map(|org| org.id.clone());
        let organization = self.materialize(record.clone(), existing_id);
        rows.insert(record.user_id.clone(), organization.clone());
        Ok(organization)
    }
}
