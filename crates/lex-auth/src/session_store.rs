//! Persistence for the signed-in session between CLI invocations.
//!
//! The session is kept as JSON in the OS keychain, falling back to
//! `~/.lexcorp/session.json` (mode 0600) when no keychain is available.

use std::fs;
use std::path::{Path, PathBuf};

use lex_core::entities::Session;

use crate::error::ProviderError;

const DEFAULT_KEYRING_SERVICE: &str = "lexcorp-cli";
const KEYRING_USER: &str = "supabase-session";
const SESSION_FILE_NAME: &str = "session.json";

/// Keyring service name. Override via `LEX_KEYRING_SERVICE` in tests so
/// real credentials are never touched.
fn keyring_service() -> String {
    std::env::var("LEX_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Remove the keyring copy. `false` if one may still be there.
fn clear_keyring(entry: &keyring::Entry) -> bool {
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => true,
        Err(error) => {
            tracing::warn!(%error, "failed to delete keyring session");
            false
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    /// `None` disables the keychain tier entirely.
    service: Option<String>,
    path: PathBuf,
}

impl SessionStore {
    /// Keychain first, then `~/.lexcorp/session.json`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::SessionStore` if the home directory cannot be
    /// resolved.
    pub fn default_location() -> Result<Self, ProviderError> {
        let path = dirs::home_dir()
            .map(|home| home.join(".lexcorp").join(SESSION_FILE_NAME))
            .ok_or_else(|| {
                ProviderError::SessionStore("home directory not found, cannot store session".into())
            })?;
        Ok(Self {
            service: Some(keyring_service()),
            path,
        })
    }

    /// File storage only, at `path`.
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            service: None,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `session`. Falls back to the file if the keychain refuses.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::SessionStore` if both tiers fail.
    pub fn store(&self, session: &Session) -> Result<(), ProviderError> {
        let json = serde_json::to_string(session)
            .map_err(|e| ProviderError::SessionStore(format!("serialize session: {e}")))?;

        if let Some(entry) = self.entry() {
            match entry.set_password(&json) {
                // Some backends (the in-memory mock) accept writes they
                // never persist; only trust a read-back through a new entry.
                Ok(()) if self.read_keyring().as_deref() == Some(json.as_str()) => return Ok(()),
                Ok(()) => {
                    tracing::warn!("keyring did not retain the session; falling back to file");
                }
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                }
            }
            if !clear_keyring(&entry) {
                tracing::warn!("an older keyring session may shadow the session file on load");
            }
        }
        self.store_file(&json)
    }

    /// The stored session, if any. Unreadable or corrupt entries count as
    /// absent.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        if let Some(session) = self.read_keyring().as_deref().and_then(parse) {
            return Some(session);
        }
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|json| parse(&json))
    }

    /// Remove the session from both tiers.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::SessionStore` if the file cannot be removed.
    pub fn delete(&self) -> Result<(), ProviderError> {
        if let Some(entry) = self.entry() {
            clear_keyring(&entry);
        }
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                ProviderError::SessionStore(format!("failed to delete {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }

    fn entry(&self) -> Option<keyring::Entry> {
        let service = self.service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    fn read_keyring(&self) -> Option<String> {
        self.entry()?.get_password().ok()
    }

    fn store_file(&self, json: &str) -> Result<(), ProviderError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ProviderError::SessionStore(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(&self.path, json).map_err(|e| {
            ProviderError::SessionStore(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                ProviderError::SessionStore(format!("chmod {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }
}

fn parse(json: &str) -> Option<Session> {
    if json.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(json) {
        Ok(session) => Some(session),
        Err(error) => {
            tracing::warn!(%error, "ignoring unreadable stored session");
            None
        }
    }
}
