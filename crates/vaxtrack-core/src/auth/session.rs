use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::UserProfile;

/// Token slot file name in the data directory.
/// Holds the raw bearer token as a plain string; absence means unauthenticated.
const TOKEN_FILE: &str = "token";

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserProfile>,
}

/// Single source of truth for the current session.
///
/// Holds at most one bearer credential at a time, plus the user profile
/// returned at login. Clone is cheap - clones share the same state, so one
/// store constructed at startup can be handed to every screen and to the
/// gateway.
///
/// Invariant: `is_authenticated() == token().is_some()`, and the profile is
/// cleared whenever the token is cleared.
#[derive(Clone)]
pub struct SessionStore {
    data_dir: PathBuf,
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Restore a previously stored credential from the token slot.
    ///
    /// Returns `true` if a token was found. The token is trusted as-is: it is
    /// not validated against the backend, so a stale or revoked token is only
    /// discovered on the first subsequent API call. That call's 401 response
    /// tears the session down through the gateway.
    pub fn restore(&self) -> Result<bool> {
        let path = self.token_path();
        if !path.exists() {
            return Ok(false);
        }
        let token = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read token slot at {}", path.display()))?;
        let token = token.trim();
        if token.is_empty() {
            return Ok(false);
        }
        debug!("restored stored credential");
        self.write().token = Some(token.to_string());
        Ok(true)
    }

    /// Store a new credential and profile, marking the session authenticated.
    /// The token is written to the slot so it survives a restart; the profile
    /// is kept in memory only.
    pub fn establish(&self, token: String, user: Option<UserProfile>) -> Result<()> {
        {
            let mut state = self.write();
            state.token = Some(token.clone());
            state.user = user;
        }
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Failed to create data dir {}", self.data_dir.display()))?;
        std::fs::write(self.token_path(), token).context("Failed to write token slot")?;
        Ok(())
    }

    /// Destroy the credential and profile, marking the session unauthenticated.
    ///
    /// Idempotent and infallible to the caller: in-memory state always clears,
    /// and a failure to remove the on-disk slot is logged rather than surfaced.
    pub fn clear(&self) {
        {
            let mut state = self.write();
            state.token = None;
            state.user = None;
        }
        let path = self.token_path();
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(error = %e, "Failed to remove token slot");
            }
        }
    }

    /// Snapshot of the bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    /// Profile returned at login, if the session was established in this process.
    pub fn user(&self) -> Option<UserProfile> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }

    // Session mutations are short and never block on IO while holding the
    // lock, so a poisoned lock just means a panicked reader; recover the data.
    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
