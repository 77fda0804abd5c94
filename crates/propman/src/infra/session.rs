//! Explicit session context for the bearer-token credential.
//!
//! Lifecycle: init loads the token from durable storage under the propman
//! home, sign-in establishes a new token and persists it, sign-out clears
//! both memory and storage. The networking client only sees a
//! [`SessionHandle`], never the storage.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// File name of the persisted session under the propman home directory.
pub const SESSION_FILE: &str = "session.json";

/// Sign-in request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
}

/// Token payload returned by the auth endpoints and persisted locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
}

/// Shared in-memory view of the current bearer token.
///
/// Cloned into the HTTP client so sign-in/out takes effect on the next
/// request without rebuilding the client.
#[derive(Clone, Default)]
pub struct SessionHandle {
    token: Arc<Mutex<Option<String>>>,
}

impl SessionHandle {
    /// Returns the current bearer token, if a session is established.
    pub fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|token| token.clone())
    }

    fn set(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = token;
        }
    }
}

/// Durable storage for the session token.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at the propman home directory.
    pub fn new(home: &Path) -> Self {
        Self {
            path: home.join(SESSION_FILE),
        }
    }

    /// Loads the persisted session, if one exists and parses.
    pub fn load(&self) -> Option<AuthResponse> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Persists the session to disk.
    ///
    /// # Errors
    /// Returns an error when the home directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, session: &AuthResponse) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(session).map_err(std::io::Error::other)?;

        std::fs::write(&self.path, body)
    }

    /// Removes the persisted session. Missing files are not an error.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be removed.
    pub fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }
}

/// Process-wide session state with an explicit lifecycle.
pub struct SessionContext {
    handle: SessionHandle,
    store: SessionStore,
}

impl SessionContext {
    /// Initializes the session from durable storage.
    pub fn load(home: &Path) -> Self {
        let store = SessionStore::new(home);
        let handle = SessionHandle::default();
        if let Some(session) = store.load() {
            handle.set(Some(session.token));
        }

        Self { handle, store }
    }

    /// Returns the handle shared with the networking client.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Returns whether a bearer token is currently present.
    pub fn is_authenticated(&self) -> bool {
        self.handle.token().is_some()
    }

    /// Establishes a signed-in session and persists it.
    ///
    /// # Errors
    /// Returns an error when the token cannot be written to storage; the
    /// in-memory session is established regardless.
    pub fn establish(&self, session: &AuthResponse) -> std::io::Result<()> {
        self.handle.set(Some(session.token.clone()));

        self.store.save(session)
    }

    /// Tears the session down, clearing memory and storage.
    ///
    /// # Errors
    /// Returns an error when the stored session cannot be removed.
    pub fn terminate(&self) -> std::io::Result<()> {
        self.handle.set(None);

        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn session() -> AuthResponse {
        AuthResponse {
            token: "tok-123".to_string(),
            expires_at: "2026-12-31T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_store_round_trips_session() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let store = SessionStore::new(home.path());

        // Act
        store.save(&session()).expect("failed to save session");
        let loaded = store.load();

        // Assert
        assert_eq!(loaded, Some(session()));
    }

    #[test]
    fn test_store_clear_is_idempotent() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let store = SessionStore::new(home.path());
        store.save(&session()).expect("failed to save session");

        // Act & Assert
        store.clear().expect("failed to clear session");
        store.clear().expect("second clear should not fail");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_context_loads_token_from_storage_on_init() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        SessionStore::new(home.path())
            .save(&session())
            .expect("failed to save session");

        // Act
        let context = SessionContext::load(home.path());

        // Assert
        assert!(context.is_authenticated());
        assert_eq!(context.handle().token(), Some("tok-123".to_string()));
    }

    #[test]
    fn test_context_establish_and_terminate_update_handle_and_storage() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let context = SessionContext::load(home.path());
        let handle = context.handle();
        assert!(!context.is_authenticated());

        // Act
        context.establish(&session()).expect("failed to establish");

        // Assert
        assert_eq!(handle.token(), Some("tok-123".to_string()));
        assert!(SessionStore::new(home.path()).load().is_some());

        // Act
        context.terminate().expect("failed to terminate");

        // Assert
        assert_eq!(handle.token(), None);
        assert_eq!(SessionStore::new(home.path()).load(), None);
    }
}
