//! Client session context
//!
//! Holds the bearer token and username returned by the auth endpoints and
//! persists them to a small JSON file so that later invocations stay logged
//! in. The store is passed explicitly to everything that needs the token.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Credentials of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
}

/// Session context with optional file persistence
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: Option<Session>,
}

impl SessionStore {
    /// A store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed store, reading any session already saved there.
    /// A missing or unreadable file means "logged out".
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Session>(&content) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("Ignoring corrupt session file {}: {}", path.display(), e);
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            path: Some(path),
            current,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.username.as_str())
    }

    /// Token present means logged in. The token is never validated locally.
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Store a new session and persist it
    pub fn set(&mut self, session: Session) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&session)?)?;
        }
        tracing::debug!("Stored session for {}", session.username);
        self.current = Some(session);
        Ok(())
    }

    /// Forget the session and remove the persisted file
    pub fn clear(&mut self) -> Result<()> {
        self.current = None;
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session() -> Session {
        Session {
            token: "abc.def.ghi".to_string(),
            username: "alice".to_string(),
        }
    }

    #[test]
    fn test_open_missing_file_is_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = SessionStore::open(&path);
        store.set(session()).unwrap();
        assert!(store.is_authenticated());

        let reopened = SessionStore::open(&path);
        assert_eq!(reopened.session(), Some(&session()));
        assert_eq!(reopened.username(), Some("alice"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::open(&path);
        store.set(session()).unwrap();
        store.clear().unwrap();

        assert!(!store.is_authenticated());
        assert!(!path.exists());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_treated_as_logged_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = SessionStore::open(&path);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = SessionStore::in_memory();
        store.set(session()).unwrap();
        assert_eq!(store.token(), Some("abc.def.ghi"));
        assert!(store.path().is_none());
    }
}
