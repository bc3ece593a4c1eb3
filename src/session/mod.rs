//! Persisted session state.
//!
//! The token and user returned by the login endpoint live in a JSON file
//! under the platform config directory. The store is constructed once in
//! `main` and handed to whoever needs it, there is no ambient global.
//! Lifecycle is explicit: `load` hydrates, `save` persists after login,
//! `clear` wipes on logout or when the backend answers 401.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::ApiError;
use crate::models::User;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by the platform config directory.
    pub fn open() -> Result<Self, ApiError> {
        let dirs = directories::ProjectDirs::from("", "", "tradelog").ok_or_else(|| {
            ApiError::Io(std::io::Error::other("could not resolve a config directory"))
        })?;
        let dir = dirs.config_dir();
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(SESSION_FILE),
        })
    }

    /// Store backed by an explicit file, used by tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Hydrate the persisted session, `None` when not logged in.
    pub fn load(&self) -> Result<Option<Session>, ApiError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), ApiError> {
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Drop the persisted session. Clearing an already-empty store is fine.
    pub fn clear(&self) -> Result<(), ApiError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            email: "trader@example.com".to_string(),
            role: "authenticated".to_string(),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_save_load_clear_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());

        store
            .save(&Session {
                token: "tok-123".to_string(),
                user: user(),
            })
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.user.id, "u1");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.json"));
        store.clear().unwrap();
        store.clear().unwrap();
    }
}
