use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// The denormalized session snapshot cached on the client.
///
/// The backend owns identity; this cache is a revocable, best-effort hint
/// that may be stale or absent at any time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub name: String,
    pub email: String,
    pub token: String,
}

/// File-backed store for the session snapshot
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persists the session, creating parent directories as needed
    pub fn save(&self, session: &Session) -> AppResult<()> {
        let json = serde_json::to_string(session)
            .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Internal(format!("Session store unavailable: {}", e)))?;
        }

        fs::write(&self.path, json)
            .map_err(|e| AppError::Internal(format!("Session write failed: {}", e)))
    }

    /// Loads the cached session. A missing or unreadable cache is `None`,
    /// never an error; callers fall back to a fresh login.
    pub fn load(&self) -> Option<Session> {
        let data = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Discards the cached session (logout). Idempotent.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> SessionStore {
        let path = std::env::temp_dir()
            .join("readstack-tests")
            .join(format!("session-{}.json", Uuid::new_v4()));
        SessionStore::new(path)
    }

    fn sample_session() -> Session {
        Session {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            token: "token-123".to_string(),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let store = temp_store();
        store.save(&sample_session()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, sample_session());

        store.clear();
    }

    #[test]
    fn test_load_missing_is_none() {
        let store = temp_store();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_corrupt_is_none() {
        let store = temp_store();
        fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        fs::write(&store.path, "not json at all").unwrap();

        assert!(store.load().is_none());

        store.clear();
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = temp_store();
        store.clear();
        store.clear();
        assert!(store.load().is_none());
    }
}
