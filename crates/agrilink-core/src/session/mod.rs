//! Session store: the persisted token and cached user.
//!
//! Two keys live in a [`KeyValueStorage`]: `auth_token` (opaque string) and
//! `user` (JSON-encoded [`User`]). Values are neither encrypted nor expired.
//! Reads always go to storage and re-parse; there is no in-memory mirror.

mod storage;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::models::User;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session storage error: {0}")]
    Storage(String),
    #[error("Stored user record is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionStore")
            .field("storage", &"[dyn KeyValueStorage]")
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Session persisted in a JSON file at `path`.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::new(Arc::new(FileStorage::new(path.as_ref())))
    }

    /// Session kept only for the lifetime of this process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn set_token(&self, token: &str) -> SessionResult<()> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    pub fn get_token(&self) -> SessionResult<Option<String>> {
        self.storage.get_item(TOKEN_KEY)
    }

    pub fn remove_token(&self) -> SessionResult<()> {
        self.storage.remove_item(TOKEN_KEY)
    }

    pub fn set_user(&self, user: &User) -> SessionResult<()> {
        let raw = serde_json::to_string(user)
            .map_err(|error| SessionError::Storage(error.to_string()))?;
        self.storage.set_item(USER_KEY, &raw)
    }

    /// Returns the cached user; a value that no longer parses is reported as
    /// [`SessionError::Corrupt`].
    pub fn get_user(&self) -> SessionResult<Option<User>> {
        let Some(raw) = self.storage.get_item(USER_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(SessionError::Corrupt)
    }

    pub fn remove_user(&self) -> SessionResult<()> {
        self.storage.remove_item(USER_KEY)
    }

    /// Clears both keys.
    pub fn logout(&self) -> SessionResult<()> {
        self.remove_token()?;
        self.remove_user()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Role;

    fn sample_user(role: Role) -> User {
        User {
            id: "u-1".to_string(),
            username: "amina".to_string(),
            email: "amina@example.com".to_string(),
            role,
            region: Some("North".to_string()),
        }
    }

    #[test]
    fn user_round_trips_for_every_role() {
        let store = SessionStore::in_memory();
        for role in Role::ALL {
            let user = sample_user(role);
            store.set_user(&user).unwrap();
            assert_eq!(store.get_user().unwrap(), Some(user));
        }
        store.remove_user().unwrap();
        assert_eq!(store.get_user().unwrap(), None);
    }

    #[test]
    fn token_operations() {
        let store = SessionStore::in_memory();
        assert_eq!(store.get_token().unwrap(), None);
        store.set_token("tok-123").unwrap();
        assert_eq!(store.get_token().unwrap().as_deref(), Some("tok-123"));
        store.remove_token().unwrap();
        assert_eq!(store.get_token().unwrap(), None);
    }

    #[test]
    fn logout_clears_both_keys() {
        let store = SessionStore::in_memory();
        store.set_token("tok").unwrap();
        store.set_user(&sample_user(Role::Farmer)).unwrap();
        store.logout().unwrap();
        assert_eq!(store.get_token().unwrap(), None);
        assert_eq!(store.get_user().unwrap(), None);
    }

    #[test]
    fn corrupt_user_is_reported() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(USER_KEY, "{not json").unwrap();
        let store = SessionStore::new(storage);
        assert!(matches!(store.get_user(), Err(SessionError::Corrupt(_))));
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session-default.json");
        let user = sample_user(Role::Admin);

        {
            let store = SessionStore::file(&path);
            store.set_token("persisted").unwrap();
            store.set_user(&user).unwrap();
        }

        let reopened = SessionStore::file(&path);
        assert_eq!(reopened.get_token().unwrap().as_deref(), Some("persisted"));
        assert_eq!(reopened.get_user().unwrap(), Some(user));
    }
}
