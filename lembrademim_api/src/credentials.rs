//! Credential store contract and an in-memory implementation.
//!
//! The client only ever reads the bearer token through [`CredentialStore`];
//! which storage backs it is decided by the caller.

use dashmap::DashMap;

/// Key under which the bearer token is stored.
pub const TOKEN_KEY: &str = "auth_token";

/// Key under which the serialized user profile is stored.
pub const USER_KEY: &str = "auth_user";

/// Failures of a credential store backend.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are corrupt: {0}")]
    Corrupt(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable string key-value store holding the session token and profile.
pub trait CredentialStore: Send + Sync {
    /// Returns the value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Inserts or overwrites the value for `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Thread-safe in-memory store. Contents live as long as the value.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a bearer token.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .insert(TOKEN_KEY.to_string(), token.to_string());
        store
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "abc.def.ghi").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc.def.ghi"));
        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove(USER_KEY).is_ok());
    }

    #[test]
    fn overwrite() {
        let store = MemoryStore::with_token("old");
        store.set(TOKEN_KEY, "new").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("new"));
    }
}
