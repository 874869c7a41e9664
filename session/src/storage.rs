//! Persisted key-value entries and the bearer-token store.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser `Storage` is backed by `localStorage`; natively and in tests
//! it is `MemoryStorage`. `TokenStore` is the only writer of the `authToken`
//! entry besides the identity adapter's own credential key.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Key under which the bearer token is persisted.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// String key-value persistence that survives page reloads.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local `Storage` used by tests and the server render path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Bearer-token cache shared by the coordinator and the API client.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Current token, if any. Empty strings count as absent.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.storage
            .get(AUTH_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Store `token`; an empty token clears the entry instead.
    pub fn set(&self, token: &str) {
        if token.is_empty() {
            self.clear();
        } else {
            self.storage.set(AUTH_TOKEN_KEY, token);
        }
    }

    pub fn clear(&self) {
        self.storage.remove(AUTH_TOKEN_KEY);
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("present", &self.get().is_some())
            .finish()
    }
}
