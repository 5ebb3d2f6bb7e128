//! Credential store and providers
//!
//! The submission controller reads its bearer token through the
//! [`CredentialProvider`] trait at submit time. The default provider reads a
//! single key from a [`CredentialStore`], a process-wide key/value store of
//! secrets.

use crate::config::{secret_string, AuthConfig, SecretString};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Synchronous source of the bearer credential
pub trait CredentialProvider: Send + Sync {
    /// Current credential, or `None` when nothing is stored
    fn credential(&self) -> Option<SecretString>;
}

/// Key/value store of secrets
///
/// # Example
///
/// ```rust
/// use intake::adapters::credentials::CredentialStore;
///
/// let store = CredentialStore::new();
/// store.set("authToken", "abc123");
/// assert!(store.contains("authToken"));
/// store.remove("authToken");
/// assert!(store.get("authToken").is_none());
/// ```
#[derive(Debug, Default)]
pub struct CredentialStore {
    entries: RwLock<HashMap<String, SecretString>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide store shared by every controller in this process
    pub fn global() -> Arc<CredentialStore> {
        static GLOBAL: OnceLock<Arc<CredentialStore>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(CredentialStore::new())).clone()
    }

    /// Stores a value under `key`, replacing any previous one
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.into(), secret_string(value.into()));
    }

    pub fn get(&self, key: &str) -> Option<SecretString> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(key)
    }

    pub fn remove(&self, key: &str) -> Option<SecretString> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key)
    }
}

/// Reads one key from a [`CredentialStore`]
#[derive(Debug, Clone)]
pub struct StoredCredential {
    store: Arc<CredentialStore>,
    key: String,
}

impl StoredCredential {
    pub fn new(store: Arc<CredentialStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Builds a provider from auth configuration
    ///
    /// A token present in the configuration is written into `store` under the
    /// configured key first.
    pub fn from_config(store: Arc<CredentialStore>, config: &AuthConfig) -> Self {
        if let Some(token) = &config.token {
            use secrecy::ExposeSecret;
            store.set(config.token_key.clone(), token.expose_secret().as_str());
            tracing::debug!(key = %config.token_key, "Seeded credential store from configuration");
        }
        Self::new(store, config.token_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl CredentialProvider for StoredCredential {
    fn credential(&self) -> Option<SecretString> {
        self.store.get(&self.key)
    }
}

/// Provider that always returns the same credential
///
/// Useful for tests and for frontends that manage tokens themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<SecretString>);

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(secret_string(token.into())))
    }

    /// Provider with no credential
    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredential {
    fn credential(&self) -> Option<SecretString> {
        self.0.clone()
    }
}
