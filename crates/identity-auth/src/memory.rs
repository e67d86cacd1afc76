//! In-memory store doubles for tests and local runs without Redis or Postgres.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;

use crate::store::{CredentialStore, StoreError, TokenStore};

#[derive(Clone)]
struct StoredToken {
    hash: String,
    expires_at: Instant,
}

/// Per-entry expiry: each record lives exactly as long as its token.
struct TokenExpiry;

impl moka::Expiry<String, StoredToken> for TokenExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredToken,
        created_at: Instant,
    ) -> Option<Duration> {
        Some(value.expires_at.saturating_duration_since(created_at))
    }
}

/// [`TokenStore`] backed by a [`moka::future::Cache`] with per-entry TTL.
pub struct InMemoryTokenStore {
    tokens: Cache<String, StoredToken>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::with_capacity(100_000)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        let tokens = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(TokenExpiry)
            .build();
        Self { tokens }
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn insert_if_absent(
        &self,
        token_id: &str,
        hash: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let value = StoredToken {
            hash: hash.to_owned(),
            expires_at: Instant::now() + ttl,
        };
        let entry = self
            .tokens
            .entry(token_id.to_owned())
            .or_insert(value)
            .await;
        Ok(entry.is_fresh())
    }

    async fn get(&self, token_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.tokens.get(token_id).await.map(|stored| stored.hash))
    }
}

/// [`CredentialStore`] over a fixed map of student id to bcrypt hash.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(self, student_id: impl Into<String>, hashed_secret: impl Into<String>) -> Self {
        self.insert(student_id, hashed_secret);
        self
    }

    pub fn insert(&self, student_id: impl Into<String>, hashed_secret: impl Into<String>) {
        self.secrets
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(student_id.into(), hashed_secret.into());
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get_secret(&self, student_id: &str) -> Result<Option<String>, StoreError> {
        let secrets = self
            .secrets
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(secrets.get(student_id).cloned())
    }
}
