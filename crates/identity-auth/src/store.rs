//! Storage boundaries consumed by the authenticator.
//!
//! Drivers live in other crates: Postgres for credentials (`identity-db`),
//! Redis for tokens (`identity-cache`). In-memory doubles are in
//! [`crate::memory`] behind the `test-utils` feature.

use std::error::Error;
use std::time::Duration;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("token id {0} is already registered")]
    Conflict(String),

    #[error(transparent)]
    Backend(Box<dyn Error + Send + Sync>),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Read-only lookup of a student's bcrypt hashed secret.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `Ok(None)` when no student has this id.
    async fn get_secret(&self, student_id: &str) -> Result<Option<String>, StoreError>;
}

/// Provenance records of issued tokens, keyed by token id.
///
/// Entries must disappear on their own once `ttl` elapses; nothing in this
/// crate ever deletes one.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Stores `hash` under `token_id` unless the id is already present.
    /// Returns whether the value was written.
    async fn insert_if_absent(
        &self,
        token_id: &str,
        hash: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError>;

    async fn get(&self, token_id: &str) -> Result<Option<String>, StoreError>;
}
