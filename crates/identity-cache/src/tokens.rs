//! Token provenance records in Redis.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use tracing::{debug, instrument};

use identity_auth::{StoreError, TokenStore};

use crate::keys;

/// [`TokenStore`] writing `SET key hash NX PX ttl` and reading with `GET`.
#[derive(Clone)]
pub struct RedisTokenStore {
    conn: ConnectionManager,
    key_prefix: Option<String>,
}

impl std::fmt::Debug for RedisTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTokenStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisTokenStore {
    pub fn new(conn: ConnectionManager, key_prefix: Option<String>) -> Self {
        Self { conn, key_prefix }
    }

    fn key(&self, token_id: &str) -> String {
        keys::token(self.key_prefix.as_deref(), token_id)
    }
}

/// `PX` rejects zero, so sub-millisecond TTLs round up.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    #[instrument(skip(self, hash), fields(cache.operation = "SET_NX"))]
    async fn insert_if_absent(
        &self,
        token_id: &str,
        hash: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let key = self.key(token_id);

        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(hash)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await
            .map_err(StoreError::backend)?;

        let stored = reply.is_some();
        debug!(cache.key = %key, cache.ttl_ms = ttl_millis(ttl), stored, "Token registered");
        Ok(stored)
    }

    #[instrument(skip(self), fields(cache.operation = "GET"))]
    async fn get(&self, token_id: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let key = self.key(token_id);

        let hash: Option<String> = conn.get(&key).await.map_err(StoreError::backend)?;
        if hash.is_none() {
            debug!(cache.key = %key, "Token miss");
        }
        Ok(hash)
    }
}
