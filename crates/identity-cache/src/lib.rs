//! # Identity Cache
//!
//! Redis-backed [`TokenStore`](identity_auth::TokenStore) for the identity
//! service.
//!
//! - [`keys`]: key layout for token provenance records
//! - [`tokens`]: [`RedisTokenStore`] over a shared [`ConnectionManager`]
//!
//! # Example
//!
//! ```ignore
//! use identity_cache::{RedisTokenStore, connect};
//!
//! let conn = connect(&config.redis).await?;
//! let tokens = RedisTokenStore::new(conn, config.redis.key_prefix.clone());
//! ```

pub mod keys;
pub mod tokens;

use identity_config::RedisConfig;
use redis::{Client, RedisError, aio::ConnectionManager};
use tracing::info;

pub use tokens::RedisTokenStore;

/// Opens a reconnecting connection manager; clones share one connection.
pub async fn connect(config: &RedisConfig) -> Result<ConnectionManager, RedisError> {
    let client = Client::open(config.url())?;
    let conn = ConnectionManager::new(client).await?;
    info!(host = %config.host, port = %config.port, "Connected to Redis");
    Ok(conn)
}
