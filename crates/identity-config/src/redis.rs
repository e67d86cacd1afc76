//! Redis (memory DB) settings used by the token store and the event stream.
//!
//! # Environment Variables
//!
//! - `MEMORY_DB_HOST`, `MEMORY_DB_PORT` (required)
//! - `MEMORY_DB_USER`, `MEMORY_DB_PASSWORD`: ACL credentials, used only when a user is set
//! - `CACHE_PREFIX`: optional namespace prepended to every key

use std::fmt;

use crate::{ConfigError, env};

#[derive(Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub host: String,
    pub port: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub key_prefix: Option<String>,
}

impl RedisConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::required("MEMORY_DB_HOST")?,
            port: env::required("MEMORY_DB_PORT")?,
            user: env::optional("MEMORY_DB_USER"),
            password: env::optional("MEMORY_DB_PASSWORD"),
            key_prefix: env::optional("CACHE_PREFIX"),
        })
    }

    pub fn url(&self) -> String {
        match &self.user {
            Some(user) => format!(
                "redis://{}:{}@{}:{}",
                user,
                self.password.as_deref().unwrap_or_default(),
                self.host,
                self.port
            ),
            None => format!("redis://{}:{}", self.host, self.port),
        }
    }
}

impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}
