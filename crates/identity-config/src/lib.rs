//! # Identity Config
//!
//! Configuration types for the identity service, loaded from environment
//! variables (a `.env` file is honoured by the binary through `dotenvy`).
//!
//! - [`api`]: HTTP server port, timeouts and Swagger toggle
//! - [`auth`]: token signing secret, issuer and validity window
//! - [`cors`]: allowed cross-origin callers
//! - [`database`]: PostgreSQL connection settings
//! - [`redis`]: Redis connection settings for tokens and events
//!
//! # Example
//!
//! ```ignore
//! use identity_config::Config;
//!
//! let config = Config::from_env()?;
//! println!("listening on {}", config.api.addr());
//! ```

mod env;

pub mod api;
pub mod auth;
pub mod cors;
pub mod database;
pub mod redis;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use redis::RedisConfig;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Every configuration section the service needs at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: env::or_default("ENVIRONMENT", "dev"),
            api: ApiConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
        })
    }
}
