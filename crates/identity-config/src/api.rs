//! HTTP server configuration.
//!
//! # Environment Variables
//!
//! - `API_PORT`: listening port (default: `8000`)
//! - `API_READ_TIMEOUT`: deadline for receiving a request body (default: `15s`)
//! - `API_WRITE_TIMEOUT`: deadline for producing a response (default: `15s`)
//! - `SWAGGER_ENABLED`: serve the OpenAPI UI at `/swagger-ui` (default: `false`)

use std::time::Duration;

use crate::{ConfigError, env};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub port: u16,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub swagger_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            read_timeout: Duration::from_secs(15),
            write_timeout: Duration::from_secs(15),
            swagger_enabled: false,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            port: env::parsed_or("API_PORT", defaults.port)?,
            read_timeout: env::duration_or("API_READ_TIMEOUT", defaults.read_timeout)?,
            write_timeout: env::duration_or("API_WRITE_TIMEOUT", defaults.write_timeout)?,
            swagger_enabled: env::parsed_or("SWAGGER_ENABLED", defaults.swagger_enabled)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.read_timeout, Duration::from_secs(15));
        assert_eq!(config.write_timeout, Duration::from_secs(15));
        assert!(!config.swagger_enabled);
    }

    #[test]
    fn test_addr_binds_all_interfaces() {
        let config = ApiConfig {
            port: 9090,
            ..ApiConfig::default()
        };
        assert_eq!(config.addr(), "0.0.0.0:9090");
    }
}
