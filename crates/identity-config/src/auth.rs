//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `TOKEN_SECRET`: HMAC signing secret (required)
//! - `TOKEN_ISSUER`: `iss` claim written and expected (default: `identity-service`)
//! - `TOKEN_DURATION`: token validity window, humantime format (default: `3h`).
//!   Zero, or a window whose expiry would not fit a date, is rejected.

use std::fmt;
use std::time::Duration;

use chrono::{TimeDelta, Utc};

use crate::{ConfigError, env};

pub const DEFAULT_ISSUER: &str = "identity-service";
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::from_secs(3 * 60 * 60);

/// Read-only signing parameters, loaded once at startup.
///
/// `duration` is signed so callers can build tokens that are already expired.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub secret: String,
    pub issuer: String,
    pub duration: TimeDelta,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>, duration: TimeDelta) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            duration,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let duration = env::duration_or("TOKEN_DURATION", DEFAULT_TOKEN_DURATION)?;

        Ok(Self {
            secret: env::required("TOKEN_SECRET")?,
            issuer: env::or_default("TOKEN_ISSUER", DEFAULT_ISSUER),
            duration: token_duration(duration)?,
        })
    }
}

/// Accepts a validity window only if it is positive and an expiry computed
/// from now still fits a `DateTime<Utc>`.
fn token_duration(duration: Duration) -> Result<TimeDelta, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "TOKEN_DURATION",
        reason,
    };

    let delta = TimeDelta::from_std(duration).map_err(|e| invalid(e.to_string()))?;
    if delta <= TimeDelta::zero() {
        return Err(invalid("must be positive".to_string()));
    }
    if Utc::now().checked_add_signed(delta).is_none() {
        return Err(invalid(format!("{delta} overflows the date range")));
    }
    Ok(delta)
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("duration", &self.duration)
            .finish()
    }
}
