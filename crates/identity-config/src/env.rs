//! Environment lookup helpers shared by every config section.

use std::env;
use std::time::Duration;

use crate::ConfigError;

/// Reads a variable that must be present and non-empty.
pub(crate) fn required(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var)),
    }
}

pub(crate) fn optional(var: &'static str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

pub(crate) fn or_default(var: &'static str, default: &str) -> String {
    optional(var).unwrap_or_else(|| default.to_string())
}

/// Parses a `FromStr` variable, falling back to `default` when unset.
pub(crate) fn parsed_or<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional(var) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Parses a humantime duration such as `15s`, `1m` or `3h`.
pub(crate) fn duration_or(var: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match optional(var) {
        Some(raw) => humantime::parse_duration(&raw).map_err(|e| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
