use crate::env;

#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Comma-separated `ALLOWED_ORIGINS`; empty means no cross-origin access.
    pub fn from_env() -> Self {
        let allowed_origins = env::or_default("ALLOWED_ORIGINS", "")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}
