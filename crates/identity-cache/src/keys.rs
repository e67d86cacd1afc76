//! Redis key layout.

/// Key holding the signed token issued under `token_id`.
///
/// `token:{id}`, or `{prefix}:token:{id}` when a prefix is configured.
pub fn token(prefix: Option<&str>, token_id: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:token:{}", prefix, token_id),
        None => format!("token:{}", token_id),
    }
}
