//! Secret hashing with bcrypt.
//!
//! bcrypt is deliberately slow, so both operations run on tokio's blocking
//! pool instead of stalling the async workers.

use bcrypt::{DEFAULT_COST, hash, verify};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Hashes `password` with the default bcrypt cost.
pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST)).await??;
    Ok(hashed)
}

/// Compares `password` against a stored bcrypt `hash`.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash cannot be
/// parsed or the blocking task fails.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || verify(password, &hash)).await??;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hashed = hash_password("test_password").await.unwrap();

        assert_ne!(hashed, "test_password");
        assert!(hashed.starts_with("$2"));
        assert!(verify_password("test_password", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_wrong_password() {
        let hashed = hash_password("test_password").await.unwrap();
        assert!(!verify_password("wrong", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let first = hash_password("same").await.unwrap();
        let second = hash_password("same").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_verify_against_garbage_hash() {
        let result = verify_password("test_password", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(PasswordError::Bcrypt(_))));
    }
}
