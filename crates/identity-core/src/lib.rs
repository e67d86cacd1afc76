//! # Identity Core
//!
//! Core types, errors, and utilities shared by the identity service crates.
//!
//! - [`errors`]: HTTP-facing [`AppError`] with stable error codes
//! - [`password`]: bcrypt hashing and verification on the blocking pool
//!
//! # Example
//!
//! ```ignore
//! use identity_core::{AppError, ErrorCode, hash_password, verify_password};
//!
//! let hash = hash_password("celacanto-provoca-maremoto").await?;
//! assert!(verify_password("celacanto-provoca-maremoto", &hash).await?);
//!
//! let err = AppError::bad_request(ErrorCode::InvalidCpf, anyhow::anyhow!("bad check digit"));
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use password::{PasswordError, hash_password, verify_password};
