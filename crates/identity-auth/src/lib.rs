//! # Identity Auth
//!
//! Token lifecycle and student authentication for the identity service.
//!
//! - [`maker`]: the [`TokenMaker`] capability and its HS256 implementation [`JwtTokenMaker`]
//! - [`authenticator`]: [`StudentAuthenticator`], binding credential checks to token issuance
//! - [`store`]: the [`CredentialStore`] and [`TokenStore`] boundaries
//! - [`error`]: [`AuthError`] and its closed [`AuthErrorKind`]
//!
//! # Token provenance
//!
//! A signature alone does not make a token valid. Every issued token is
//! recorded in the [`TokenStore`] under its `jti` with a TTL equal to its
//! remaining lifetime, and verification requires the stored value to match
//! the presented token byte for byte. Expiry of that record is the only
//! revocation mechanism.
//!
//! # Example
//!
//! ```ignore
//! use identity_auth::{AuthenticateStudentInput, StudentAuthenticator};
//!
//! let authenticator = StudentAuthenticator::new_jwt(students, tokens, &config.auth);
//!
//! let token = authenticator
//!     .authenticate_student(AuthenticateStudentInput::new("201116548712", "test_password"))
//!     .await?;
//!
//! authenticator.verify_auth(&token.hash).await?;
//! ```

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod maker;
#[cfg(feature = "test-utils")]
pub mod memory;
pub mod store;
pub mod token;

// Re-export commonly used types at crate root
pub use authenticator::{AuthenticateStudentInput, StudentAuthenticator};
pub use claims::TokenClaims;
pub use error::{AuthError, AuthErrorKind, ErrorClass};
pub use maker::{JwtTokenMaker, TokenMaker};
pub use store::{CredentialStore, StoreError, TokenStore};
pub use token::Token;
