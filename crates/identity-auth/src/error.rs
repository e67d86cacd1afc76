//! Authentication errors.
//!
//! [`AuthError`] keeps the distinguishing detail for logs, while
//! [`AuthErrorKind`] and [`ErrorClass`] are what callers branch on.

use identity_core::PasswordError;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("student id is empty")]
    EmptyStudentId,

    #[error("student secret is empty")]
    EmptySecret,

    #[error("token is empty")]
    EmptyToken,

    #[error("student not found")]
    StudentNotFound,

    #[error("student secret does not match")]
    SecretMismatch,

    #[error("token has expired")]
    TokenExpired,

    #[error("token is malformed: {0}")]
    MalformedToken(String),

    #[error("token was not emitted by this service")]
    TokenNotEmitted,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The configured validity window yields no issuable expiry: it is not
    /// positive, or it overflows the representable date range.
    #[error("token duration {0} cannot produce a valid expiry")]
    InvalidDuration(chrono::TimeDelta),

    #[error("token store failure: {0}")]
    TokenStore(#[source] StoreError),

    #[error("credential store failure: {0}")]
    CredentialStore(#[source] StoreError),

    #[error("failed to verify student secret: {0}")]
    SecretVerification(#[source] PasswordError),
}

/// Closed set of failure kinds, compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    EmptyStudentId,
    EmptySecret,
    EmptyToken,
    StudentNotFound,
    SecretMismatch,
    TokenExpired,
    MalformedToken,
    TokenNotEmitted,
    Signing,
    InvalidDuration,
    TokenStore,
    CredentialStore,
    SecretVerification,
}

/// How a failure must be surfaced at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Caller-correctable input.
    Input,
    /// Unknown student or wrong secret; never distinguished on the wire.
    InvalidCredentials,
    /// Valid token whose window has lapsed; the client should log in again.
    Expired,
    /// Token that is not acceptable and will never become acceptable.
    Forbidden,
    /// Infrastructure failure.
    Unexpected,
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            Self::EmptyStudentId => AuthErrorKind::EmptyStudentId,
            Self::EmptySecret => AuthErrorKind::EmptySecret,
            Self::EmptyToken => AuthErrorKind::EmptyToken,
            Self::StudentNotFound => AuthErrorKind::StudentNotFound,
            Self::SecretMismatch => AuthErrorKind::SecretMismatch,
            Self::TokenExpired => AuthErrorKind::TokenExpired,
            Self::MalformedToken(_) => AuthErrorKind::MalformedToken,
            Self::TokenNotEmitted => AuthErrorKind::TokenNotEmitted,
            Self::Signing(_) => AuthErrorKind::Signing,
            Self::InvalidDuration(_) => AuthErrorKind::InvalidDuration,
            Self::TokenStore(_) => AuthErrorKind::TokenStore,
            Self::CredentialStore(_) => AuthErrorKind::CredentialStore,
            Self::SecretVerification(_) => AuthErrorKind::SecretVerification,
        }
    }

    pub fn class(&self) -> ErrorClass {
        self.kind().class()
    }
}

impl AuthErrorKind {
    pub fn class(self) -> ErrorClass {
        match self {
            Self::EmptyStudentId | Self::EmptySecret | Self::EmptyToken => ErrorClass::Input,
            Self::StudentNotFound | Self::SecretMismatch => ErrorClass::InvalidCredentials,
            Self::TokenExpired => ErrorClass::Expired,
            Self::MalformedToken | Self::TokenNotEmitted => ErrorClass::Forbidden,
            Self::Signing
            | Self::InvalidDuration
            | Self::TokenStore
            | Self::CredentialStore
            | Self::SecretVerification => ErrorClass::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            AuthError::MalformedToken("bad signature".to_string()).kind(),
            AuthErrorKind::MalformedToken
        );
        assert_eq!(AuthError::TokenExpired.kind(), AuthErrorKind::TokenExpired);
        assert_eq!(
            AuthError::TokenStore(StoreError::Conflict("abc".to_string())).kind(),
            AuthErrorKind::TokenStore
        );
    }

    #[test]
    fn test_credentials_failures_share_a_class() {
        assert_eq!(
            AuthError::StudentNotFound.class(),
            AuthError::SecretMismatch.class()
        );
        assert_eq!(
            AuthError::StudentNotFound.class(),
            ErrorClass::InvalidCredentials
        );
    }

    #[test]
    fn test_token_failure_classes() {
        assert_eq!(AuthError::TokenExpired.class(), ErrorClass::Expired);
        assert_eq!(AuthError::TokenNotEmitted.class(), ErrorClass::Forbidden);
        assert_eq!(
            AuthError::MalformedToken(String::new()).class(),
            ErrorClass::Forbidden
        );
        assert_eq!(AuthError::EmptyToken.class(), ErrorClass::Input);
    }

    #[test]
    fn test_infrastructure_failures_are_unexpected() {
        let store = AuthError::CredentialStore(StoreError::backend(std::io::Error::other("down")));
        assert_eq!(store.class(), ErrorClass::Unexpected);
        assert!(store.to_string().contains("down"));

        let duration = AuthError::InvalidDuration(chrono::TimeDelta::zero());
        assert_eq!(duration.class(), ErrorClass::Unexpected);
    }
}
