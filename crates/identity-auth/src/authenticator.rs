//! Student authentication.

use std::fmt;
use std::sync::Arc;

use tracing::instrument;

use identity_config::AuthConfig;
use identity_core::verify_password;

use crate::error::AuthError;
use crate::maker::{JwtTokenMaker, TokenMaker};
use crate::store::{CredentialStore, TokenStore};
use crate::token::Token;

/// Credentials presented at login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticateStudentInput {
    pub student_id: String,
    pub student_secret: String,
}

impl AuthenticateStudentInput {
    pub fn new(student_id: impl Into<String>, student_secret: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            student_secret: student_secret.into(),
        }
    }
}

impl fmt::Debug for AuthenticateStudentInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticateStudentInput")
            .field("student_id", &self.student_id)
            .field("student_secret", &"<redacted>")
            .finish()
    }
}

/// Binds credential verification to token issuance, and token verification
/// to request gating.
///
/// Holds no mutable state; clone it or share it behind an `Arc`.
#[derive(Clone)]
pub struct StudentAuthenticator {
    token_maker: Arc<dyn TokenMaker>,
    students: Arc<dyn CredentialStore>,
}

impl StudentAuthenticator {
    pub fn new(token_maker: Arc<dyn TokenMaker>, students: Arc<dyn CredentialStore>) -> Self {
        Self {
            token_maker,
            students,
        }
    }

    /// Authenticator issuing HS256 tokens recorded in `tokens`.
    pub fn new_jwt(
        students: Arc<dyn CredentialStore>,
        tokens: Arc<dyn TokenStore>,
        config: &AuthConfig,
    ) -> Self {
        Self::new(Arc::new(JwtTokenMaker::new(config, tokens)), students)
    }

    /// Checks the student's secret and issues a session token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::EmptyStudentId`] / [`AuthError::EmptySecret`] before any lookup
    /// - [`AuthError::StudentNotFound`] when no credential exists for the id
    /// - [`AuthError::SecretMismatch`] when the secret does not match the stored hash
    /// - token maker errors, unchanged
    #[instrument(skip_all, fields(student.id = %input.student_id))]
    pub async fn authenticate_student(
        &self,
        input: AuthenticateStudentInput,
    ) -> Result<Token, AuthError> {
        if input.student_id.is_empty() {
            return Err(AuthError::EmptyStudentId);
        }
        if input.student_secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        let hashed_secret = self
            .students
            .get_secret(&input.student_id)
            .await
            .map_err(AuthError::CredentialStore)?
            .ok_or(AuthError::StudentNotFound)?;

        let matches = verify_password(&input.student_secret, &hashed_secret)
            .await
            .map_err(AuthError::SecretVerification)?;
        if !matches {
            return Err(AuthError::SecretMismatch);
        }

        self.token_maker.create_token(&input.student_id).await
    }

    /// Gates a request on a presented bearer token.
    #[instrument(skip_all)]
    pub async fn verify_auth(&self, hash: &str) -> Result<(), AuthError> {
        if hash.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        self.token_maker.verify_token(hash).await
    }
}
