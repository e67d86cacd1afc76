//! Session token creation and verification.
//!
//! Tokens are compact JWS strings signed with HS256 over the configured
//! secret. Verification checks, in order:
//!
//! 1. signature, algorithm and registered claims (`exp` with no leeway, then `iss`)
//! 2. that the token store holds a record for the `jti`
//! 3. that the recorded token is byte-for-byte the presented one
//!
//! An expired token is reported as [`AuthError::TokenExpired`] whenever its
//! signature is valid, even if its issuer is also wrong.
//!
//! Issuance fails with [`AuthError::InvalidDuration`] when the configured
//! window is not positive or overflows the date range.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use identity_config::AuthConfig;

use crate::claims::TokenClaims;
use crate::error::AuthError;
use crate::store::{StoreError, TokenStore};
use crate::token::Token;

/// Capability to issue and check session tokens.
#[async_trait]
pub trait TokenMaker: Send + Sync {
    /// Signs a new token for `user_id` and records its provenance.
    async fn create_token(&self, user_id: &str) -> Result<Token, AuthError>;

    /// Succeeds only for an unexpired token issued by this service.
    async fn verify_token(&self, hash: &str) -> Result<(), AuthError>;
}

/// HS256 [`TokenMaker`] backed by a [`TokenStore`].
#[derive(Clone)]
pub struct JwtTokenMaker {
    issuer: String,
    duration: chrono::TimeDelta,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    tokens: Arc<dyn TokenStore>,
}

impl JwtTokenMaker {
    pub fn new(config: &AuthConfig, tokens: Arc<dyn TokenStore>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            issuer: config.issuer.clone(),
            duration: config.duration,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            tokens,
        }
    }

    /// Signs a token without recording it in the token store.
    ///
    /// Such a token passes signature checks but fails verification with
    /// [`AuthError::TokenNotEmitted`]. A negative duration yields a token
    /// that is already expired.
    pub fn sign(&self, user_id: &str) -> Result<Token, AuthError> {
        let now = Utc::now();
        let expiration_date = now
            .checked_add_signed(self.duration)
            .ok_or(AuthError::InvalidDuration(self.duration))?;
        let id = Uuid::new_v4();

        let claims = TokenClaims {
            jti: id.to_string(),
            exp: expiration_date.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            sub: user_id.to_string(),
        };

        let hash = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)?;

        Ok(Token {
            id,
            user_id: user_id.to_string(),
            expiration_date,
            hash,
        })
    }

    /// Checks signature, algorithm, expiry and issuer, returning the claims.
    pub fn decode_claims(&self, hash: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(hash, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::MalformedToken(e.to_string()),
            })
    }
}

#[async_trait]
impl TokenMaker for JwtTokenMaker {
    #[instrument(skip(self), fields(token.id))]
    async fn create_token(&self, user_id: &str) -> Result<Token, AuthError> {
        let token = self.sign(user_id)?;
        tracing::Span::current().record("token.id", tracing::field::display(token.id));

        // A token that cannot be recorded is never issued.
        let ttl = match (token.expiration_date - Utc::now()).to_std() {
            Ok(ttl) if !ttl.is_zero() => ttl,
            _ => {
                warn!(duration = %self.duration, "Token already expired at issuance");
                return Err(AuthError::InvalidDuration(self.duration));
            }
        };

        let token_id = token.id.to_string();
        let stored = self
            .tokens
            .insert_if_absent(&token_id, &token.hash, ttl)
            .await
            .map_err(AuthError::TokenStore)?;

        if !stored {
            warn!("Token id already present in token store");
            return Err(AuthError::TokenStore(StoreError::Conflict(token_id)));
        }

        Ok(token)
    }

    #[instrument(skip_all, fields(token.id))]
    async fn verify_token(&self, hash: &str) -> Result<(), AuthError> {
        let claims = self.decode_claims(hash)?;
        tracing::Span::current().record("token.id", claims.jti.as_str());

        if claims.jti.is_empty() {
            return Err(AuthError::TokenNotEmitted);
        }

        let stored = self
            .tokens
            .get(&claims.jti)
            .await
            .map_err(AuthError::TokenStore)?;

        match stored {
            Some(stored) if stored == hash => Ok(()),
            Some(_) => {
                warn!("Stored token differs from presented token");
                Err(AuthError::TokenNotEmitted)
            }
            None => Err(AuthError::TokenNotEmitted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthErrorKind;
    use crate::memory::InMemoryTokenStore;
    use chrono::TimeDelta;

    fn maker(secret: &str, issuer: &str, duration: TimeDelta) -> (JwtTokenMaker, Arc<InMemoryTokenStore>) {
        let store = Arc::new(InMemoryTokenStore::new());
        let config = AuthConfig::new(secret, issuer, duration);
        (JwtTokenMaker::new(&config, store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_token_records_provenance() {
        let (maker, store) = maker("secret_secret", "uerj", TimeDelta::hours(1));

        let token = maker.create_token("201116548712").await.unwrap();

        assert_eq!(
            store.get(&token.id.to_string()).await.unwrap(),
            Some(token.hash.clone())
        );
        assert!(maker.verify_token(&token.hash).await.is_ok());
    }

    #[tokio::test]
    async fn test_claims_round_trip() {
        let (maker, _) = maker("secret_secret", "uerj", TimeDelta::hours(1));

        let token = maker.create_token("201116548712").await.unwrap();
        let claims = maker.decode_claims(&token.hash).unwrap();

        assert_eq!(claims.sub, "201116548712");
        assert_eq!(claims.iss, "uerj");
        assert_eq!(claims.jti, token.id.to_string());
        assert_eq!(claims.exp, token.expiration_date.timestamp());
        assert!(claims.iat < claims.exp);
    }

    #[tokio::test]
    async fn test_closed_window_is_not_issued() {
        for duration in [TimeDelta::hours(-1), TimeDelta::zero()] {
            let (maker, _) = maker("secret_secret", "uerj", duration);

            let err = maker.create_token("201116548712").await.unwrap_err();

            assert_eq!(err.kind(), AuthErrorKind::InvalidDuration);
        }
    }

    #[tokio::test]
    async fn test_expired_signed_token_verifies_as_expired() {
        let (maker, store) = maker("secret_secret", "uerj", TimeDelta::hours(-1));

        let token = maker.sign("201116548712").unwrap();

        assert!(store.get(&token.id.to_string()).await.unwrap().is_none());
        let err = maker.verify_token(&token.hash).await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::TokenExpired);
    }

    #[tokio::test]
    async fn test_overflowing_duration_is_an_error() {
        let duration =
            TimeDelta::from_std(std::time::Duration::from_secs(1_000_000 * 365 * 24 * 3600))
                .unwrap();
        let (maker, _) = maker("secret_secret", "uerj", duration);

        let err = maker.sign("201116548712").unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::InvalidDuration);

        let err = maker.create_token("201116548712").await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::InvalidDuration);
        assert_eq!(err.class(), crate::error::ErrorClass::Unexpected);
    }

    #[tokio::test]
    async fn test_expiry_reported_before_wrong_issuer() {
        let (issuing, _) = maker("secret_secret", "uerj", TimeDelta::hours(-1));
        let (verifying, _) = maker("secret_secret", "ufrj", TimeDelta::hours(1));

        let token = issuing.sign("201116548712").unwrap();

        let err = verifying.verify_token(&token.hash).await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::TokenExpired);
    }

    #[tokio::test]
    async fn test_wrong_secret_is_malformed() {
        let (issuing, _) = maker("secret_secret", "uerj", TimeDelta::hours(1));
        let (verifying, _) = maker("another_secret", "uerj", TimeDelta::hours(1));

        let token = issuing.create_token("201116548712").await.unwrap();

        let err = verifying.verify_token(&token.hash).await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::MalformedToken);
    }

    #[tokio::test]
    async fn test_garbage_is_malformed() {
        let (maker, _) = maker("secret_secret", "uerj", TimeDelta::hours(1));

        for hash in ["not-a-token", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30."] {
            let err = maker.verify_token(hash).await.unwrap_err();
            assert_eq!(err.kind(), AuthErrorKind::MalformedToken, "{hash}");
        }
    }

    #[tokio::test]
    async fn test_other_algorithm_is_malformed() {
        let (maker, _) = maker("secret_secret", "uerj", TimeDelta::hours(1));
        let claims = TokenClaims {
            jti: Uuid::new_v4().to_string(),
            exp: (Utc::now() + TimeDelta::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
            iss: "uerj".to_string(),
            sub: "201116548712".to_string(),
        };
        let hash = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"secret_secret"),
        )
        .unwrap();

        let err = maker.verify_token(&hash).await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::MalformedToken);
    }

    #[tokio::test]
    async fn test_signed_but_unrecorded_token_is_not_emitted() {
        let (maker, _) = maker("secret_secret", "uerj", TimeDelta::hours(1));

        let token = maker.sign("201116548712").unwrap();

        let err = maker.verify_token(&token.hash).await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::TokenNotEmitted);
    }

    #[tokio::test]
    async fn test_stored_hash_mismatch_is_not_emitted() {
        let (maker, store) = maker("secret_secret", "uerj", TimeDelta::hours(1));

        let token = maker.sign("201116548712").unwrap();
        store
            .insert_if_absent(&token.id.to_string(), "something-else", std::time::Duration::from_secs(60))
            .await
            .unwrap();

        let err = maker.verify_token(&token.hash).await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::TokenNotEmitted);
    }

    #[tokio::test]
    async fn test_missing_jti_is_not_emitted() {
        #[derive(serde::Serialize)]
        struct NoJti<'a> {
            exp: i64,
            iat: i64,
            iss: &'a str,
            sub: &'a str,
        }

        let (maker, _) = maker("secret_secret", "uerj", TimeDelta::hours(1));
        let hash = encode(
            &Header::new(Algorithm::HS256),
            &NoJti {
                exp: (Utc::now() + TimeDelta::hours(1)).timestamp(),
                iat: Utc::now().timestamp(),
                iss: "uerj",
                sub: "201116548712",
            },
            &EncodingKey::from_secret(b"secret_secret"),
        )
        .unwrap();

        let err = maker.verify_token(&hash).await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::TokenNotEmitted);
    }

    #[tokio::test]
    async fn test_missing_subject_is_malformed() {
        #[derive(serde::Serialize)]
        struct NoSub<'a> {
            jti: &'a str,
            exp: i64,
            iss: &'a str,
        }

        let (maker, _) = maker("secret_secret", "uerj", TimeDelta::hours(1));
        let hash = encode(
            &Header::new(Algorithm::HS256),
            &NoSub {
                jti: "abc",
                exp: (Utc::now() + TimeDelta::hours(1)).timestamp(),
                iss: "uerj",
            },
            &EncodingKey::from_secret(b"secret_secret"),
        )
        .unwrap();

        let err = maker.verify_token(&hash).await.unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::MalformedToken);
    }
}
