use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use identity_core::AppError;

/// Token carried in `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. A missing header, another
/// scheme, or anything other than exactly two space-separated parts is
/// rejected with 403.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    fn parse(value: &str) -> Option<Self> {
        let mut parts = value.trim().split(' ');
        let (scheme, token) = (parts.next()?, parts.next()?);
        if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        Some(Self(token.to_string()))
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::forbidden(anyhow::anyhow!("missing authorization header")))?;

        Self::parse(auth_header).ok_or_else(|| {
            AppError::forbidden(anyhow::anyhow!("invalid authorization header format"))
        })
    }
}
