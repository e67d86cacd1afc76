//! Claims carried by session tokens.

use serde::{Deserialize, Serialize};

/// Registered claims of a student session token.
///
/// # Fields
///
/// - `jti`: token id, the provenance lookup key
/// - `exp`: expiration (Unix seconds)
/// - `iat`: issued-at (Unix seconds)
/// - `iss`: issuer, must equal the configured issuer
/// - `sub`: student id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub sub: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = TokenClaims {
            jti: "1b3cbf6e-6b2f-4a53-9f7e-2f4b1c1f9d10".to_string(),
            exp: 1234567890,
            iat: 1234567800,
            iss: "identity-service".to_string(),
            sub: "201116548712".to_string(),
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"201116548712""#));
        assert!(serialized.contains(r#""iss":"identity-service""#));
        assert!(serialized.contains(r#""exp":1234567890"#));
    }

    #[test]
    fn test_missing_jti_deserializes_empty() {
        let json = r#"{"exp":9999999999,"iat":9999999900,"iss":"uerj","sub":"123"}"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        assert!(claims.jti.is_empty());
        assert_eq!(claims.sub, "123");
    }
}
