use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An issued session token.
///
/// `hash` is the compact signed JWT handed to the client; `id` is its `jti`
/// and the key of its provenance record in the token store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: Uuid,
    pub user_id: String,
    pub expiration_date: DateTime<Utc>,
    pub hash: String,
}

impl Token {
    pub fn is_expired_at(&self, instant: DateTime<Utc>) -> bool {
        self.expiration_date <= instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_is_expired_at() {
        let now = Utc::now();
        let token = Token {
            id: Uuid::new_v4(),
            user_id: "201116548712".to_string(),
            expiration_date: now + TimeDelta::hours(1),
            hash: "a.b.c".to_string(),
        };

        assert!(!token.is_expired_at(now));
        assert!(token.is_expired_at(now + TimeDelta::hours(1)));
        assert!(token.is_expired_at(now + TimeDelta::hours(2)));
    }
}
