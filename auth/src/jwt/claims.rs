use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Bound to one authenticated principal: subject (user id), username,
/// issued-at, and expiry. Tokens are stateless; validity is determined
/// purely from these fields and the signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username at issuance time
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a user with expiry `ttl` from now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username to embed alongside the subject
    /// * `ttl` - Duration until the token expires
    pub fn new(user_id: impl ToString, username: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Issued-at as a UTC timestamp.
    ///
    /// Returns `None` if the `iat` claim is out of the representable range.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_subject_and_username() {
        let claims = AccessClaims::new("user123", "alice", Duration::hours(1));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_expiry_is_ttl_after_issuance() {
        let claims = AccessClaims::new("user123", "alice", Duration::hours(24));

        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_issued_at_round_trips() {
        let claims = AccessClaims::new("user123", "alice", Duration::hours(1));

        let issued_at = claims.issued_at().expect("iat should be representable");
        assert_eq!(issued_at.timestamp(), claims.iat);
    }
}
