use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by access and refresh tokens.
///
/// Timestamps are Unix seconds, as in RFC 7519. Tokens are stateless, so
/// everything a validator needs lives here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email of the user the token was issued to
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid for `ttl` starting at `issued_at`.
    ///
    /// Returns `None` when the expiry is not representable.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    pub fn for_user(
        user_id: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expiration = issued_at.checked_add_signed(ttl)?;

        Some(Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// User identifier the token was issued for.
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at exactly its expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_user() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let claims = Claims::for_user("user123", "alice@example.com", now, Duration::minutes(15))
            .unwrap();

        assert_eq!(claims.user_id(), "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_for_user_with_unrepresentable_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let ttl = Duration::seconds(10_000_000_000_000);

        assert_eq!(Claims::for_user("user123", "alice@example.com", now, ttl), None);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "user123".to_string(),
            email: "alice@example.com".to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }
}
