use std::fmt;
use std::sync::Arc;

use chrono::Duration;

use super::claims::Claims;
use super::clock::Clock;
use super::clock::SystemClock;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Secrets and lifetimes for a [`TokenManager`].
#[derive(Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    /// Default access token lifetime: 15 minutes.
    pub fn default_access_ttl() -> Duration {
        Duration::minutes(15)
    }

    /// Default refresh token lifetime: 7 days.
    pub fn default_refresh_ttl() -> Duration {
        Duration::days(7)
    }

    /// Shortest accepted lifetime. Claims carry whole seconds.
    pub fn min_ttl() -> Duration {
        Duration::seconds(1)
    }

    /// Longest accepted lifetime: 10 years.
    pub fn max_ttl() -> Duration {
        Duration::days(3650)
    }

    /// Check the invariants a token manager relies on.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - A secret is empty, both secrets are equal,
    ///   or a TTL falls outside [`min_ttl`](Self::min_ttl)..=[`max_ttl`](Self::max_ttl)
    pub fn validate(&self) -> Result<(), JwtError> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err(JwtError::InvalidConfiguration(
                "token secrets must not be empty".to_string(),
            ));
        }
        if self.access_secret == self.refresh_secret {
            return Err(JwtError::InvalidConfiguration(
                "access and refresh secrets must differ".to_string(),
            ));
        }
        for ttl in [self.access_ttl, self.refresh_ttl] {
            if ttl < Self::min_ttl() {
                return Err(JwtError::InvalidConfiguration(
                    "token lifetimes must be at least one second".to_string(),
                ));
            }
            if ttl > Self::max_ttl() {
                return Err(JwtError::InvalidConfiguration(
                    "token lifetimes must not exceed 3650 days".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// Secrets stay out of logs.
impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Issues, validates and rotates access/refresh token pairs.
///
/// Each token kind is signed with its own secret, so a leaked access secret
/// cannot forge refresh tokens. Immutable after construction and safe to share
/// across tasks.
///
/// Tokens are stateless: rotating a refresh token does not invalidate the old
/// one, which stays usable until its own expiry.
pub struct TokenManager {
    access: JwtHandler,
    refresh: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenManager {
    /// Create a token manager using the system clock.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - See [`TokenConfig::validate`]
    pub fn new(config: TokenConfig) -> Result<Self, JwtError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a token manager reading time from `clock`.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - See [`TokenConfig::validate`]
    pub fn with_clock(config: TokenConfig, clock: Arc<dyn Clock>) -> Result<Self, JwtError> {
        config.validate()?;

        Ok(Self {
            access: JwtHandler::new(config.access_secret.as_bytes()),
            refresh: JwtHandler::new(config.refresh_secret.as_bytes()),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
            clock,
        })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issue a new access/refresh pair for a user.
    ///
    /// Both tokens share the same issuance instant.
    ///
    /// # Errors
    /// * `SigningFailed` - Either token could not be signed, or the clock is so
    ///   far out that an expiry is not representable
    pub fn issue_token_pair(&self, user_id: &str, email: &str) -> Result<TokenPair, JwtError> {
        let now = self.clock.now();
        let claims_for = |ttl| {
            Claims::for_user(user_id, email, now, ttl)
                .ok_or_else(|| JwtError::SigningFailed("token expiry out of range".to_string()))
        };

        let access_claims = claims_for(self.access_ttl)?;
        let access_token = self.access.encode(&access_claims)?;

        let refresh_claims = claims_for(self.refresh_ttl)?;
        let refresh_token = self.refresh.encode(&refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - The token's expiry is in the past
    /// * `InvalidToken` - Bad signature, malformed token, or non-HMAC algorithm
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate(&self.access, token)
    }

    /// Validate a refresh token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - The token's expiry is in the past
    /// * `InvalidToken` - Bad signature, malformed token, or non-HMAC algorithm
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate(&self.refresh, token)
    }

    /// Exchange a valid refresh token for a brand-new pair.
    ///
    /// # Errors
    /// * `TokenExpired` - The refresh token has expired; nothing is issued
    /// * `InvalidToken` - The refresh token failed verification
    /// * `SigningFailed` - The new pair could not be signed
    pub fn rotate_tokens(&self, refresh_token: &str) -> Result<TokenPair, JwtError> {
        let claims = self.validate_refresh_token(refresh_token)?;
        self.issue_token_pair(&claims.sub, &claims.email)
    }

    fn validate(&self, handler: &JwtHandler, token: &str) -> Result<Claims, JwtError> {
        let claims: Claims = handler.decode(token)?;

        if claims.exp <= claims.iat {
            return Err(JwtError::InvalidToken(
                "expiration is not after issuance".to_string(),
            ));
        }
        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
