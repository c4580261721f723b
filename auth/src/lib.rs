//! Credential and token primitives for the authentication service
//!
//! Provides the pieces that carry the security invariants:
//! - Password hashing (Argon2id, PHC strings)
//! - Access/refresh token issuance, validation and rotation (HMAC-signed JWTs)
//!
//! Nothing here performs I/O. The service crate defines its own ports and
//! adapts these implementations behind them.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{TokenConfig, TokenManager};
//!
//! let manager = TokenManager::new(TokenConfig {
//!     access_secret: "access_secret_at_least_32_bytes_long".to_string(),
//!     refresh_secret: "refresh_secret_at_least_32_bytes_long".to_string(),
//!     access_ttl: TokenConfig::default_access_ttl(),
//!     refresh_ttl: TokenConfig::default_refresh_ttl(),
//! })
//! .unwrap();
//!
//! let pair = manager.issue_token_pair("user123", "alice@example.com").unwrap();
//! let claims = manager.validate_access_token(&pair.access_token).unwrap();
//! assert_eq!(claims.user_id(), "user123");
//!
//! let rotated = manager.rotate_tokens(&pair.refresh_token).unwrap();
//! assert!(manager.validate_refresh_token(&rotated.refresh_token).is_ok());
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::Clock;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::ManualClock;
pub use jwt::SystemClock;
pub use jwt::TokenConfig;
pub use jwt::TokenManager;
pub use jwt::TokenPair;
pub use password::HashParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
