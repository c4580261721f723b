use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::UserIdError;
use crate::domain::auth::errors::UsernameError;

/// Registered user.
///
/// Holds the password hash only, never the raw password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Non-empty, at most 32 characters, no control characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty or whitespace only
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains control characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = username.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if username.chars().any(char::is_control) {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Email is empty
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated registration payload handed to the store.
///
/// The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Command to register a new user.
///
/// Fields stay raw: the email uniqueness check runs before field validation.
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

// Plaintext passwords stay out of logs.
impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Command to log a user in with email and password.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        let username = Username::new("alice".to_string()).unwrap();
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn test_username_empty() {
        assert_eq!(Username::new(String::new()), Err(UsernameError::Empty));
        assert_eq!(Username::new("   ".to_string()), Err(UsernameError::Empty));
    }

    #[test]
    fn test_username_too_long() {
        let result = Username::new("a".repeat(33));
        assert_eq!(
            result,
            Err(UsernameError::TooLong {
                max: 32,
                actual: 33
            })
        );
    }

    #[test]
    fn test_username_control_characters() {
        assert_eq!(
            Username::new("ali\nce".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_email_valid() {
        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "a@x.com");
    }

    #[test]
    fn test_email_empty() {
        assert_eq!(EmailAddress::new(String::new()), Err(EmailError::Empty));
    }

    #[test]
    fn test_email_invalid() {
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_email_longer_than_255_characters() {
        let domain = format!("{0}.{0}.{0}.com", "d".repeat(63));
        let long = format!("{}@{}", "a".repeat(64), domain);
        assert!(long.len() > 255);

        let email = EmailAddress::new(long.clone()).unwrap();
        assert_eq!(email.as_str(), long);
    }

    #[test]
    fn test_commands_debug_redacts_password() {
        let register = RegisterCommand::new("alice", "a@x.com", "hunter2-secret");
        let rendered = format!("{:?}", register);
        assert!(!rendered.contains("hunter2-secret"));
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("<redacted>"));

        let login = LoginCommand::new("a@x.com", "hunter2-secret");
        let rendered = format!("{:?}", login);
        assert!(!rendered.contains("hunter2-secret"));
        assert!(rendered.contains("a@x.com"));
    }

    #[test]
    fn test_user_id_round_trip_through_string() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("nope").is_err());
    }
}
