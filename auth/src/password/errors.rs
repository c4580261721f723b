use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password too short: minimum {min} characters, got {actual}")]
    PasswordTooShort { min: usize, actual: usize },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format: {0}")]
    InvalidHashFormat(String),
}
