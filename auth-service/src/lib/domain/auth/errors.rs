use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Username contains control characters")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email must not be empty")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failures reported by a user store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    /// Store could not be reached (connection, pool or I/O failure).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for authentication use cases.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password verification failed: {0}")]
    PasswordVerification(String),

    #[error("Password too short: minimum {min} characters, got {actual}")]
    PasswordTooShort { min: usize, actual: usize },

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    /// Capability that exists on the API surface but is not built yet.
    #[error("method {0} not implemented")]
    Unimplemented(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UsernameError> for AuthError {
    fn from(err: UsernameError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}

impl From<EmailError> for AuthError {
    fn from(err: EmailError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(email) => AuthError::UserAlreadyExists(email),
            RepositoryError::NotFound(id) => AuthError::UserNotFound(id),
            RepositoryError::Unavailable(msg) => AuthError::StoreUnavailable(msg),
            RepositoryError::Database(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::EmptyPassword => AuthError::BadRequest(err.to_string()),
            PasswordError::PasswordTooShort { min, actual } => {
                AuthError::PasswordTooShort { min, actual }
            }
            PasswordError::HashingFailed(msg) => AuthError::Internal(msg),
            PasswordError::InvalidHashFormat(msg) => AuthError::PasswordVerification(msg),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => AuthError::TokenExpired,
            JwtError::InvalidToken(msg) => AuthError::InvalidToken(msg),
            JwtError::SigningFailed(msg) => AuthError::TokenGenerationFailed(msg),
            JwtError::InvalidConfiguration(msg) => AuthError::Internal(msg),
        }
    }
}
