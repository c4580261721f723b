use async_trait::async_trait;
use auth::Claims;
use auth::JwtError;
use auth::TokenPair;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Raw username, email and password
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `BadRequest` - A field is empty or malformed
    /// * `PasswordTooShort` - Password has fewer than 6 characters
    /// * `StoreUnavailable` - Store could not be reached
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `BadRequest` - Email or password is empty
    /// * `UserNotFound` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordVerification` - Stored hash is malformed
    /// * `TokenGenerationFailed` - Tokens could not be signed
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token for a new pair.
    ///
    /// # Errors
    /// * `BadRequest` - Token is empty
    /// * `TokenExpired` - Refresh token has expired
    /// * `InvalidToken` - Refresh token failed verification
    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Validate an access token.
    ///
    /// # Errors
    /// * `Unimplemented` - Not available yet
    async fn validate_token(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Persistence operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user, assigning its id and timestamps.
    ///
    /// Email uniqueness is enforced atomically with the insert.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Unavailable` - Store could not be reached
    /// * `Database` - Any other store failure
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    /// * `Database` - Any other store failure
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    /// * `Database` - Any other store failure
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Update an existing user, refreshing `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `AlreadyExists` - New email belongs to another user
    /// * `Unavailable` - Store could not be reached
    /// * `Database` - Any other store failure
    async fn update(&self, user: User) -> Result<User, RepositoryError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Unavailable` - Store could not be reached
    /// * `Database` - Any other store failure
    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;
}

/// Issuing and rotating access/refresh tokens.
pub trait TokenProvider: Send + Sync + 'static {
    fn issue_token_pair(&self, user_id: &str, email: &str) -> Result<TokenPair, JwtError>;

    /// Validate `refresh_token` and issue a fresh pair for its subject.
    fn rotate_tokens(&self, refresh_token: &str) -> Result<TokenPair, JwtError>;
}
