use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordHasher;
use auth::TokenPair;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::TokenProvider;
use crate::domain::auth::ports::UserRepository;

/// Domain service implementing registration, login and token refresh.
///
/// Holds no per-request state; every call touches only the injected
/// collaborators, so one instance serves all requests concurrently.
pub struct AuthService<UR, TP>
where
    UR: UserRepository,
    TP: TokenProvider,
{
    repository: Arc<UR>,
    tokens: Arc<TP>,
    password_hasher: PasswordHasher,
}

impl<UR, TP> AuthService<UR, TP>
where
    UR: UserRepository,
    TP: TokenProvider,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `tokens` - Token issuing and validation implementation
    pub fn new(repository: Arc<UR>, tokens: Arc<TP>) -> Self {
        Self {
            repository,
            tokens,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Replace the default password hasher (e.g. to tune Argon2 cost).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }
}

#[async_trait]
impl<UR, TP> AuthServicePort for AuthService<UR, TP>
where
    UR: UserRepository,
    TP: TokenProvider,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthError::UserAlreadyExists(command.email));
        }

        if command.username.is_empty() || command.email.is_empty() || command.password.is_empty()
        {
            return Err(AuthError::BadRequest(
                "username, email and password are required".to_string(),
            ));
        }

        let username = Username::new(command.username)?;
        let email = EmailAddress::new(command.email)?;
        let password_hash = self.password_hasher.hash(&command.password)?;

        // A concurrent registration can slip past the lookup above; the
        // store's uniqueness constraint reports it as AlreadyExists.
        let user = self
            .repository
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user.id)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        if command.email.is_empty() || command.password.is_empty() {
            return Err(AuthError::BadRequest(
                "email and password are required".to_string(),
            ));
        }

        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(command.email.clone()))?;

        let is_valid = self
            .password_hasher
            .verify(&command.password, &user.password_hash)
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                AuthError::PasswordVerification(e.to_string())
            })?;

        if !is_valid {
            tracing::warn!(user_id = %user.id, "Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self
            .tokens
            .issue_token_pair(&user.id.to_string(), user.email.as_str())
            .map_err(|e| AuthError::TokenGenerationFailed(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(pair)
    }

    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        if refresh_token.is_empty() {
            return Err(AuthError::BadRequest(
                "refresh token is required".to_string(),
            ));
        }

        let pair = self.tokens.rotate_tokens(refresh_token)?;

        tracing::debug!("Token pair rotated");

        Ok(pair)
    }

    async fn validate_token(&self, _token: &str) -> Result<Claims, AuthError> {
        Err(AuthError::Unimplemented("ValidateToken".to_string()))
    }
}
