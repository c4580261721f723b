use auth::TokenPair;
use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod login;
pub mod refresh_token;
pub mod register;
pub mod validate_token;

const INTERNAL_ERROR_MESSAGE: &str = "internal error";

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::BadRequest(_) | AuthError::PasswordTooShort { .. } => {
                Status::invalid_argument(err.to_string())
            }
            AuthError::UserAlreadyExists(_) => Status::already_exists(err.to_string()),
            AuthError::UserNotFound(_) => Status::not_found(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::InvalidToken(_) => Status::unauthenticated(err.to_string()),
            AuthError::Unimplemented(_) => Status::unimplemented(err.to_string()),
            AuthError::StoreUnavailable(_) => {
                tracing::error!(error = %err, "User store unavailable");
                Status::unavailable("service temporarily unavailable")
            }
            AuthError::PasswordVerification(_)
            | AuthError::TokenGenerationFailed(_)
            | AuthError::Internal(_) => {
                tracing::error!(error = %err, "Request failed with internal error");
                Status::internal(INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl From<TokenPair> for crate::proto::LoginResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}
