use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;

pub mod login;
pub mod refresh;
pub mod register;
pub mod validate;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    NotImplemented(String),
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotImplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::BadRequest(_) | AuthError::PasswordTooShort { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::UserAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AuthError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::InvalidToken(_) => ApiError::Unauthorized(err.to_string()),
            AuthError::Unimplemented(_) => ApiError::NotImplemented(err.to_string()),
            AuthError::StoreUnavailable(_) => {
                tracing::error!(error = %err, "User store unavailable");
                ApiError::ServiceUnavailable("Service temporarily unavailable".to_string())
            }
            AuthError::PasswordVerification(_)
            | AuthError::TokenGenerationFailed(_)
            | AuthError::Internal(_) => {
                tracing::error!(error = %err, "Request failed with internal error");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Access/refresh pair as returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPairData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<auth::TokenPair> for TokenPairData {
    fn from(pair: auth::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_mapping() {
        let cases = [
            (AuthError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AuthError::PasswordTooShort { min: 6, actual: 2 },
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::UserAlreadyExists("a@x.com".into()), StatusCode::CONFLICT),
            (AuthError::UserNotFound("a@x.com".into()), StatusCode::NOT_FOUND),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken("x".into()), StatusCode::UNAUTHORIZED),
            (
                AuthError::Unimplemented("ValidateToken".into()),
                StatusCode::NOT_IMPLEMENTED,
            ),
            (
                AuthError::StoreUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AuthError::PasswordVerification("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::TokenGenerationFailed("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AuthError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err.clone()).into_response();
            assert_eq!(response.status(), expected, "wrong status for {:?}", err);
        }
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let api_error = ApiError::from(AuthError::Internal("relation users does not exist".into()));
        assert_eq!(
            api_error,
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );
    }
}
