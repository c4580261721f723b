use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Currently always answers 501 Not Implemented.
pub async fn validate<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<ValidateRequestBody>,
) -> Result<ApiSuccess<ValidateResponseData>, ApiError> {
    state
        .auth_service
        .validate_token(&body.token)
        .await
        .map_err(ApiError::from)
        .map(|claims| {
            ApiSuccess::new(
                StatusCode::OK,
                ValidateResponseData {
                    valid: true,
                    user_id: claims.sub,
                    email: claims.email,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateRequestBody {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponseData {
    pub valid: bool,
    pub user_id: String,
    pub email: String,
}
