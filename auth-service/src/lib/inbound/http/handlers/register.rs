use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn register<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .auth_service
        .register(RegisterCommand::new(body.username, body.email, body.password))
        .await
        .map_err(ApiError::from)
        .map(|user_id| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData {
                    user_id: user_id.to_string(),
                },
            )
        })
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user_id: String,
}
