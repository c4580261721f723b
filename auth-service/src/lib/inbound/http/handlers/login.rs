use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    state
        .auth_service
        .login(LoginCommand::new(body.email, body.password))
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}
