use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::proto::TokenRequest;
use crate::proto::TokenResponse;

pub async fn validate_token<S: AuthServicePort>(
    service: &S,
    request: TokenRequest,
) -> Result<TokenResponse, Status> {
    let claims = service.validate_token(&request.token).await?;

    Ok(TokenResponse {
        valid: true,
        user_id: claims.sub,
        email: claims.email,
    })
}
