use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginResponse;
use crate::proto::RefreshTokenRequest;

pub async fn refresh_token<S: AuthServicePort>(
    service: &S,
    request: RefreshTokenRequest,
) -> Result<LoginResponse, Status> {
    let pair = service.refresh_tokens(&request.refresh_token).await?;

    Ok(pair.into())
}
