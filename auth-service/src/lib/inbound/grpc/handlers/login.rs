use tonic::Status;

use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: &S,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let pair = service
        .login(LoginCommand::new(request.email, request.password))
        .await?;

    Ok(pair.into())
}
