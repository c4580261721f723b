use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::login;
use super::handlers::refresh_token;
use super::handlers::register;
use super::handlers::validate_token;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RefreshTokenRequest;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::proto::TokenRequest;
use crate::proto::TokenResponse;

pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<S: AuthServicePort> AuthServiceProto for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn validate_token(
        &self,
        request: Request<TokenRequest>,
    ) -> Result<Response<TokenResponse>, Status> {
        let response =
            validate_token::validate_token(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn refresh_token(
        &self,
        request: Request<RefreshTokenRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response =
            refresh_token::refresh_token(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
