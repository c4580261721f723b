#![allow(dead_code)]

use std::sync::Arc;

use auth::HashParams;
use auth::ManualClock;
use auth::PasswordHasher;
use auth::TokenConfig;
use auth::TokenManager;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;

pub const ACCESS_SECRET: &str = "test-access-secret-at-least-32-bytes-long";
pub const REFRESH_SECRET: &str = "test-refresh-secret-at-least-32-bytes-long";

pub type TestAuthService = AuthService<InMemoryUserRepository, TokenManager>;

/// Service graph wired with the in-memory store and a controllable clock.
pub struct TestContext {
    pub service: Arc<TestAuthService>,
    pub repository: Arc<InMemoryUserRepository>,
    pub tokens: Arc<TokenManager>,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::default());
        let tokens = Arc::new(
            TokenManager::with_clock(
                TokenConfig {
                    access_secret: ACCESS_SECRET.to_string(),
                    refresh_secret: REFRESH_SECRET.to_string(),
                    access_ttl: TokenConfig::default_access_ttl(),
                    refresh_ttl: TokenConfig::default_refresh_ttl(),
                },
                clock.clone(),
            )
            .expect("Failed to create token manager"),
        );
        let repository = Arc::new(InMemoryUserRepository::new());

        // Minimal Argon2 cost keeps the suite fast.
        let hasher = PasswordHasher::with_params(
            HashParams::new(1024, 1, 1, None).expect("Failed to build hash params"),
        );
        let service = Arc::new(
            AuthService::new(Arc::clone(&repository), Arc::clone(&tokens))
                .with_password_hasher(hasher),
        );

        Self {
            service,
            repository,
            tokens,
            clock,
        }
    }

    pub fn grpc_service(&self) -> AuthGrpcService<TestAuthService> {
        AuthGrpcService::new(Arc::clone(&self.service))
    }
}

/// Test application that spawns a real HTTP server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub context: TestContext,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let context = TestContext::new();

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(Arc::clone(&context.service));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            context,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }
}
