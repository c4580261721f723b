use std::net::SocketAddr;
use std::sync::Arc;

use auth::TokenManager;
use auth_service::config::Config;
use auth_service::config::StorageBackend;
use auth_service::domain::auth::ports::UserRepository;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::proto::auth_service_server::AuthServiceServer;
use auth_service::shutdown::Shutdown;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let level = &config.logging.level;
                format!("auth_service={level},auth={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    tracing::info!(
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        storage = ?config.database.storage,
        access_token_expiry_secs = config.jwt.access_token_expiry.num_seconds(),
        refresh_token_expiry_secs = config.jwt.refresh_token_expiry.num_seconds(),
        "Configuration loaded"
    );

    let tokens = Arc::new(TokenManager::new(config.token_config())?);

    match config.database.storage {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
            serve(&config, repository, tokens).await?;

            pg_pool.close().await;
            tracing::info!(database = "postgresql", "Database connection pool closed");
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory user store; data is lost on exit");
            serve(&config, Arc::new(InMemoryUserRepository::new()), tokens).await?;
        }
    }

    tracing::info!("Service stopped");

    Ok(())
}

async fn serve<UR: UserRepository>(
    config: &Config,
    repository: Arc<UR>,
    tokens: Arc<TokenManager>,
) -> Result<(), anyhow::Error> {
    let auth_service = Arc::new(AuthService::new(repository, tokens));
    let shutdown = Shutdown::new();

    // Bind both ports before serving so a taken port fails startup.
    let http_address = SocketAddr::from(([0, 0, 0, 0], config.server.http_port));
    let http_listener = TcpListener::bind(http_address)
        .await
        .with_context(|| format!("failed to bind http listener on {http_address}"))?;
    let grpc_address = SocketAddr::from(([0, 0, 0, 0], config.server.grpc_port));
    let grpc_listener = TcpListener::bind(grpc_address)
        .await
        .with_context(|| format!("failed to bind grpc listener on {grpc_address}"))?;

    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let http_application = create_router(Arc::clone(&auth_service));
    let http_shutdown = shutdown.clone();
    let http_server = tokio::spawn(async move {
        let result = axum::serve(http_listener, http_application)
            .with_graceful_shutdown({
                let shutdown = http_shutdown.clone();
                async move { shutdown.wait().await }
            })
            .await;
        // Either server stopping stops the other.
        http_shutdown.trigger();
        result
    });

    let grpc_service = AuthGrpcService::new(Arc::clone(&auth_service));
    let grpc_shutdown = shutdown.clone();
    let grpc_server = tokio::spawn(async move {
        let result = Server::builder()
            .add_service(AuthServiceServer::new(grpc_service))
            .serve_with_incoming_shutdown(TcpListenerStream::new(grpc_listener), {
                let shutdown = grpc_shutdown.clone();
                async move { shutdown.wait().await }
            })
            .await;
        grpc_shutdown.trigger();
        result
    });

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = signal_shutdown.listen_for_signals().await {
            tracing::error!(error = %e, "Failed to register signal handlers");
            signal_shutdown.trigger();
        }
    });

    let (http_result, grpc_result) = tokio::join!(http_server, grpc_server);

    let http_outcome = server_outcome("http", http_result);
    let grpc_outcome = server_outcome("grpc", grpc_result);

    http_outcome.and(grpc_outcome)
}

/// Log how a server task ended and turn any failure into an error.
fn server_outcome<E>(
    protocol: &str,
    result: Result<Result<(), E>, JoinError>,
) -> Result<(), anyhow::Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match result {
        Ok(Ok(())) => {
            tracing::info!(protocol, "Server exited successfully");
            Ok(())
        }
        Ok(Err(e)) => {
            tracing::error!(protocol, error = %e, "Server error");
            Err(anyhow::Error::new(e).context(format!("{protocol} server failed")))
        }
        Err(e) => {
            tracing::error!(protocol, error = %e, "Server task failed");
            Err(anyhow::Error::new(e).context(format!("{protocol} server task failed")))
        }
    }
}
