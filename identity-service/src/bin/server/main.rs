use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::SigningKey;
use identity_service::config::Config;
use identity_service::config::StorageBackend;
use identity_service::domain::user::service::CredentialService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresUserRepository;
use identity_service::outbound::repositories::UserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage_backend = ?config.storage.backend,
        token_ttl_seconds = config.jwt.ttl_seconds,
        "Configuration loaded"
    );

    let signing_key = match &config.jwt.secret {
        Some(secret) => SigningKey::from_bytes(secret.as_bytes().to_vec())
            .context("Invalid jwt.secret")?,
        None => {
            tracing::warn!("No jwt.secret configured, generated an ephemeral signing key");
            SigningKey::generate()
        }
    };

    let token_ttl = chrono::Duration::try_seconds(config.jwt.ttl_seconds)
        .context("jwt.ttl_seconds is out of range")?;
    let authenticator = Arc::new(Authenticator::new(&signing_key, token_ttl));

    let user_store = match config.storage.backend {
        StorageBackend::Memory => UserStore::memory(),
        StorageBackend::Postgres => {
            let database_url = config
                .storage
                .database_url
                .as_deref()
                .context("storage.database_url is required for the postgres backend")?;

            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            UserStore::Postgres(PostgresUserRepository::new(pg_pool))
        }
    };
    tracing::info!(backend = user_store.backend_name(), "User store ready");

    let credential_service = Arc::new(CredentialService::new(
        Arc::new(user_store),
        authenticator,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(credential_service)).await?;
    tracing::info!("Server exited");

    Ok(())
}
