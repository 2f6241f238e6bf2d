use std::future::Future;

use axum::Router;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_sessions::SessionManagerLayer;
use tower_sessions_redis_store::RedisStore;

use crate::server::{
    config::Config, error::Error, model::app::AppState, router,
    service::auth::token::TokenVerifier,
};

/// Session layer backed by the Valkey/Redis pool.
pub type RedisSessionLayer =
    SessionManagerLayer<RedisStore<tower_sessions_redis_store::fred::prelude::Pool>>;

/// Build the verifier for Clerk session tokens
pub fn build_token_verifier(config: &Config) -> Result<TokenVerifier, Error> {
    TokenVerifier::from_rsa_pem(
        config.clerk_jwt_public_key.as_bytes(),
        config.clerk_issuer.as_deref(),
    )
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied");

    Ok(db)
}

/// Connect to Valkey/Redis and configure session management
pub async fn connect_to_session(config: &Config) -> Result<RedisSessionLayer, Error> {
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};
    use tower_sessions_redis_store::fred::prelude::*;

    let config = Config::from_url(&config.valkey_url)?;
    let pool = Pool::new(config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    let session_store = RedisStore::new(pool);

    // Plain HTTP cookies are only allowed in debug builds
    let secure_cookies = !cfg!(debug_assertions);

    let session = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session)
}

/// Assemble the application router with state and the session layer applied.
pub fn build_app(state: AppState, session: RedisSessionLayer) -> Router {
    router::routes().layer(session).with_state(state)
}

/// Bind the configured address and serve until ctrl-c is received.
pub async fn serve(config: &Config, app: Router) -> Result<(), Error> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves once `signal` fires. If listening fails the future never resolves, so the server
/// keeps running instead of shutting down at once.
async fn wait_for_shutdown(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received, draining connections");
}
