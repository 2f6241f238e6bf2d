use helpdesk::server::{
    config::Config, error::Error, model::app::AppState, scheduler::Scheduler, startup,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let token_verifier = startup::build_token_verifier(&config)?;
    let session = startup::connect_to_session(&config).await?;
    let db = startup::connect_to_database(&config).await?;

    // Held for the lifetime of the server
    let _scheduler = Scheduler::new(db.clone(), &config).await?.start().await?;

    tracing::info!("Starting server");

    let state = AppState {
        db,
        token_verifier,
        max_attachment_size: config.max_attachment_size,
    };
    let app = startup::build_app(state, session);

    startup::serve(&config, app).await
}
