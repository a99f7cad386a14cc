//! Question bank frontend server

use quizbank_frontend::{config::Config, create_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting question bank frontend");
    tracing::info!("Backend URL: {}", config.api_url);
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_token.is_none() && !config.token_path.exists() {
        tracing::warn!(
            "No backend token configured (QUIZBANK_API_TOKEN or {:?}). Authenticated calls will fail!",
            config.token_path
        );
    }
    if config.user_id.is_none() {
        tracing::warn!("QUIZBANK_USER_ID not set, edit actions are disabled in tables");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::from_config(config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
