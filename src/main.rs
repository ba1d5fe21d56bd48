use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing::info;

use chat_relay::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let port = config.port;
    let static_dir = config.static_dir.clone();

    info!("API key loaded: {}", config.masked_api_key());
    info!("Model: {}", config.model);

    let state = Arc::new(AppState::new(config).context("failed to build upstream client")?);

    let app = routes::create_router(static_dir)
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
