use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use agent_backend::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,agent_backend=debug")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let state = Arc::new(AppState::from_config(&config).context("building LLM client")?);

    let app = routes::create_router()
        .with_state(state)
        .layer(routes::cors_layer(&config.cors_origins));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(%addr, "agent backend listening");
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
