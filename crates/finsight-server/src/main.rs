//! finsight: retrieval-augmented analyst for financial research reports.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads FINSIGHT_* variables.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = finsight_core::AnalystConfig::from_env()
        .map_err(|e| anyhow::anyhow!("configuration: {e}"))?;

    let port: u16 = std::env::var("FINSIGHT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3900);

    let state = Arc::new(AppState::new(config));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("finsight listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
