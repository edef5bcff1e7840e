//! Ponitor server - HTTP API for the port dashboard.
//!
//! Exposes the catalog probe fan-out and kill-by-port over three JSON
//! endpoints. Listens on the port given by the `PORT` environment
//! variable, defaulting to 3001.

use std::sync::Arc;

use ponitor_server::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Default listen port, matching the dashboard's expectation.
const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let state = Arc::new(AppState::new());
    let platform = state.platform;
    let router = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Ponitor API server");
    info!("Platform: {}", platform);
    info!("Listening on {}", addr);
    info!("Endpoints: GET /api/health, GET /api/ports, POST /api/kill/:port");

    axum::serve(listener, router).await?;

    Ok(())
}
