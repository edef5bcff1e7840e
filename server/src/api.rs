//! HTTP API handlers.
//!
//! Thin adapter over the core prober and terminator: input validation,
//! response shaping, and error-to-status mapping live here. Nothing in a
//! handler is fatal to the service; every failure is scoped to a single
//! response.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use futures::future::join_all;
use ponitor_core::{Error, PortProber, ProcessTerminator, COMMON_PORTS};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::types::{HealthResponse, KillResponse, PortEntry, PortsResponse};

/// Shared state injected into every handler.
///
/// The platform string is computed once at startup and never queried
/// again.
pub struct AppState {
    pub prober: PortProber,
    pub terminator: ProcessTerminator,
    pub platform: &'static str,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            prober: PortProber::new(),
            terminator: ProcessTerminator::new(),
            platform: std::env::consts::OS,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the API router.
///
/// The dashboard is served from a different origin, so CORS is wide open.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/ports", get(ports_handler))
        .route("/api/kill/:port", post(kill_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /api/health`
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Ponitor API is running".to_string(),
        platform: state.platform,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// `GET /api/ports`
///
/// Fans the prober out over the catalog. Probes are independent and run
/// concurrently purely for latency hiding; `join_all` preserves catalog
/// order in the response.
async fn ports_handler(State(state): State<Arc<AppState>>) -> Json<PortsResponse> {
    let probes = COMMON_PORTS.iter().map(|descriptor| {
        let prober = &state.prober;
        async move {
            let status = prober.probe(descriptor.port).await;
            PortEntry {
                descriptor: descriptor.clone(),
                status,
            }
        }
    });

    let ports = join_all(probes).await;

    let unknown = ports.iter().filter(|e| e.status.is_unknown()).count();
    if unknown > 0 {
        warn!(count = unknown, "Some port lookups could not be completed");
    }

    Json(PortsResponse {
        success: true,
        platform: state.platform,
        timestamp: Utc::now().to_rfc3339(),
        ports,
    })
}

/// `POST /api/kill/:port`
///
/// The port parameter is validated (numeric, 1-65535) before any OS
/// interaction.
async fn kill_handler(
    State(state): State<Arc<AppState>>,
    Path(port): Path<String>,
) -> Result<Json<KillResponse>, ApiError> {
    let port: u16 = port
        .parse()
        .ok()
        .filter(|p| *p >= 1)
        .ok_or_else(|| ApiError::BadRequest("Invalid port number".to_string()))?;

    info!(port = port, "Kill requested");

    let report = state.terminator.terminate(port).await.map_err(|e| match e {
        Error::NoListener(_) => ApiError::NotFound {
            port,
            message: e.to_string(),
        },
        other => ApiError::Internal {
            message: "Failed to terminate process".to_string(),
            error: other.to_string(),
        },
    })?;

    Ok(Json(KillResponse {
        success: true,
        message: report.message,
        port,
    }))
}

/// API error type, mapped onto the documented failure bodies.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or out-of-range port parameter.
    BadRequest(String),
    /// No process found listening on the port.
    NotFound { port: u16, message: String },
    /// The kill itself failed (permissions, vanished process, tooling).
    Internal { message: String, error: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
            ApiError::NotFound { port, message } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "message": message, "port": port })),
            )
                .into_response(),
            ApiError::Internal { message, error } => {
                warn!(error = %error, "Kill request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": message, "error": error })),
                )
                    .into_response()
            }
        }
    }
}
