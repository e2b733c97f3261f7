use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::{
    config::EngineConfig,
    engine::{Engine, ImpactResult},
    error::EngineError,
    params::ImpactRequest,
};

pub struct WebServerConfig {
    pub config: EngineConfig,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Failure of a single `/impact` request.
#[derive(Debug)]
pub enum ApiError {
    Engine(EngineError),
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Engine(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/impact", post(impact))
        .with_state(engine)
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig { config, host, port } = config;
    let engine = Arc::new(Engine::new(config).context("Invalid engine configuration")?);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {host}:{port}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    println!(
        "[web] Impact API live at http://{}:{} (Ctrl+C to stop)",
        host, port
    );
    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    println!("[web] Shutting down...");
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec!["/impact"],
    })
}

/// Runs the computation on the blocking pool; it is pure CPU work.
pub async fn impact(
    State(engine): State<Arc<Engine>>,
    Json(request): Json<ImpactRequest>,
) -> Result<Json<ImpactResult>, ApiError> {
    let result = tokio::task::spawn_blocking(move || engine.compute_request(&request))
        .await
        .map_err(|err| {
            log::error!("impact task failed: {err}");
            ApiError::Internal(format!("computation task failed: {err}"))
        })??;
    Ok(Json(result))
}
