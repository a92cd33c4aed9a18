//! HTTP API
//!
//! Exposes the discovery engine over axum: trigger a run, fetch the latest
//! result, inspect registered providers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::discovery::{DiscoveryContext, DiscoveryEngine, DiscoveryResult, DiscoveryRunError};

#[derive(Clone)]
pub struct AppState {
    engine: Arc<DiscoveryEngine>,
    /// Deadline for one API-triggered run
    timeout: Duration,
    latest: Arc<RwLock<Option<DiscoveryResult>>>,
}

impl AppState {
    pub fn new(engine: Arc<DiscoveryEngine>, timeout: Duration) -> Self {
        Self {
            engine,
            timeout,
            latest: Arc::new(RwLock::new(None)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryRunError),

    #[error("no discovery run has completed yet")]
    NoResults,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Discovery(DiscoveryRunError::NoProviders { .. }) => StatusCode::CONFLICT,
            ApiError::Discovery(DiscoveryRunError::ProviderNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Discovery(DiscoveryRunError::InvalidConfig(_)) => StatusCode::BAD_REQUEST,
            ApiError::NoResults => StatusCode::NOT_FOUND,
        };
        let body = Json(serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscoveryRequest {
    /// Providers to discover; empty means all registered providers
    #[serde(default)]
    pub providers: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/providers", get(list_providers))
        .route("/api/v1/discovery", post(run_discovery))
        .route("/api/v1/discovery/latest", get(latest_result))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Discovery API listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cloudrecon",
        "version": env!("CARGO_PKG_VERSION"),
        "providers": state.engine.list_providers().len(),
    }))
}

async fn list_providers(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "providers": state.engine.list_providers() }))
}

async fn run_discovery(
    State(state): State<AppState>,
    request: Option<Json<DiscoveryRequest>>,
) -> Result<Json<DiscoveryResult>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let ctx = DiscoveryContext::background().with_timeout(state.timeout);

    let result = match state.engine.discover_selected(&ctx, &request.providers).await {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "Discovery request failed");
            return Err(e.into());
        }
    };

    info!(
        run_id = %result.run_id,
        resources = result.summary.total_resources,
        errors = result.summary.error_count,
        "Discovery request complete"
    );
    *state.latest.write().await = Some(result.clone());
    Ok(Json(result))
}

async fn latest_result(State(state): State<AppState>) -> Result<Json<DiscoveryResult>, ApiError> {
    state
        .latest
        .read()
        .await
        .clone()
        .map(Json)
        .ok_or(ApiError::NoResults)
}
