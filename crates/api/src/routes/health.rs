//! Health check endpoints.

use axum::{Json, Router, routing::get};
use payup_core::notification::Notifier;
use payup_core::store::Store;
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes<S: Store, N: Notifier>() -> Router<AppState<S, N>> {
    Router::new().route("/health", get(health_check))
}
