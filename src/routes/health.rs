// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Liveness always answers; readiness probes the credential store
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::context::ServerContext;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(context: ServerContext) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(context)
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn ready_handler(State(ctx): State<ServerContext>) -> (StatusCode, Json<Value>) {
    match ctx.data().database().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        ),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        }
    }
}
