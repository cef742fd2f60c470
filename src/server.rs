// ABOUTME: HTTP server assembly and lifecycle
// ABOUTME: Builds the axum router with its layers and serves it with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server assembly
//!
//! Routes live under `/api`; health endpoints sit at the root.

use crate::config::{CorsConfig, ServerConfig};
use crate::context::ServerContext;
use crate::database::Database;
use crate::middleware::{request_id_middleware, setup_cors};
use crate::routes::{AdminRoutes, AuthRoutes, HealthRoutes};
use anyhow::{Context, Result};
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the full application router
pub fn build_router(context: ServerContext, cors: &CorsConfig) -> Router {
    let api = Router::new()
        .merge(AuthRoutes::routes(context.clone()))
        .merge(AdminRoutes::routes(context.clone()));

    Router::new()
        .nest("/api", api)
        .merge(HealthRoutes::routes(context))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(setup_cors(cors))
}

/// Open the store, bind the port and serve until a shutdown signal
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the port cannot be bound
pub async fn run(config: ServerConfig) -> Result<()> {
    let database = Database::new(&config.database_url.to_connection_string())
        .await
        .context("Failed to initialize database")?;
    let context = ServerContext::from_config(&config, Arc::new(database));
    let app = build_router(context, &config.cors);

    let address = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on http://localhost:{}", config.http_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
