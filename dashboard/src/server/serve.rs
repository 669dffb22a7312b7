//! HTTP server setup

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::options::ServerOptions;
use crate::errors::DashboardError;
use crate::server::handlers::{
    deployments_handler, feasibility_handler, filters_handler, health_handler, layout_handler,
    proxy_handler, refresh_handler, refresh_status_handler, stats_handler, version_handler,
};
use crate::server::state::ServerState;

/// Build the dashboard router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Health and version
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        // Upstream proxy
        .route("/api/octopus", get(proxy_handler))
        // Deployment views
        .route("/api/deployments", get(deployments_handler))
        .route("/api/deployments/filters", get(filters_handler))
        .route("/api/deployments/stats", get(stats_handler))
        .route("/api/deployments/feasibility", get(feasibility_handler))
        .route("/api/deployments/layout", get(layout_handler))
        // Refresh
        .route("/api/refresh", post(refresh_handler))
        .route("/api/refresh/status", get(refresh_status_handler))
        // State and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(
    options: &ServerOptions,
    state: Arc<ServerState>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<JoinHandle<Result<(), DashboardError>>, DashboardError> {
    let app = router(state);

    let addr = format!("{}:{}", options.host, options.port);
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| DashboardError::ServerError(e.to_string()))?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| DashboardError::ServerError(e.to_string()))
    });

    Ok(handle)
}
