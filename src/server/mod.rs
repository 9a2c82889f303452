//! HTTP server bootstrap and router construction.

pub mod error;
pub mod routes;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::service::PlanetService;

/// Create the Axum router with all planet routes.
///
/// Route order matters to axum: the literal `/planets/remote` segment is
/// registered before the `/planets/:id` capture.
pub fn create_router(service: PlanetService) -> Router {
    Router::new()
        .route(
            "/planets",
            get(routes::list_planets).post(routes::create_planet),
        )
        .route("/planets/remote", get(routes::remote_planets))
        .route(
            "/planets/:id",
            get(routes::get_planet).delete(routes::delete_planet),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn start_server(service: PlanetService, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {host}:{port}"))?;

    let app = create_router(service);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
