//! REST API over the employee service

mod error;
mod handler;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::application::EmployeeService;

pub use error::{ApiError, ErrorBody};

/// Default browser origin allowed by CORS.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Employee routes, without middleware
pub fn router() -> Router<EmployeeService> {
    Router::new()
        .route(
            "/api/v1/employees",
            get(handler::list).post(handler::create),
        )
        .route("/api/v1/employees/employee/{id}", get(handler::get_by_id))
        .route("/api/v1/employees/update/{id}", put(handler::update))
        .route("/api/v1/employees/delete/{id}", delete(handler::delete))
}

/// Build the fully configured application: routes, CORS and request tracing.
pub fn build_app(service: EmployeeService, cors_origin: &str) -> Result<Router> {
    let origin = HeaderValue::from_str(cors_origin)
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service))
}

/// Bind `addr` and serve the API until Ctrl+C or SIGTERM.
pub async fn serve(addr: &str, service: EmployeeService, cors_origin: &str) -> Result<()> {
    let app = build_app(service, cors_origin)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
