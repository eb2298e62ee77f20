//! # lab-server
//!
//! axum HTTP surface for the SQL sandbox.
//!
//! ## Routes
//!
//! - `POST /api/duckdb` — body `{ "query": "..." }`, returns `{ columns, result }`
//!   (200), `{ error }` (400 on bad body or engine failure), or
//!   `{ "error": "Method not allowed" }` (405 for every other method).

mod error;
pub mod handlers;

pub use error::{ApiError, ErrorBody};
pub use handlers::QueryRequest;

use std::future::Future;
use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, routing::post};
use lab_config::{ConfigError, LabConfig, SandboxConfig, ServerConfig};
use lab_sandbox::SandboxProbe;
use tracing::info;

/// Path of the sandbox endpoint.
pub const QUERY_ROUTE: &str = "/api/duckdb";

/// State shared by every request: read-only engine settings and the probe.
#[derive(Clone)]
pub struct AppState {
    sandbox: Arc<SandboxConfig>,
    probe: Arc<SandboxProbe>,
}

impl AppState {
    #[must_use]
    pub fn new(sandbox: SandboxConfig) -> Self {
        Self::with_probe(sandbox, Arc::new(SandboxProbe::new()))
    }

    /// Build state around an existing probe so callers can observe it.
    #[must_use]
    pub fn with_probe(sandbox: SandboxConfig, probe: Arc<SandboxProbe>) -> Self {
        Self {
            sandbox: Arc::new(sandbox),
            probe,
        }
    }

    #[must_use]
    pub const fn probe(&self) -> &Arc<SandboxProbe> {
        &self.probe
    }
}

/// Build the router for the sandbox API.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route(
            QUERY_ROUTE,
            post(handlers::run_query).fallback(handlers::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .with_state(state)
}

/// Errors from binding or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind `config.server` and serve until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ServerError::Config`] for an unusable bind address and
/// [`ServerError::Io`] if binding or serving fails.
pub async fn serve(
    config: &LabConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let addr = config.server.socket_addr()?;
    let state = AppState::new(config.sandbox.clone());
    let router = build_router(state, &config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, route = QUERY_ROUTE, "sql sandbox listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("sql sandbox stopped");
    Ok(())
}
