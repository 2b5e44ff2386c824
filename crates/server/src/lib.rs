pub mod api;
mod config;
pub mod dashboard;

pub use config::{
    Bookmark, Config, DashboardConfig, DatabaseConfig, Section, ServerConfig, StorageBackend,
    PORT_ENV_VAR,
};
pub use dashboard::Dashboard;

use anyhow::{Context, Result};
use axum::{body::Body, http::Request, response::Response, Router};
use dashboard_core::ApplicationService;
use dashboard_db::{Database, MemoryStore, SqliteStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Span};

/// Build the full router, with request tracing: the API under `/api` and
/// the bookmark page at the root
pub fn router(service: ApplicationService, dashboard: Arc<Dashboard>) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            info_span!(
                "http.request",
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response, latency: Duration, _span: &Span| {
            info!(status = %res.status(), latency_ms = %latency.as_millis(), "request.end");
        });

    Router::new()
        .nest("/api", api::routes().with_state(service))
        .merge(dashboard::routes().with_state(dashboard))
        .layer(trace)
}

/// Open the storage backend selected by the config
pub async fn build_store(config: &DatabaseConfig) -> Result<Arc<dyn Database>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory application store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("creating database directory {}", parent.display())
                })?;
            }

            let db = SqliteStore::new(&config.path).await?;
            db.migrate().await?;
            tracing::info!("Using SQLite application store at {}", config.path.display());
            Ok(Arc::new(db))
        }
    }
}

/// Serve the API and the bookmark page until Ctrl-C
pub async fn serve(
    config: &ServerConfig,
    service: ApplicationService,
    dashboard: Dashboard,
) -> Result<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("Starting API server on http://{}", listener.local_addr()?);
    axum::serve(listener, router(service, Arc::new(dashboard)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
