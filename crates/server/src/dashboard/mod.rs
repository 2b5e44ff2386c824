//! Bookmark page served at the site root.
//!
//! - `GET /`                the rendered page
//! - `GET /health`          liveness, plain `ok`
//! - `GET /assets/{*path}`  embedded stylesheets

mod assets;
mod page;

pub use page::{strip_url_scheme, Dashboard};

use crate::api::ApiError;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

/// Routes for the page and its assets
pub fn routes() -> Router<Arc<Dashboard>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/assets/{*path}", get(asset))
}

async fn index(State(dashboard): State<Arc<Dashboard>>) -> Result<Html<String>, ApiError> {
    dashboard
        .render()
        .map(Html)
        .map_err(|e| ApiError::internal(format!("error rendering dashboard: {e}")))
}

async fn health() -> &'static str {
    "ok"
}

async fn asset(Path(path): Path<String>) -> Result<Response, ApiError> {
    let asset = assets::lookup(&path).ok_or_else(ApiError::not_found)?;
    Ok(([(header::CONTENT_TYPE, asset.content_type)], asset.body).into_response())
}
