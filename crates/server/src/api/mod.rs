//! HTTP surface of the dashboard API, mounted under `/api`.

mod applications;
mod error;
mod health;

pub use error::ApiError;

use axum::{
    routing::{get, post},
    Router,
};
use dashboard_core::ApplicationService;

/// Application and health routes, relative to `/api`
pub fn routes() -> Router<ApplicationService> {
    Router::new()
        .route("/health", get(health::health))
        .route("/applications", get(applications::list_applications))
        .route("/application", post(applications::create_application))
        .route(
            "/application/{id}",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
}
