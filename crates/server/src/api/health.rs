use axum::http::StatusCode;

/// `GET /api/health`
///
/// Liveness check: always 200 with an empty body, never touches storage.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
