//! Handlers for application records.
//!
//! - `GET    /api/applications`      list every application
//! - `POST   /api/application`       create an application with a generated ID
//! - `GET    /api/application/{id}`  fetch one application
//! - `PUT    /api/application/{id}`  replace an application's info
//! - `DELETE /api/application/{id}`  delete an application

use super::error::ApiError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    Json,
};
use dashboard_core::ApplicationService;
use dashboard_db::{ApplicationRecord, ApplicationRequest, ApplicationResponse};

/// `GET /api/applications`
pub async fn list_applications(
    State(service): State<ApplicationService>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let records = service
        .list_apps()
        .await
        .map_err(|e| ApiError::from_db(e, "error querying all applications"))?;

    Ok(Json(records.iter().map(ApplicationRecord::to_response).collect()))
}

/// `POST /api/application`
pub async fn create_application(
    State(service): State<ApplicationService>,
    body: Bytes,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let request = decode_request(&body)?;

    let record = service
        .create_app(request)
        .await
        .map_err(|e| ApiError::from_db(e, "error inserting application"))?;

    Ok(Json(record.into()))
}

/// `GET /api/application/{id}`
pub async fn get_application(
    State(service): State<ApplicationService>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
) -> Result<Json<ApplicationResponse>, ApiError> {
    require_id(&id, &method, &uri)?;

    let record = service
        .get_app(&id)
        .await
        .map_err(|e| ApiError::from_db(e, &format!("error querying for application {id}")))?;

    Ok(Json(record.into()))
}

/// `PUT /api/application/{id}`
///
/// The path ID wins over any `id` in the body.
pub async fn update_application(
    State(service): State<ApplicationService>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Json<ApplicationResponse>, ApiError> {
    require_id(&id, &method, &uri)?;
    let request = decode_request(&body)?;

    let record = service
        .update_app(&id, request)
        .await
        .map_err(|e| ApiError::from_db(e, &format!("error updating application {id}")))?;

    Ok(Json(record.into()))
}

/// `DELETE /api/application/{id}`
pub async fn delete_application(
    State(service): State<ApplicationService>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
) -> Result<StatusCode, ApiError> {
    require_id(&id, &method, &uri)?;

    service
        .delete_app(&id)
        .await
        .map_err(|e| ApiError::from_db(e, &format!("error deleting application {id}")))?;

    Ok(StatusCode::OK)
}

/// A JSON `null` body decodes to an empty request
fn decode_request(body: &[u8]) -> Result<ApplicationRequest, ApiError> {
    serde_json::from_slice::<Option<ApplicationRequest>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::bad_request(format!("error decoding json: {e}")))
}

/// An empty ID means the route and the handler disagree on the parameter name.
fn require_id(id: &str, method: &Method, uri: &Uri) -> Result<(), ApiError> {
    if id.is_empty() {
        tracing::error!(%method, path = uri.path(), "Encountered an empty URL parameter");
        return Err(ApiError::internal("empty path parameter"));
    }
    Ok(())
}
