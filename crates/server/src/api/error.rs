use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dashboard_db::DbError;
use std::fmt;

/// Failure of an API request, carrying the status it maps to
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Create a new `ApiError` with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, String::new())
    }

    /// Classify a storage failure; `context` prefixes the message of a 500
    pub fn from_db(err: DbError, context: &str) -> Self {
        if err.is_not_found() {
            Self::not_found()
        } else {
            Self::internal(format!("{context}: {err}"))
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), "{}", self.message);
        }

        // 404s carry no body; everything else is plain text
        if self.message.is_empty() {
            self.status.into_response()
        } else {
            (self.status, self.message).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        let not_found = ApiError::from_db(DbError::NotFound("abc".to_string()), "ignored");
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert!(not_found.message.is_empty());

        let internal = ApiError::from_db(
            DbError::Internal("disk unplugged".to_string()),
            "error querying all applications",
        );
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            internal.message,
            "error querying all applications: Internal error: disk unplugged"
        );
    }
}
