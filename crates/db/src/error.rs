use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("application '{0}' not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Backend failure that does not come from sqlx
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DbError {
    /// Whether this error means the requested identifier is absent from the store
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
