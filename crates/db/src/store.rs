use async_trait::async_trait;

use crate::error::Result;
use crate::models::ApplicationRecord;

/// Persistence operations needed by the application API
///
/// Implementations report a missing identifier as [`DbError::NotFound`] so
/// callers can tell it apart from backend failures without knowing which
/// backend they talk to.
///
/// [`DbError::NotFound`]: crate::DbError::NotFound
#[async_trait]
pub trait Database: Send + Sync {
    /// Insert a record, replacing any record already stored under its ID
    async fn add_application(&self, app: ApplicationRecord) -> Result<()>;

    /// Fetch a single record
    async fn get_application(&self, id: &str) -> Result<ApplicationRecord>;

    /// Fetch every stored record; an empty store yields an empty list
    async fn get_all_applications(&self) -> Result<Vec<ApplicationRecord>>;

    /// Replace an existing record and return what is now stored
    ///
    /// The `created` timestamp of the stored record is kept; everything else
    /// comes from `app`.
    async fn update_application(&self, app: ApplicationRecord) -> Result<ApplicationRecord>;

    /// Remove a record
    async fn delete_application(&self, id: &str) -> Result<()>;
}
