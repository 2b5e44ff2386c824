use dashboard_db::{ApplicationRecord, ApplicationRequest, Database, DbError};
use std::sync::Arc;
use tracing::info;

/// Service for application-related business logic
///
/// This service wraps whichever storage backend was configured and owns
/// the parts of the record lifecycle clients never control: identifiers
/// and timestamps.
#[derive(Clone)]
pub struct ApplicationService {
    db: Arc<dyn Database>,
}

impl ApplicationService {
    /// Create a new `ApplicationService`
    #[must_use]
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Create a new application
    ///
    /// # Returns
    /// * `Ok(ApplicationRecord)` - Stored record with a freshly generated random ID
    /// * `Err(DbError)` - The backend failed to store the record
    ///
    /// # Examples
    /// ```ignore
    /// let service = ApplicationService::new(Arc::new(MemoryStore::new()));
    /// let app = service.create_app(request).await?;
    /// println!("Created app: {} with id {}", app.info.name, app.id);
    /// ```
    pub async fn create_app(
        &self,
        request: ApplicationRequest,
    ) -> Result<ApplicationRecord, DbError> {
        let id = uuid::Uuid::new_v4().to_string();
        let record = request.into_record(id);

        self.db.add_application(record.clone()).await?;
        info!("Created application '{}' with id {}", record.info.name, record.id);
        Ok(record)
    }

    /// Get application by ID
    pub async fn get_app(&self, id: &str) -> Result<ApplicationRecord, DbError> {
        self.db.get_application(id).await
    }

    /// List all applications
    pub async fn list_apps(&self) -> Result<Vec<ApplicationRecord>, DbError> {
        self.db.get_all_applications().await
    }

    /// Replace the info of an existing application
    ///
    /// Any ID the client put in the body is ignored; `id` comes from the path.
    pub async fn update_app(
        &self,
        id: &str,
        request: ApplicationRequest,
    ) -> Result<ApplicationRecord, DbError> {
        let stored = self.db.update_application(request.into_record(id)).await?;
        info!("Updated application {}", stored.id);
        Ok(stored)
    }

    /// Delete application by ID
    pub async fn delete_app(&self, id: &str) -> Result<(), DbError> {
        self.db.delete_application(id).await?;
        info!("Deleted application {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_db::{ApplicationInfo, MemoryStore, SqliteStore};
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn request(name: &str) -> ApplicationRequest {
        ApplicationRequest {
            info: ApplicationInfo {
                name: name.to_string(),
                description: "d".to_string(),
                url: "u".to_string(),
                icon_url: "i".to_string(),
            },
        }
    }

    fn setup_test_service() -> ApplicationService {
        ApplicationService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let service = setup_test_service();

        let app = service.create_app(request("A")).await?;
        assert!(!app.id.is_empty());
        assert_eq!(app.info, request("A").info);

        let fetched = service.get_app(&app.id).await?;
        assert_eq!(fetched.info, app.info);

        Ok(())
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() -> Result<(), Box<dyn std::error::Error>> {
        let service = setup_test_service();

        let mut ids = HashSet::new();
        for _ in 0..50 {
            ids.insert(service.create_app(request("same")).await?.id);
        }
        assert_eq!(ids.len(), 50);
        assert_eq!(service.list_apps().await?.len(), 50);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_uses_path_id_and_keeps_created() -> Result<(), Box<dyn std::error::Error>>
    {
        let service = setup_test_service();
        let app = service.create_app(request("before")).await?;

        let updated = service.update_app(&app.id, request("after")).await?;
        assert_eq!(updated.id, app.id);
        assert_eq!(updated.info.name, "after");
        assert_eq!(updated.created, app.created);
        assert!(updated.modified >= app.modified);

        assert_eq!(service.get_app(&app.id).await?.info.name, "after");
        Ok(())
    }

    #[tokio::test]
    async fn test_not_found_propagates() {
        let service = setup_test_service();

        assert!(service.get_app("missing").await.is_err_and(|e| e.is_not_found()));
        assert!(service
            .update_app("missing", request("x"))
            .await
            .is_err_and(|e| e.is_not_found()));
        assert!(service.delete_app("missing").await.is_err_and(|e| e.is_not_found()));
    }

    /// The service works unchanged on a persistent backend
    #[tokio::test]
    async fn test_service_over_sqlite() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let db = SqliteStore::new(temp_dir.path().join("test.db")).await?;
        db.migrate().await?;
        let service = ApplicationService::new(Arc::new(db));

        let app = service.create_app(request("persisted")).await?;
        service.delete_app(&app.id).await?;
        assert!(service.list_apps().await?.is_empty());

        Ok(())
    }
}
