use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{DbError, Result};
use crate::models::ApplicationRecord;
use crate::store::Database;

/// Process-local store keyed by application ID
///
/// Nothing survives a restart. A single lock guards the whole map, so
/// clones share state and concurrent handlers see a consistent view.
#[derive(Clone, Default)]
pub struct MemoryStore {
    apps: Arc<RwLock<HashMap<String, ApplicationRecord>>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Database for MemoryStore {
    async fn add_application(&self, app: ApplicationRecord) -> Result<()> {
        debug!("Storing application {}", app.id);
        self.apps.write().await.insert(app.id.clone(), app);
        Ok(())
    }

    async fn get_application(&self, id: &str) -> Result<ApplicationRecord> {
        self.apps
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DbError::NotFound(id.to_string()))
    }

    async fn get_all_applications(&self) -> Result<Vec<ApplicationRecord>> {
        Ok(self.apps.read().await.values().cloned().collect())
    }

    async fn update_application(&self, mut app: ApplicationRecord) -> Result<ApplicationRecord> {
        let mut apps = self.apps.write().await;
        let Some(existing) = apps.get_mut(&app.id) else {
            return Err(DbError::NotFound(app.id));
        };

        app.created = existing.created;
        *existing = app.clone();
        debug!("Updated application {}", app.id);
        Ok(app)
    }

    async fn delete_application(&self, id: &str) -> Result<()> {
        match self.apps.write().await.remove(id) {
            Some(_) => {
                debug!("Deleted application {}", id);
                Ok(())
            }
            None => Err(DbError::NotFound(id.to_string())),
        }
    }
}
