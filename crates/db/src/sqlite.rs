use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DbError, Result};
use crate::models::ApplicationRecord;
use crate::store::Database;

/// Schema migrations in the order they apply
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_initial_schema",
    include_str!("../migrations/001_initial_schema.sql"),
)];

/// `SQLite` store configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Enable `SQLite` write-ahead logging for better concurrency
    pub enable_wal: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            enable_wal: true,
        }
    }
}

/// Persistent store backed by a `SQLite` file
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database file with default config
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self> {
        Self::new_with_config(database_path, SqliteConfig::default()).await
    }

    /// Open (or create) the database file with custom config
    pub async fn new_with_config(
        database_path: impl AsRef<Path>,
        config: SqliteConfig,
    ) -> Result<Self> {
        let path = database_path.as_ref();
        let journal_mode = if config.enable_wal {
            SqliteJournalMode::Wal
        } else {
            SqliteJournalMode::Delete
        };
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(journal_mode);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        info!(
            path = %path.display(),
            max_connections = config.max_connections,
            ?journal_mode,
            "Opened SQLite application store"
        );
        Ok(Self { pool })
    }

    /// Apply every pending migration
    ///
    /// Each migration runs in its own transaction together with its
    /// `_migrations` row, so a failed step leaves neither behind.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS _migrations (
                id INTEGER PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                applied_at INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        for &(name, sql) in MIGRATIONS {
            let mut tx = self.pool.begin().await?;

            let applied: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM _migrations WHERE name = ?")
                    .bind(name)
                    .fetch_optional(&mut *tx)
                    .await?;
            if applied.is_some() {
                debug!("Migration {name} already applied");
                continue;
            }

            sqlx::query(sql).execute(&mut *tx).await?;
            sqlx::query("INSERT INTO _migrations (name, applied_at) VALUES (?, ?)")
                .bind(name)
                .bind(chrono::Utc::now().timestamp_millis())
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            info!("Applied migration {name}");
        }

        Ok(())
    }

    /// Names of the migrations recorded as applied, oldest first
    pub async fn applied_migrations(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM _migrations ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}

#[async_trait]
impl Database for SqliteStore {
    async fn add_application(&self, app: ApplicationRecord) -> Result<()> {
        debug!("Storing application {}", app.id);
        sqlx::query(
            "INSERT INTO applications (id, name, description, url, icon_url, created, modified)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                url = excluded.url,
                icon_url = excluded.icon_url,
                created = excluded.created,
                modified = excluded.modified",
        )
        .bind(&app.id)
        .bind(&app.info.name)
        .bind(&app.info.description)
        .bind(&app.info.url)
        .bind(&app.info.icon_url)
        .bind(app.created)
        .bind(app.modified)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_application(&self, id: &str) -> Result<ApplicationRecord> {
        sqlx::query_as::<_, ApplicationRecord>("SELECT * FROM applications WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(id.to_string()))
    }

    async fn get_all_applications(&self) -> Result<Vec<ApplicationRecord>> {
        sqlx::query_as::<_, ApplicationRecord>(
            "SELECT * FROM applications ORDER BY created ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn update_application(&self, app: ApplicationRecord) -> Result<ApplicationRecord> {
        // `created` keeps the value from the first insert
        let updated = sqlx::query_as::<_, ApplicationRecord>(
            "UPDATE applications
             SET name = ?, description = ?, url = ?, icon_url = ?, modified = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&app.info.name)
        .bind(&app.info.description)
        .bind(&app.info.url)
        .bind(&app.info.icon_url)
        .bind(app.modified)
        .bind(&app.id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(record) => {
                debug!("Updated application {}", record.id);
                Ok(record)
            }
            None => Err(DbError::NotFound(app.id)),
        }
    }

    async fn delete_application(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }

        debug!("Deleted application {}", id);
        Ok(())
    }
}
