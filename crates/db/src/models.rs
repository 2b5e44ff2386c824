use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mutable part of an application, shared by every projection
///
/// No validation happens here; values are stored and returned as given.
/// Input also accepts the capitalised and snake-case spellings clients
/// commonly send; output always uses the canonical keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct ApplicationInfo {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Description")]
    pub description: String,
    #[serde(alias = "URL", alias = "Url")]
    pub url: String,
    #[serde(
        rename = "iconURL",
        alias = "IconURL",
        alias = "iconUrl",
        alias = "IconUrl",
        alias = "icon_url"
    )]
    pub icon_url: String,
}

/// Application as submitted by an API client (create and update)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    #[serde(flatten)]
    pub info: ApplicationInfo,
}

impl ApplicationRequest {
    /// Turn the request into a record with the given ID and fresh timestamps
    #[must_use]
    pub fn into_record(self, id: impl Into<String>) -> ApplicationRecord {
        let now = Utc::now();
        ApplicationRecord {
            id: id.into(),
            info: self.info,
            created: now,
            modified: now,
        }
    }
}

/// Application as persisted by a storage backend
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ApplicationRecord {
    pub id: String,
    #[sqlx(flatten)]
    pub info: ApplicationInfo,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Project the record into its API shape, dropping the timestamps
    #[must_use]
    pub fn to_response(&self) -> ApplicationResponse {
        ApplicationResponse {
            id: self.id.clone(),
            info: self.info.clone(),
        }
    }
}

/// Application as returned to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: String,
    #[serde(flatten)]
    pub info: ApplicationInfo,
}

impl From<ApplicationRecord> for ApplicationResponse {
    fn from(record: ApplicationRecord) -> Self {
        Self {
            id: record.id,
            info: record.info,
        }
    }
}
