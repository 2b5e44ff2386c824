mod error;
mod memory;
mod models;
mod sqlite;
mod store;

pub use error::{DbError, Result};
pub use memory::MemoryStore;
pub use models::{ApplicationInfo, ApplicationRecord, ApplicationRequest, ApplicationResponse};
pub use sqlite::{SqliteConfig, SqliteStore};
pub use store::Database;
