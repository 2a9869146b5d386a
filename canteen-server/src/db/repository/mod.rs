//! Repository Module
//!
//! CRUD operations over the SurrealDB tables.

pub mod menu_item;
pub mod order;
pub mod profile;

pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use profile::ProfileRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings end to end
// =============================================================================
//
// surrealdb::RecordId handles all IDs:
//   - parse:  let id: RecordId = "orders:abc".parse()?;
//   - create: let id = RecordId::from_table_key("orders", "abc");
//   - CRUD:   db.select(id) / db.delete(id) take a RecordId directly

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
