//! Database Module
//!
//! Embedded SurrealDB storage for profiles, menu items and orders.

pub mod models;
pub mod repository;
pub mod seed;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

/// Namespace and database names for the embedded engine
const NAMESPACE: &str = "canteen";
const DATABASE: &str = "canteen";

/// Schema definition applied at startup
///
/// Tables are schemaless; uniqueness of account emails and order numbers
/// is enforced by the engine.
const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS profile SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS profile_email_unique ON TABLE profile FIELDS email UNIQUE;

    DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;

    DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS order_number_unique ON TABLE orders FIELDS order_number UNIQUE;

    DEFINE TABLE IF NOT EXISTS order_item SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS order_status_update SCHEMALESS;
"#;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database at the given path
    pub async fn open(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        let service = Self { db };
        service.initialize().await?;

        tracing::info!(path = %db_path, "Database connection established (SurrealDB/RocksDB)");
        Ok(service)
    }

    /// Open an in-memory database (used by tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {}", e)))?;

        let service = Self { db };
        service.initialize().await?;
        Ok(service)
    }

    async fn initialize(&self) -> Result<(), AppError> {
        self.db
            .use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        self.db
            .query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {}", e)))?
            .check()
            .map_err(|e| AppError::database(format!("Schema definition failed: {}", e)))?;

        Ok(())
    }
}
