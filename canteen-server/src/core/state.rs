//! Server state
//!
//! [`ServerState`] holds shared references to every service. Cloning is
//! cheap: the database handle and feed are internally reference-counted.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::repository::{MenuItemRepository, OrderRepository, ProfileRepository};
use crate::db::{DbService, seed};
use crate::orders::OrderLifecycle;
use crate::sync::OrderFeed;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT auth service
    pub jwt_service: Arc<JwtService>,
    /// Live order feed
    pub feed: OrderFeed,
}

impl ServerState {
    /// Initialize state against the on-disk database
    ///
    /// Creates the working directory layout, opens the database and seeds
    /// the demo menu if configured.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {}", e)))?;

        let db_path = config.database_dir().join("canteen.db");
        let db_service = DbService::open(&db_path.to_string_lossy()).await?;

        Self::with_db(config.clone(), db_service).await
    }

    /// Initialize state against an in-memory database (used by tests)
    pub async fn initialize_in_memory(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::memory().await?;
        Self::with_db(config.clone(), db_service).await
    }

    async fn with_db(config: Config, db_service: DbService) -> Result<Self, AppError> {
        let state = Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            feed: OrderFeed::new(),
            db: db_service.db,
            config,
        };

        if state.config.seed_demo_menu {
            seed::seed_demo_menu(&state.menu_items()).await?;
        }

        Ok(state)
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    // ========== Repositories ==========

    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.db.clone())
    }

    pub fn menu_items(&self) -> MenuItemRepository {
        MenuItemRepository::new(self.db.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.clone())
    }

    /// Order service wired to the repositories and the feed
    pub fn order_lifecycle(&self) -> OrderLifecycle {
        OrderLifecycle::new(
            self.orders(),
            self.menu_items(),
            self.profiles(),
            self.feed.clone(),
        )
    }
}
