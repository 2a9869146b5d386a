//! Menu Item Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate};
use crate::utils::now_millis;
use shared::models::MenuCategory;

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image_url: data.image_url,
            is_available: data.is_available,
            created_at: now_millis(),
        };

        let created: Option<MenuItem> = self.base.db().create("menu_item").content(item).await?;
        created.ok_or_else(|| RepoError::Database("Menu item was not created".to_string()))
    }

    /// List available menu items, grouped by category
    ///
    /// Sold-out items never appear in the browse view. Within a category
    /// items keep their insertion order.
    pub async fn find_all(&self, category: Option<MenuCategory>) -> RepoResult<Vec<MenuItem>> {
        let mut query = String::from("SELECT * FROM menu_item WHERE is_available = true");
        if category.is_some() {
            query.push_str(" AND category = $category");
        }
        query.push_str(" ORDER BY category ASC, created_at ASC");

        let mut request = self.base.db().query(query);
        if let Some(category) = category {
            request = request.bind(("category", category));
        }

        let mut result = request.await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    /// Fetch the referenced items in one round trip
    pub async fn find_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<MenuItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE id IN $ids")
            .bind(("ids", ids))
            .await?;

        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    pub async fn count(&self) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM menu_item GROUP ALL")
            .await?;

        #[derive(serde::Deserialize)]
        struct Count {
            total: usize,
        }

        let count: Option<Count> = result.take(0)?;
        Ok(count.map(|c| c.total).unwrap_or(0))
    }
}
