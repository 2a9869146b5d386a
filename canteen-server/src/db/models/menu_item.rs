//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::client::MenuItemView;
use shared::models::MenuCategory;

/// Menu item ID type
pub type MenuItemId = RecordId;

/// Menu item matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<MenuItemId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub category: MenuCategory,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_available: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    pub fn to_view(&self) -> MenuItemView {
        MenuItemView {
            id: self.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category,
            image_url: self.image_url.clone(),
            is_available: self.is_available,
        }
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub category: MenuCategory,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}
