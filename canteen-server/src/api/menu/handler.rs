//! Menu API Handlers

use std::str::FromStr;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::AppError;
use crate::core::ServerState;
use shared::client::MenuItemView;
use shared::models::MenuCategory;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Category name, or `all` for the whole menu
    pub category: Option<String>,
}

/// GET /api/menu - browse the menu
///
/// Read-only: the menu is maintained through seeding, not this API.
/// Only available items are returned, grouped by category.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<MenuItemView>>, AppError> {
    let category = match query.category.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(
            MenuCategory::from_str(raw).map_err(AppError::validation)?,
        ),
    };

    let items = state.menu_items().find_all(category).await?;
    Ok(Json(items.iter().map(|i| i.to_view()).collect()))
}
