//! Demo data seeding
//!
//! Populates an empty database with a small menu so a fresh install has
//! something to order. Enabled with `SEED_DEMO_MENU=true`.

use rust_decimal::Decimal;

use crate::db::repository::MenuItemRepository;
use crate::db::models::MenuItemCreate;
use crate::utils::AppResult;
use shared::models::MenuCategory;

fn rupees(units: i64, cents: i64) -> Decimal {
    Decimal::new(units * 100 + cents, 2)
}

fn demo_menu() -> Vec<MenuItemCreate> {
    let items: Vec<(&str, &str, Decimal, MenuCategory)> = vec![
        ("Masala Dosa", "Crispy rice crepe with spiced potato filling", rupees(60, 0), MenuCategory::Veg),
        ("Veg Thali", "Rice, dal, two curries, roti and pickle", rupees(90, 0), MenuCategory::Meals),
        ("Chicken Biryani", "Hyderabadi-style biryani with raita", rupees(120, 0), MenuCategory::NonVeg),
        ("Paneer Tikka", "Chargrilled cottage cheese skewers", rupees(110, 0), MenuCategory::Starters),
        ("Samosa", "Two pieces with mint chutney", rupees(20, 0), MenuCategory::Snacks),
        ("Masala Chai", "Spiced milk tea", rupees(15, 0), MenuCategory::Beverages),
        ("Sweet Lassi", "Chilled yogurt drink", rupees(45, 50), MenuCategory::Beverages),
        ("Egg Fried Rice", "Wok-tossed rice with egg and vegetables", rupees(80, 0), MenuCategory::NonVeg),
    ];

    items
        .into_iter()
        .map(|(name, description, price, category)| MenuItemCreate {
            name: name.to_string(),
            description: Some(description.to_string()),
            price,
            category,
            image_url: None,
            is_available: true,
        })
        .collect()
}

/// Seed the demo menu if the menu table is empty
pub async fn seed_demo_menu(repo: &MenuItemRepository) -> AppResult<()> {
    if repo.count().await? > 0 {
        tracing::debug!("Menu already populated, skipping demo seed");
        return Ok(());
    }

    let items = demo_menu();
    let total = items.len();
    for item in items {
        repo.create(item).await?;
    }
    tracing::info!(count = total, "Seeded demo menu");
    Ok(())
}
