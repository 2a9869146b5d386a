//! Order Repository
//!
//! All order mutations run as single SurrealDB transactions: an order is
//! never visible without its items and opening status update, and a status
//! change is never visible without its audit row.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderItem, OrderStatusUpdate};
use shared::client::{OrderView, TopItem};
use shared::models::{OrderStatus, PaymentMethod};

/// Sentinel thrown inside the transition transaction when the
/// compare-and-set on status finds the order already moved on
const STATUS_CHANGED: &str = "order status changed";

/// Projection used by every order read
///
/// Items and the status timeline come back inline through subqueries, so a
/// single round trip yields the full client-facing snapshot. Link fields
/// (`customer`, `order_id`) are stored as "table:id" strings, so joins and
/// comparisons cast the native id to a string.
const VIEW_FIELDS: &str = r#"
    <string>id AS id,
    order_number,
    customer AS customer_id,
    customer_name,
    customer_mobile,
    status,
    payment_method,
    total_amount,
    created_at,
    updated_at,
    (
        SELECT
            <string>id AS id,
            menu_item AS menu_item_id,
            name,
            price,
            quantity
        FROM order_item WHERE order_id = <string>$parent.id
    ) AS items,
    (
        SELECT
            <string>id AS id,
            status,
            message,
            updated_by,
            created_at
        FROM order_status_update WHERE order_id = <string>$parent.id
        ORDER BY created_at ASC
    ) AS updates
"#;

#[derive(Debug, Deserialize)]
pub struct AnalyticsRow {
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub total_amount: Decimal,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order atomically
    ///
    /// Writes the order row, every item row and the opening status update in
    /// one transaction. `order.id` must be pre-generated so the item and
    /// update rows can reference it.
    pub async fn place(
        &self,
        order: Order,
        items: Vec<OrderItem>,
        first_update: OrderStatusUpdate,
    ) -> RepoResult<()> {
        let order_id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Order ID must be pre-generated".to_string()))?;

        let mut query = String::from("BEGIN TRANSACTION;\nCREATE $order_id CONTENT $order;\n");
        for i in 0..items.len() {
            query.push_str(&format!("CREATE order_item CONTENT $item_{};\n", i));
        }
        query.push_str("CREATE order_status_update CONTENT $update;\nCOMMIT TRANSACTION;");

        // The CREATE target supplies the id
        let content = Order {
            id: None,
            ..order
        };

        let mut request = self
            .base
            .db()
            .query(query)
            .bind(("order_id", order_id))
            .bind(("order", content))
            .bind(("update", first_update));
        for (i, item) in items.into_iter().enumerate() {
            request = request.bind((format!("item_{}", i), item));
        }

        request.await?.check()?;
        Ok(())
    }

    /// Move an order to a new status atomically
    ///
    /// Compare-and-set on the current status: if another employee already
    /// moved the order, nothing is written and [`RepoError::Conflict`] is
    /// returned. The audit row commits together with the status change.
    pub async fn transition(
        &self,
        order_id: RecordId,
        from: OrderStatus,
        to: OrderStatus,
        now: i64,
        update: OrderStatusUpdate,
    ) -> RepoResult<()> {
        let result = self
            .base
            .db()
            .query(format!(
                r#"
                BEGIN TRANSACTION;
                LET $updated = (UPDATE $order_id SET status = $to, updated_at = $now WHERE status = $from RETURN AFTER);
                IF array::len($updated) == 0 {{ THROW '{}' }};
                CREATE order_status_update CONTENT $update;
                COMMIT TRANSACTION;
                "#,
                STATUS_CHANGED
            ))
            .bind(("order_id", order_id))
            .bind(("from", from))
            .bind(("to", to))
            .bind(("now", now))
            .bind(("update", update))
            .await?
            .check();

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains(STATUS_CHANGED) => Err(RepoError::Conflict(
                "Order status changed concurrently, please refresh".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Raw order row, used for status checks before a transition
    pub async fn find_by_id(&self, order_id: &RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(order_id.clone()).await?;
        Ok(order)
    }

    /// Full client-facing snapshot of one order
    pub async fn fetch_view(&self, order_id: &RecordId) -> RepoResult<OrderView> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {} FROM orders WHERE id = $id", VIEW_FIELDS))
            .bind(("id", order_id.clone()))
            .await?;

        let views: Vec<OrderView> = result.take(0)?;
        views
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", order_id)))
    }

    /// A customer's own orders, newest first
    pub async fn find_views_for_customer(&self, customer: RecordId) -> RepoResult<Vec<OrderView>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {} FROM orders WHERE customer = $customer ORDER BY created_at DESC",
                VIEW_FIELDS
            ))
            // The customer field is stored as a "profile:id" string
            .bind(("customer", customer.to_string()))
            .await?;

        let views: Vec<OrderView> = result.take(0)?;
        Ok(views)
    }

    /// The fulfilment queue: every non-terminal order, newest first
    pub async fn find_active_views(&self) -> RepoResult<Vec<OrderView>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {} FROM orders WHERE status IN $statuses ORDER BY created_at DESC",
                VIEW_FIELDS
            ))
            .bind(("statuses", OrderStatus::ACTIVE.to_vec()))
            .await?;

        let views: Vec<OrderView> = result.take(0)?;
        Ok(views)
    }

    /// All orders in one terminal status, newest first
    ///
    /// Backs the admin dashboard's completed and cancelled partitions.
    pub async fn find_views_by_status(&self, status: OrderStatus) -> RepoResult<Vec<OrderView>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {} FROM orders WHERE status = $status ORDER BY created_at DESC",
                VIEW_FIELDS
            ))
            .bind(("status", status))
            .await?;

        let views: Vec<OrderView> = result.take(0)?;
        Ok(views)
    }

    /// Status, payment method and total of every order, for the sales summary
    pub async fn analytics_rows(&self) -> RepoResult<Vec<AnalyticsRow>> {
        let mut result = self
            .base
            .db()
            .query("SELECT status, payment_method, total_amount FROM orders")
            .await?;

        let rows: Vec<AnalyticsRow> = result.take(0)?;
        Ok(rows)
    }

    /// Units sold and revenue per menu item name, completed orders only
    pub async fn top_items(&self, limit: usize) -> RepoResult<Vec<TopItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE <string>id FROM orders WHERE status = 'completed'")
            .await?;
        let completed: Vec<String> = result.take(0)?;
        if completed.is_empty() {
            return Ok(Vec::new());
        }

        #[derive(Deserialize)]
        struct ItemRow {
            name: String,
            price: Decimal,
            quantity: u32,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT name, price, quantity FROM order_item WHERE order_id IN $orders")
            .bind(("orders", completed))
            .await?;
        let rows: Vec<ItemRow> = result.take(0)?;

        let mut by_name: HashMap<String, TopItem> = HashMap::new();
        for row in rows {
            let entry = by_name.entry(row.name.clone()).or_insert(TopItem {
                name: row.name,
                units_sold: 0,
                revenue: Decimal::ZERO,
            });
            entry.units_sold += u64::from(row.quantity);
            entry.revenue += row.price * Decimal::from(row.quantity);
        }

        let mut items: Vec<TopItem> = by_name.into_values().collect();
        items.sort_by(|a, b| b.units_sold.cmp(&a.units_sold).then(a.name.cmp(&b.name)));
        items.truncate(limit);
        Ok(items)
    }
}
