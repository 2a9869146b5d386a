//! Order placement and lifecycle
//!
//! The only two ways an order ever changes: a customer places it, or an
//! employee moves it along the state machine in [`shared::lifecycle`].
//! Both paths write atomically and publish one change event.

use std::collections::HashMap;

use surrealdb::RecordId;
use uuid::Uuid;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::db::models::{Order, OrderItem, OrderStatusUpdate};
use crate::db::repository::{MenuItemRepository, OrderRepository, ProfileRepository};
use crate::sync::OrderFeed;
use crate::utils::{AppError, AppResult, now_millis};
use shared::client::{OrderView, PlaceOrderRequest, TransitionRequest};
use shared::lifecycle;
use shared::models::OrderStatus;
use shared::sync::ChangeAction;

/// Message recorded when an order is placed
const ORDER_PLACED_MESSAGE: &str = "Order placed successfully";

/// Order service
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    menu: MenuItemRepository,
    profiles: ProfileRepository,
    feed: OrderFeed,
}

impl OrderLifecycle {
    pub fn new(
        orders: OrderRepository,
        menu: MenuItemRepository,
        profiles: ProfileRepository,
        feed: OrderFeed,
    ) -> Self {
        Self {
            orders,
            menu,
            profiles,
            feed,
        }
    }

    /// Place an order for the current user
    ///
    /// Lines are re-priced from the menu table; client-supplied prices are
    /// never trusted. Unknown or unavailable items reject the whole order
    /// before anything is written.
    pub async fn place(&self, customer: &CurrentUser, req: PlaceOrderRequest) -> AppResult<OrderView> {
        req.validate()?;

        // Merge duplicate lines so each menu item yields one priced row
        let mut quantities: HashMap<String, u32> = HashMap::new();
        let mut line_order: Vec<String> = Vec::new();
        for line in &req.lines {
            let entry = quantities.entry(line.menu_item_id.clone()).or_insert(0);
            if *entry == 0 {
                line_order.push(line.menu_item_id.clone());
            }
            *entry += line.quantity;
        }

        let mut item_ids = Vec::with_capacity(line_order.len());
        for id in &line_order {
            let record_id: RecordId = id
                .parse()
                .map_err(|_| AppError::validation(format!("Invalid menu item ID: {}", id)))?;
            item_ids.push(record_id);
        }

        let menu_items = self.menu.find_by_ids(item_ids).await?;
        let by_id: HashMap<String, _> = menu_items
            .into_iter()
            .filter_map(|item| {
                let key = item.id.as_ref()?.to_string();
                Some((key, item))
            })
            .collect();

        let customer_id: RecordId = customer
            .id
            .parse()
            .map_err(|_| AppError::invalid_token("Malformed user ID in token"))?;

        // The contact number shown on the fulfilment and admin consoles
        let profile = self
            .profiles
            .find_by_id(&customer.id)
            .await?
            .ok_or_else(|| AppError::not_found("Account no longer exists".to_string()))?;

        let order_id = RecordId::from_table_key("orders", Uuid::new_v4().simple().to_string());
        let now = now_millis();

        let mut items = Vec::with_capacity(line_order.len());
        let mut total = rust_decimal::Decimal::ZERO;
        for id in &line_order {
            let menu_item = by_id
                .get(id)
                .ok_or_else(|| AppError::validation(format!("Unknown menu item: {}", id)))?;
            if !menu_item.is_available {
                return Err(AppError::business_rule(format!(
                    "{} is currently unavailable",
                    menu_item.name
                )));
            }

            let quantity = quantities[id];
            total += menu_item.price * rust_decimal::Decimal::from(quantity);
            items.push(OrderItem {
                id: None,
                order_id: order_id.clone(),
                menu_item: menu_item.id.clone().ok_or_else(|| {
                    AppError::internal("Menu item missing ID after fetch")
                })?,
                name: menu_item.name.clone(),
                price: menu_item.price,
                quantity,
            });
        }

        let order = Order {
            id: Some(order_id.clone()),
            order_number: generate_order_number(),
            customer: customer_id,
            customer_name: customer.full_name.clone(),
            customer_mobile: profile.mobile,
            status: OrderStatus::Pending,
            payment_method: req.payment_method,
            total_amount: total,
            created_at: now,
            updated_at: now,
        };

        let first_update = OrderStatusUpdate {
            id: None,
            order_id: order_id.clone(),
            status: OrderStatus::Pending,
            message: ORDER_PLACED_MESSAGE.to_string(),
            // System-generated, no acting employee
            updated_by: None,
            created_at: now,
        };

        self.orders.place(order, items, first_update).await?;

        let view = self.orders.fetch_view(&order_id).await?;
        tracing::info!(
            order_id = %view.id,
            order_number = %view.order_number,
            customer_id = %customer.id,
            total = %shared::util::format_rupees(&view.total_amount),
            "Order placed"
        );
        self.feed.publish(ChangeAction::Created, view.clone());
        Ok(view)
    }

    /// Move an order to a new status on behalf of an employee
    ///
    /// The requested status is validated against the transition table, then
    /// applied with a compare-and-set so two employees acting at once cannot
    /// both win.
    pub async fn transition(
        &self,
        user: &CurrentUser,
        order_id: &str,
        req: TransitionRequest,
    ) -> AppResult<OrderView> {
        let record_id: RecordId = order_id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid order ID: {}", order_id)))?;

        let order = self
            .orders
            .find_by_id(&record_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;

        let transition = lifecycle::validate(order.status, req.status)?;
        let message = req
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| transition.message.to_string());

        let actor: RecordId = user
            .id
            .parse()
            .map_err(|_| AppError::invalid_token("Malformed user ID in token"))?;

        let now = now_millis();
        let update = OrderStatusUpdate {
            id: None,
            order_id: record_id.clone(),
            status: transition.to,
            message,
            updated_by: Some(actor),
            created_at: now,
        };

        self.orders
            .transition(record_id.clone(), transition.from, transition.to, now, update)
            .await?;

        let view = self.orders.fetch_view(&record_id).await?;
        tracing::info!(
            order_id = %view.id,
            from = %transition.from,
            to = %transition.to,
            actor = %user.id,
            "Order status changed"
        );
        self.feed.publish(ChangeAction::StatusChanged, view.clone());
        Ok(view)
    }
}

/// Receipt numbers like `ORD-1A2B3C4D`
///
/// The unique index on `orders.order_number` backstops collisions.
fn generate_order_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("ORD-{}", suffix)
}
