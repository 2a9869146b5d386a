//! Request and response DTOs for the HTTP API.
//!
//! Database records never cross the wire directly; handlers convert them
//! into the view types here. Password hashes in particular stay server-side.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{MenuCategory, OrderStatus, PaymentMethod, Role};

// ==========================================
// Auth
// ==========================================

/// Create-account payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 64, message = "name must be 1-64 characters"))]
    pub full_name: String,
    /// Optional contact number, digits only
    #[validate(length(min = 10, max = 15, message = "mobile must be 10-15 digits"))]
    pub mobile: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Authenticated user as seen by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub mobile: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

// ==========================================
// Menu
// ==========================================

/// Menu item as rendered in the browse view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: MenuCategory,
    pub image_url: Option<String>,
    pub is_available: bool,
}

// ==========================================
// Orders
// ==========================================

/// One cart line at checkout. Prices are deliberately absent: the server
/// prices each line from the menu at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineRequest {
    #[validate(length(min = 1, message = "menu item id is required"))]
    pub menu_item_id: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1, message = "order must contain at least one item"), nested)]
    pub lines: Vec<OrderLineRequest>,
    pub payment_method: PaymentMethod,
}

/// Employee request to move an order to a new status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub status: OrderStatus,
    /// Overrides the default customer-facing message when present
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemView {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    /// Unit price captured at order time
    pub price: Decimal,
    pub quantity: u32,
}

/// One entry in an order's status timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateView {
    pub id: String,
    pub status: OrderStatus,
    pub message: String,
    /// Acting employee, absent on the system-generated placement row
    #[serde(default)]
    pub updated_by: Option<String>,
    pub created_at: i64,
}

/// Full order snapshot returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub id: String,
    pub order_number: String,
    pub customer_id: String,
    pub customer_name: String,
    /// Contact number of the ordering customer, if they gave one
    #[serde(default)]
    pub customer_mobile: Option<String>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub total_amount: Decimal,
    pub created_at: i64,
    pub updated_at: i64,
    pub items: Vec<OrderItemView>,
    pub updates: Vec<StatusUpdateView>,
}

// ==========================================
// Analytics
// ==========================================

/// Aggregated sales figures for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_orders: u64,
    pub completed_orders: u64,
    pub cancelled_orders: u64,
    pub active_orders: u64,
    /// Revenue from completed orders only
    pub total_revenue: Decimal,
    /// Mean of completed order totals, zero when nothing completed
    pub average_order_value: Decimal,
    /// Share of all orders that were cancelled, zero when there are none
    pub cancelled_rate: Decimal,
    /// Completed-order count per payment method
    pub payment_breakdown: BTreeMap<PaymentMethod, u64>,
}

impl SalesSummary {
    /// Fold order rows into the summary.
    ///
    /// Revenue, the average, and the payment histogram only count completed
    /// orders; cancelled orders contribute nothing beyond their own tally.
    pub fn compute<'a, I>(orders: I) -> Self
    where
        I: IntoIterator<Item = (OrderStatus, PaymentMethod, &'a Decimal)>,
    {
        let mut summary = SalesSummary {
            total_orders: 0,
            completed_orders: 0,
            cancelled_orders: 0,
            active_orders: 0,
            total_revenue: Decimal::ZERO,
            average_order_value: Decimal::ZERO,
            cancelled_rate: Decimal::ZERO,
            payment_breakdown: BTreeMap::new(),
        };

        for (status, method, amount) in orders {
            summary.total_orders += 1;
            match status {
                OrderStatus::Completed => {
                    summary.completed_orders += 1;
                    summary.total_revenue += *amount;
                    *summary.payment_breakdown.entry(method).or_insert(0) += 1;
                }
                OrderStatus::Cancelled => summary.cancelled_orders += 1,
                _ => summary.active_orders += 1,
            }
        }

        if summary.completed_orders > 0 {
            summary.average_order_value =
                summary.total_revenue / Decimal::from(summary.completed_orders);
        }
        if summary.total_orders > 0 {
            summary.cancelled_rate =
                Decimal::from(summary.cancelled_orders) / Decimal::from(summary.total_orders);
        }
        summary
    }
}

/// Response body of the analytics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub summary: SalesSummary,
    /// Completed orders with customer info and items, newest first
    pub completed: Vec<OrderView>,
    /// Cancelled orders, newest first
    pub cancelled: Vec<OrderView>,
    /// Units sold per menu item over completed orders, best sellers first
    pub top_items: Vec<TopItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    pub units_sold: u64,
    pub revenue: Decimal,
}
