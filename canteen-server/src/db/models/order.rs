//! Order Models
//!
//! An order spans three tables: the order row itself, one `order_item` row
//! per priced line, and an `order_status_update` row per lifecycle step.
//! Item and update rows link back to the order through `order_id`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::models::{OrderStatus, PaymentMethod};

/// Order ID type
pub type OrderId = RecordId;

/// Order row matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<OrderId>,
    /// Human-readable receipt number, unique per order
    pub order_number: String,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    /// Denormalized for the fulfilment console
    pub customer_name: String,
    #[serde(default)]
    pub customer_mobile: Option<String>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// Server-computed total, Σ(price × quantity) over the items
    pub total_amount: Decimal,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Priced order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: OrderId,
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    /// Name captured at order time
    pub name: String,
    /// Unit price captured at order time
    pub price: Decimal,
    pub quantity: u32,
}

/// One entry of an order's status timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub message: String,
    /// Acting employee; the system-generated placement row has none
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub updated_by: Option<RecordId>,
    pub created_at: i64,
}
