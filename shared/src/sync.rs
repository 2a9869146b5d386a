//! Typed change events for the live order feed.
//!
//! Every mutation of the order table publishes one [`OrderChange`].
//! Subscribers filter by role: staff consoles take every event, a customer
//! client keeps only events whose `customer_id` matches its own user.
//! Events carry the full order snapshot so consumers never need a follow-up
//! fetch to refresh their view.

use serde::{Deserialize, Serialize};

use crate::client::OrderView;
use crate::models::OrderStatus;

/// What happened to the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    StatusChanged,
}

/// One event on the order feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderChange {
    /// Monotonic sequence number assigned by the publisher
    pub seq: u64,
    pub action: ChangeAction,
    pub order_id: String,
    /// Owner of the order, for client-side filtering
    pub customer_id: String,
    pub status: OrderStatus,
    /// Snapshot of the order after the change
    pub order: OrderView,
}
