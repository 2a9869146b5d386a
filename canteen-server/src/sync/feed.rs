//! Live order feed
//!
//! Broadcast channel carrying [`OrderChange`] events. Every order mutation
//! publishes exactly one event; subscribers that fall behind miss events
//! rather than blocking the publisher, and resynchronize with a fetch.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;

use shared::client::OrderView;
use shared::sync::{ChangeAction, OrderChange};

/// Capacity of the broadcast channel
const FEED_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct OrderFeed {
    tx: broadcast::Sender<OrderChange>,
    seq: Arc<AtomicU64>,
}

impl OrderFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            tx,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Publish a change event with the next sequence number
    ///
    /// Returns the number of receivers the event reached.
    pub fn publish(&self, action: ChangeAction, order: OrderView) -> usize {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let change = OrderChange {
            seq,
            action,
            order_id: order.id.clone(),
            customer_id: order.customer_id.clone(),
            status: order.status,
            order,
        };

        match self.tx.send(change) {
            Ok(receivers) => receivers,
            // No subscribers connected, nothing to deliver
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderChange> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for OrderFeed {
    fn default() -> Self {
        Self::new()
    }
}
