//! Order lifecycle state machine.
//!
//! The transition table is the single source of truth for which status
//! changes are legal, who the actor is (always an employee), and which
//! customer-facing message each change produces. The server validates every
//! requested transition against this table; clients use it to render the
//! action set for an order's current status.
//!
//! ```text
//! pending ──accept──▶ accepted ──start_preparing──▶ preparing ──mark_ready──▶ ready ──complete──▶ completed
//!    │
//!    └──decline──▶ cancelled
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::OrderStatus;

/// Named action an employee can take on an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    Accept,
    Decline,
    StartPreparing,
    MarkReady,
    Complete,
}

impl fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransitionAction::Accept => "accept",
            TransitionAction::Decline => "decline",
            TransitionAction::StartPreparing => "start_preparing",
            TransitionAction::MarkReady => "mark_ready",
            TransitionAction::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: OrderStatus,
    pub action: TransitionAction,
    pub to: OrderStatus,
    /// Customer-facing message appended to the audit trail
    pub message: &'static str,
}

/// The complete set of legal transitions. No skips, no backward moves.
pub const TRANSITIONS: [Transition; 5] = [
    Transition {
        from: OrderStatus::Pending,
        action: TransitionAction::Accept,
        to: OrderStatus::Accepted,
        message: "Order accepted and being prepared",
    },
    Transition {
        from: OrderStatus::Pending,
        action: TransitionAction::Decline,
        to: OrderStatus::Cancelled,
        message: "Sorry, order cancelled",
    },
    Transition {
        from: OrderStatus::Accepted,
        action: TransitionAction::StartPreparing,
        to: OrderStatus::Preparing,
        message: "Food is getting ready",
    },
    Transition {
        from: OrderStatus::Preparing,
        action: TransitionAction::MarkReady,
        to: OrderStatus::Ready,
        message: "Your food is ready! You can come and collect it now",
    },
    Transition {
        from: OrderStatus::Ready,
        action: TransitionAction::Complete,
        to: OrderStatus::Completed,
        message: "Order completed",
    },
];

/// Transition rejected by the state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("illegal transition: {from} -> {to}")]
    Illegal { from: OrderStatus, to: OrderStatus },
}

/// Look up the table row for a (current, requested) status pair.
pub fn between(from: OrderStatus, to: OrderStatus) -> Option<&'static Transition> {
    TRANSITIONS.iter().find(|t| t.from == from && t.to == to)
}

/// Validate a requested status change, returning the matching table row.
pub fn validate(from: OrderStatus, to: OrderStatus) -> Result<&'static Transition, TransitionError> {
    between(from, to).ok_or(TransitionError::Illegal { from, to })
}

/// Actions available from a given status, in table order.
///
/// Terminal statuses yield an empty set.
pub fn available_actions(from: OrderStatus) -> Vec<TransitionAction> {
    TRANSITIONS
        .iter()
        .filter(|t| t.from == from)
        .map(|t| t.action)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_the_table() {
        for t in &TRANSITIONS {
            let resolved = validate(t.from, t.to).expect("table row must validate");
            assert_eq!(resolved.action, t.action);
            assert_eq!(resolved.message, t.message);
        }
    }

    #[test]
    fn rejects_skips_and_backward_moves() {
        // Forward skip
        assert!(validate(OrderStatus::Pending, OrderStatus::Preparing).is_err());
        assert!(validate(OrderStatus::Accepted, OrderStatus::Ready).is_err());
        // Backward
        assert!(validate(OrderStatus::Ready, OrderStatus::Preparing).is_err());
        assert!(validate(OrderStatus::Accepted, OrderStatus::Pending).is_err());
        // Late cancellation is not allowed
        assert!(validate(OrderStatus::Preparing, OrderStatus::Cancelled).is_err());
        assert!(validate(OrderStatus::Ready, OrderStatus::Cancelled).is_err());
        // Self transition
        assert!(validate(OrderStatus::Pending, OrderStatus::Pending).is_err());
    }

    #[test]
    fn terminal_statuses_offer_no_actions() {
        assert!(available_actions(OrderStatus::Completed).is_empty());
        assert!(available_actions(OrderStatus::Cancelled).is_empty());
    }

    #[test]
    fn pending_offers_accept_and_decline() {
        let actions = available_actions(OrderStatus::Pending);
        assert_eq!(
            actions,
            vec![TransitionAction::Accept, TransitionAction::Decline]
        );
    }
}
