//! Client-local shopping cart.
//!
//! The cart only ever lives in the ordering client's memory; it is never
//! persisted server-side. At checkout its lines are sent as a
//! [`crate::client::PlaceOrderRequest`] and the server re-prices them from
//! the authoritative menu.
//!
//! Invariant: no line ever holds a quantity of zero or less. Any mutation
//! that would drop a quantity to zero removes the line entirely.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One menu item in the cart with its selected quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub menu_item_id: String,
    pub name: String,
    /// Display price; the server recomputes the real total at submission
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Shopping cart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add one unit of a menu item.
    ///
    /// Increments the quantity if the item is already present, otherwise
    /// appends a new line with quantity 1.
    pub fn add_item(&mut self, menu_item_id: impl Into<String>, name: impl Into<String>, price: Decimal) {
        let menu_item_id = menu_item_id.into();
        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_item_id == menu_item_id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }
        self.lines.push(CartLine {
            menu_item_id,
            name: name.into(),
            price,
            quantity: 1,
        });
    }

    /// Adjust a line's quantity by a signed delta.
    ///
    /// The line is removed entirely when the resulting quantity would be
    /// zero or negative. Unknown ids are ignored.
    pub fn change_quantity(&mut self, menu_item_id: &str, delta: i32) {
        let Some(index) = self.lines.iter().position(|l| l.menu_item_id == menu_item_id) else {
            return;
        };
        let line = &mut self.lines[index];
        let next = line.quantity as i64 + delta as i64;
        if next <= 0 {
            self.lines.remove(index);
        } else {
            // Saturate rather than wrap: a wrapped quantity could land on 0
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    /// Remove a line regardless of its quantity.
    pub fn remove_item(&mut self, menu_item_id: &str) {
        self.lines.retain(|l| l.menu_item_id != menu_item_id);
    }

    /// Σ(price × quantity) over all lines.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
