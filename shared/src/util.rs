//! Small display helpers.

use rust_decimal::Decimal;

/// Format an amount for display, e.g. `₹285.50`.
pub fn format_rupees(amount: &Decimal) -> String {
    format!("₹{:.2}", amount)
}
