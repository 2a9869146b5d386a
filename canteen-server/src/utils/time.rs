//! Time helpers
//!
//! All timestamps in the system are epoch milliseconds (i64).

use chrono::Utc;

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
