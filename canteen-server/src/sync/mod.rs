//! Live synchronization
//!
//! - [`feed`]: in-process broadcast of order change events
//! - [`ws`]: WebSocket delivery to connected clients

pub mod feed;
pub mod ws;

pub use feed::OrderFeed;
