//! Order API Module
//!
//! Placement, the customer and fulfilment queues, status transitions and
//! the live feed.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;
use crate::sync::ws;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Customer surface
        .route("/", post(handler::place))
        .route("/mine", get(handler::mine))
        // Fulfilment surface (role checked in handlers)
        .route("/active", get(handler::active))
        .route("/{id}/transition", post(handler::transition))
        // Live feed (WebSocket)
        .route("/feed", get(ws::feed))
        // Single order, owner or staff
        .route("/{id}", get(handler::get_by_id))
}
