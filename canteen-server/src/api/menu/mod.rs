//! Menu API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Menu router (read-only browse)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list))
}
