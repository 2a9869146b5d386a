//! Auth API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Auth router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public: signup and login are skipped by require_auth
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        // Requires a valid token
        .route("/me", get(handler::me))
}
