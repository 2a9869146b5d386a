//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use surrealdb::RecordId;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::client::{OrderView, PlaceOrderRequest, TransitionRequest};

/// POST /api/orders - place an order from the cart
pub async fn place(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Json<OrderView>, AppError> {
    let view = state.order_lifecycle().place(&user, req).await?;
    Ok(Json(view))
}

/// GET /api/orders/mine - the current user's orders, newest first
pub async fn mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<Vec<OrderView>>, AppError> {
    let customer: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::invalid_token("Malformed user ID in token"))?;

    let views = state.orders().find_views_for_customer(customer).await?;
    Ok(Json(views))
}

/// GET /api/orders/active - the fulfilment queue (staff)
pub async fn active(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<Vec<OrderView>>, AppError> {
    if !user.is_staff() {
        return Err(AppError::forbidden("Staff role required"));
    }

    let views = state.orders().find_active_views().await?;
    Ok(Json(views))
}

/// POST /api/orders/{id}/transition - move an order along the lifecycle (staff)
pub async fn transition(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<OrderView>, AppError> {
    if !user.is_staff() {
        return Err(AppError::forbidden("Staff role required"));
    }

    let view = state.order_lifecycle().transition(&user, &id, req).await?;
    Ok(Json(view))
}

/// GET /api/orders/{id} - one order, visible to its owner and to staff
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, AppError> {
    let record_id: RecordId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid order ID: {}", id)))?;

    let view = state.orders().fetch_view(&record_id).await?;
    if !user.is_staff() && view.customer_id != user.id {
        // Hide other customers' orders entirely
        return Err(AppError::not_found(format!("Order {} not found", id)));
    }

    Ok(Json(view))
}
