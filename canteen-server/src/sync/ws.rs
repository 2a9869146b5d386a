//! WebSocket endpoint for the live order feed
//!
//! `GET /api/orders/feed` upgrades to a WebSocket that streams
//! [`shared::sync::OrderChange`] events as JSON text frames. Staff receive
//! every event; customers only receive events for their own orders.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::broadcast::error::RecvError;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::sync::OrderChange;

pub async fn feed(
    ws: WebSocketUpgrade,
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Response {
    ws.on_upgrade(move |socket| stream_changes(socket, state, user))
}

async fn stream_changes(mut socket: WebSocket, state: ServerState, user: CurrentUser) {
    let mut rx = state.feed.subscribe();
    tracing::debug!(user_id = %user.id, role = %user.role, "Order feed subscriber connected");

    loop {
        tokio::select! {
            change = rx.recv() => {
                let change = match change {
                    Ok(change) => change,
                    Err(RecvError::Lagged(missed)) => {
                        // Slow consumer: tell it to refetch instead of
                        // replaying history
                        tracing::warn!(user_id = %user.id, missed, "Feed subscriber lagged");
                        if socket.send(Message::text(lag_notice(missed))).await.is_err() {
                            break;
                        }
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                if !should_deliver(&user, &change) {
                    continue;
                }

                let Ok(payload) = serde_json::to_string(&change) else {
                    continue;
                };
                if socket.send(Message::text(payload)).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    // Answer pings, ignore any other client frames
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    tracing::debug!(user_id = %user.id, "Order feed subscriber disconnected");
}

/// Staff see everything; customers only their own orders
fn should_deliver(user: &CurrentUser, change: &OrderChange) -> bool {
    user.is_staff() || change.customer_id == user.id
}

/// Frame sent to a slow consumer in place of the dropped events
///
/// Clients treat it as a signal to refetch their order list.
fn lag_notice(missed: u64) -> String {
    serde_json::json!({ "lagged": missed }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderStatus, Role};
    use shared::sync::ChangeAction;

    fn user(id: &str, role: Role) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            email: format!("{}@campus.edu", role),
            full_name: "Feed Test".to_string(),
            role,
        }
    }

    fn change_for(customer_id: &str) -> OrderChange {
        OrderChange {
            seq: 1,
            action: ChangeAction::Created,
            order_id: "orders:a".to_string(),
            customer_id: customer_id.to_string(),
            status: OrderStatus::Pending,
            order: shared::client::OrderView {
                id: "orders:a".to_string(),
                order_number: "ORD-TEST0001".to_string(),
                customer_id: customer_id.to_string(),
                customer_name: "Feed Test".to_string(),
                customer_mobile: None,
                status: OrderStatus::Pending,
                payment_method: shared::models::PaymentMethod::Cash,
                total_amount: rust_decimal::Decimal::new(12000, 2),
                created_at: 0,
                updated_at: 0,
                items: vec![],
                updates: vec![],
            },
        }
    }

    #[test]
    fn staff_see_every_order() {
        let change = change_for("profile:someone");
        assert!(should_deliver(&user("profile:emp", Role::Employee), &change));
        assert!(should_deliver(&user("profile:boss", Role::Admin), &change));
    }

    #[test]
    fn customers_only_see_their_own_orders() {
        let asha = user("profile:asha", Role::Customer);
        assert!(should_deliver(&asha, &change_for("profile:asha")));
        assert!(!should_deliver(&asha, &change_for("profile:ravi")));
    }

    #[test]
    fn lag_notice_tells_the_client_how_much_it_missed() {
        let notice: serde_json::Value =
            serde_json::from_str(&lag_notice(7)).expect("notice is JSON");
        assert_eq!(notice["lagged"], 7);
    }
}
