//! End-to-end order flow against an in-memory database
//!
//! Covers placement with server-side pricing, the lifecycle state machine,
//! concurrent transition conflicts and the sales summary.

use canteen_server::auth::CurrentUser;
use canteen_server::core::{Config, ServerState};
use canteen_server::db::models::MenuItemCreate;
use canteen_server::db::models::Profile;
use canteen_server::utils::AppError;
use canteen_server::utils::now_millis;
use rust_decimal::Decimal;
use shared::client::{OrderLineRequest, PlaceOrderRequest, TransitionRequest};
use shared::models::{MenuCategory, OrderStatus, PaymentMethod, Role};

fn rupees(units: i64, cents: i64) -> Decimal {
    Decimal::new(units * 100 + cents, 2)
}

async fn test_state() -> ServerState {
    let config = Config::with_overrides("/tmp/canteen-test", 0).expect("config");
    ServerState::initialize_in_memory(&config)
        .await
        .expect("in-memory state must initialize")
}

async fn create_user(state: &ServerState, email: &str, role: Role) -> CurrentUser {
    let profile = Profile {
        id: None,
        email: email.to_string(),
        full_name: format!("Test {}", role),
        mobile: Some("9876543210".to_string()),
        role,
        hash_pass: Profile::hash_password("test-password").expect("hash"),
        created_at: now_millis(),
    };
    let created = state.profiles().create(profile).await.expect("create profile");
    CurrentUser {
        id: created.id.as_ref().expect("profile id").to_string(),
        email: created.email,
        full_name: created.full_name,
        role: created.role,
    }
}

async fn menu_item(
    state: &ServerState,
    name: &str,
    price: Decimal,
    available: bool,
) -> String {
    let item = state
        .menu_items()
        .create(MenuItemCreate {
            name: name.to_string(),
            description: None,
            price,
            category: MenuCategory::Meals,
            image_url: None,
            is_available: available,
        })
        .await
        .expect("create menu item");
    item.id.expect("menu item id").to_string()
}

#[tokio::test]
async fn place_order_prices_lines_server_side() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;
    let biryani = menu_item(&state, "Chicken Biryani", rupees(120, 0), true).await;
    let lassi = menu_item(&state, "Sweet Lassi", rupees(45, 50), true).await;

    let view = state
        .order_lifecycle()
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![
                    OrderLineRequest {
                        menu_item_id: biryani.clone(),
                        quantity: 2,
                    },
                    OrderLineRequest {
                        menu_item_id: lassi.clone(),
                        quantity: 1,
                    },
                ],
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .expect("order must be placed");

    assert_eq!(view.status, OrderStatus::Pending);
    assert_eq!(view.total_amount, rupees(285, 50));
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.customer_id, customer.id);
    assert_eq!(view.customer_mobile.as_deref(), Some("9876543210"));
    assert!(view.order_number.starts_with("ORD-"));

    // The opening status update is part of the same write, and carries no
    // acting employee
    assert_eq!(view.updates.len(), 1);
    assert_eq!(view.updates[0].status, OrderStatus::Pending);
    assert_eq!(view.updates[0].message, "Order placed successfully");
    assert_eq!(view.updates[0].updated_by, None);

    // Captured unit prices come from the menu, not the client
    let biryani_line = view
        .items
        .iter()
        .find(|i| i.menu_item_id == biryani)
        .expect("biryani line");
    assert_eq!(biryani_line.price, rupees(120, 0));
    assert_eq!(biryani_line.quantity, 2);
}

#[tokio::test]
async fn empty_cart_is_rejected_before_any_write() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;

    let result = state
        .order_lifecycle()
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![],
                payment_method: PaymentMethod::Cash,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    let views = state
        .orders()
        .find_views_for_customer(customer.id.parse().expect("record id"))
        .await
        .expect("fetch orders");
    assert!(views.is_empty());
}

#[tokio::test]
async fn unavailable_item_rejects_the_whole_order() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;
    let dosa = menu_item(&state, "Masala Dosa", rupees(60, 0), true).await;
    let thali = menu_item(&state, "Veg Thali", rupees(90, 0), false).await;

    let result = state
        .order_lifecycle()
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![
                    OrderLineRequest {
                        menu_item_id: dosa,
                        quantity: 1,
                    },
                    OrderLineRequest {
                        menu_item_id: thali,
                        quantity: 1,
                    },
                ],
                payment_method: PaymentMethod::Online,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BusinessRule(_))));
    let views = state
        .orders()
        .find_views_for_customer(customer.id.parse().expect("record id"))
        .await
        .expect("fetch orders");
    assert!(views.is_empty(), "nothing may be written on rejection");
}

#[tokio::test]
async fn unknown_menu_item_is_rejected() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;

    let result = state
        .order_lifecycle()
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![OrderLineRequest {
                    menu_item_id: "menu_item:doesnotexist".to_string(),
                    quantity: 1,
                }],
                payment_method: PaymentMethod::Card,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn accept_appends_audit_row_with_default_message() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;
    let employee = create_user(&state, "ops@campus.edu", Role::Employee).await;
    let tea = menu_item(&state, "Masala Chai", rupees(15, 0), true).await;

    let placed = state
        .order_lifecycle()
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![OrderLineRequest {
                    menu_item_id: tea,
                    quantity: 1,
                }],
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .expect("place order");

    let accepted = state
        .order_lifecycle()
        .transition(
            &employee,
            &placed.id,
            TransitionRequest {
                status: OrderStatus::Accepted,
                message: None,
            },
        )
        .await
        .expect("accept order");

    assert_eq!(accepted.status, OrderStatus::Accepted);
    assert_eq!(accepted.updates.len(), 2);
    assert_eq!(accepted.updates[1].status, OrderStatus::Accepted);
    assert_eq!(accepted.updates[1].message, "Order accepted and being prepared");
    // The audit row records who acted; the placement row never does
    assert_eq!(accepted.updates[1].updated_by.as_deref(), Some(employee.id.as_str()));
    assert_eq!(accepted.updates[0].updated_by, None);
    assert!(accepted.updated_at >= placed.updated_at);
}

#[tokio::test]
async fn skipping_a_lifecycle_step_is_rejected() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;
    let employee = create_user(&state, "ops@campus.edu", Role::Employee).await;
    let tea = menu_item(&state, "Masala Chai", rupees(15, 0), true).await;

    let placed = state
        .order_lifecycle()
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![OrderLineRequest {
                    menu_item_id: tea,
                    quantity: 1,
                }],
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .expect("place order");

    // pending -> preparing skips the accept step
    let result = state
        .order_lifecycle()
        .transition(
            &employee,
            &placed.id,
            TransitionRequest {
                status: OrderStatus::Preparing,
                message: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BusinessRule(_))));

    // The order is untouched
    let view = state
        .orders()
        .fetch_view(&placed.id.parse().expect("record id"))
        .await
        .expect("fetch view");
    assert_eq!(view.status, OrderStatus::Pending);
    assert_eq!(view.updates.len(), 1);
}

#[tokio::test]
async fn repeated_transition_loses_the_race() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;
    let employee = create_user(&state, "ops@campus.edu", Role::Employee).await;
    let tea = menu_item(&state, "Masala Chai", rupees(15, 0), true).await;

    let placed = state
        .order_lifecycle()
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![OrderLineRequest {
                    menu_item_id: tea,
                    quantity: 1,
                }],
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .expect("place order");

    // Drive to accepted directly on the repository, simulating another
    // employee winning the compare-and-set first
    state
        .order_lifecycle()
        .transition(
            &employee,
            &placed.id,
            TransitionRequest {
                status: OrderStatus::Accepted,
                message: None,
            },
        )
        .await
        .expect("first accept wins");

    // A second accept now sees accepted -> accepted, an illegal move
    let result = state
        .order_lifecycle()
        .transition(
            &employee,
            &placed.id,
            TransitionRequest {
                status: OrderStatus::Accepted,
                message: None,
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::BusinessRule(_))));

    // A writer holding a stale status loses the compare-and-set without
    // touching the audit trail
    let record_id = placed.id.parse().expect("record id");
    let stale = state
        .orders()
        .transition(
            placed.id.parse().expect("record id"),
            OrderStatus::Pending,
            OrderStatus::Cancelled,
            now_millis(),
            canteen_server::db::models::OrderStatusUpdate {
                id: None,
                order_id: placed.id.parse().expect("record id"),
                status: OrderStatus::Cancelled,
                message: "Sorry, order cancelled".to_string(),
                updated_by: None,
                created_at: now_millis(),
            },
        )
        .await;
    assert!(matches!(
        stale,
        Err(canteen_server::db::repository::RepoError::Conflict(_))
    ));

    let view = state.orders().fetch_view(&record_id).await.expect("view");
    assert_eq!(view.status, OrderStatus::Accepted);
    assert_eq!(view.updates.len(), 2);
}

#[tokio::test]
async fn full_lifecycle_and_sales_summary() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;
    let employee = create_user(&state, "ops@campus.edu", Role::Employee).await;
    let biryani = menu_item(&state, "Chicken Biryani", rupees(120, 0), true).await;

    let lifecycle = state.order_lifecycle();

    // One order driven to completion
    let completed = lifecycle
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![OrderLineRequest {
                    menu_item_id: biryani.clone(),
                    quantity: 2,
                }],
                payment_method: PaymentMethod::Online,
            },
        )
        .await
        .expect("place order");
    for status in [
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        lifecycle
            .transition(
                &employee,
                &completed.id,
                TransitionRequest {
                    status,
                    message: None,
                },
            )
            .await
            .expect("lifecycle step");
    }

    // One order declined at pending
    let declined = lifecycle
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![OrderLineRequest {
                    menu_item_id: biryani.clone(),
                    quantity: 1,
                }],
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .expect("place order");
    let cancelled = lifecycle
        .transition(
            &employee,
            &declined.id,
            TransitionRequest {
                status: OrderStatus::Cancelled,
                message: None,
            },
        )
        .await
        .expect("decline order");
    assert_eq!(cancelled.updates[1].message, "Sorry, order cancelled");

    // One order still pending
    lifecycle
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![OrderLineRequest {
                    menu_item_id: biryani.clone(),
                    quantity: 1,
                }],
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .expect("place order");

    // Fulfilment queue only holds the pending order
    let active = state.orders().find_active_views().await.expect("active");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].status, OrderStatus::Pending);

    // Revenue counts completed orders only
    let rows = state.orders().analytics_rows().await.expect("rows");
    let summary = shared::client::SalesSummary::compute(
        rows.iter()
            .map(|r| (r.status, r.payment_method, &r.total_amount)),
    );
    assert_eq!(summary.total_orders, 3);
    assert_eq!(summary.completed_orders, 1);
    assert_eq!(summary.cancelled_orders, 1);
    assert_eq!(summary.active_orders, 1);
    assert_eq!(summary.total_revenue, rupees(240, 0));
    assert_eq!(summary.average_order_value, rupees(240, 0));
    assert_eq!(
        summary.cancelled_rate,
        Decimal::from(1) / Decimal::from(3)
    );
    assert_eq!(
        summary.payment_breakdown.get(&PaymentMethod::Online),
        Some(&1)
    );

    // The dashboard partitions carry full order snapshots
    let done = state
        .orders()
        .find_views_by_status(OrderStatus::Completed)
        .await
        .expect("completed partition");
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, completed.id);
    assert_eq!(done[0].customer_mobile.as_deref(), Some("9876543210"));

    let dropped = state
        .orders()
        .find_views_by_status(OrderStatus::Cancelled)
        .await
        .expect("cancelled partition");
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].id, declined.id);

    // Best sellers come from completed orders only
    let top = state.orders().top_items(5).await.expect("top items");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "Chicken Biryani");
    assert_eq!(top[0].units_sold, 2);
    assert_eq!(top[0].revenue, rupees(240, 0));
}

#[tokio::test]
async fn completed_orders_leave_the_active_queue() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;
    let employee = create_user(&state, "ops@campus.edu", Role::Employee).await;
    let tea = menu_item(&state, "Masala Chai", rupees(15, 0), true).await;

    let lifecycle = state.order_lifecycle();
    let placed = lifecycle
        .place(
            &customer,
            PlaceOrderRequest {
                lines: vec![OrderLineRequest {
                    menu_item_id: tea,
                    quantity: 1,
                }],
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .expect("place order");

    assert_eq!(state.orders().find_active_views().await.expect("active").len(), 1);

    lifecycle
        .transition(
            &employee,
            &placed.id,
            TransitionRequest {
                status: OrderStatus::Cancelled,
                message: Some("Kitchen closed early".to_string()),
            },
        )
        .await
        .expect("decline");

    assert!(state.orders().find_active_views().await.expect("active").is_empty());

    // The custom message overrides the default
    let view = state
        .orders()
        .fetch_view(&placed.id.parse().expect("record id"))
        .await
        .expect("fetch view");
    assert_eq!(view.updates[1].message, "Kitchen closed early");
}

#[tokio::test]
async fn active_queue_lists_newest_first() {
    let state = test_state().await;
    let customer = create_user(&state, "asha@campus.edu", Role::Customer).await;
    let tea = menu_item(&state, "Masala Chai", rupees(15, 0), true).await;

    let lifecycle = state.order_lifecycle();
    for _ in 0..2 {
        lifecycle
            .place(
                &customer,
                PlaceOrderRequest {
                    lines: vec![OrderLineRequest {
                        menu_item_id: tea.clone(),
                        quantity: 1,
                    }],
                    payment_method: PaymentMethod::Cash,
                },
            )
            .await
            .expect("place order");
    }

    let active = state.orders().find_active_views().await.expect("active");
    assert_eq!(active.len(), 2);
    assert!(
        active[0].created_at >= active[1].created_at,
        "newest order must come first"
    );
}

#[tokio::test]
async fn menu_listing_is_grouped_by_category() {
    let state = test_state().await;

    // Created in scrambled category order, plus one sold-out item
    for (name, category, available) in [
        ("Sweet Lassi", MenuCategory::Beverages, true),
        ("Paneer Tikka", MenuCategory::Starters, true),
        ("Veg Thali", MenuCategory::Meals, true),
        ("Masala Chai", MenuCategory::Beverages, true),
        ("Chicken 65", MenuCategory::Starters, false),
    ] {
        state
            .menu_items()
            .create(MenuItemCreate {
                name: name.to_string(),
                description: None,
                price: rupees(50, 0),
                category,
                image_url: None,
                is_available: available,
            })
            .await
            .expect("create menu item");
    }

    let items = state.menu_items().find_all(None).await.expect("list menu");
    assert_eq!(items.len(), 4, "sold-out items never appear");
    assert!(items.iter().all(|i| i.is_available));
    let categories: Vec<&str> = items.iter().map(|i| i.category.as_str()).collect();
    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted, "listing must be grouped by category");

    // A category filter narrows the listing
    let starters = state
        .menu_items()
        .find_all(Some(MenuCategory::Starters))
        .await
        .expect("list starters");
    assert_eq!(starters.len(), 1);
    assert_eq!(starters[0].name, "Paneer Tikka");
}
