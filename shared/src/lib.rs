//! Types shared between the canteen server and its clients.
//!
//! # Contents
//!
//! - [`models`]: domain enums (order status, payment method, menu category, role)
//! - [`lifecycle`]: the order state machine and its transition table
//! - [`cart`]: the client-local shopping cart
//! - [`client`]: request/response DTOs for the HTTP API
//! - [`sync`]: typed change events delivered over the order feed
//! - [`util`]: currency formatting helpers

pub mod cart;
pub mod client;
pub mod lifecycle;
pub mod models;
pub mod sync;
pub mod util;

pub use cart::{Cart, CartLine};
pub use lifecycle::{Transition, TransitionAction, TransitionError};
pub use models::{MenuCategory, OrderStatus, PaymentMethod, Role};
pub use sync::{ChangeAction, OrderChange};
