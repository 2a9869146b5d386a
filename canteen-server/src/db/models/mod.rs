//! Database models
//!
//! Records as stored in SurrealDB. ID convention: `RecordId` everywhere,
//! serialized as "table:id" strings on the wire.

pub mod menu_item;
pub mod order;
pub mod profile;
pub mod serde_helpers;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemId};
pub use order::{Order, OrderId, OrderItem, OrderStatusUpdate};
pub use profile::{Profile, ProfileId};
