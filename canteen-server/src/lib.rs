//! Canteen Server - campus canteen ordering backend
//!
//! # Architecture overview
//!
//! - **Auth** (`auth`): JWT + Argon2 accounts with customer/employee/admin roles
//! - **Database** (`db`): embedded SurrealDB storage for profiles, menu and orders
//! - **Orders** (`orders`): order placement and the fulfilment state machine
//! - **Sync** (`sync`): live order feed over WebSocket
//! - **HTTP API** (`api`): RESTful API surface
//!
//! # Module structure
//!
//! ```text
//! canteen-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, extractor, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # database layer (models, repositories, seed)
//! ├── orders/        # order placement and lifecycle
//! ├── sync/          # live order feed
//! └── utils/         # errors, results, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod sync;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use sync::OrderFeed;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured events under the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______            __
  / ____/___ _____  / /____  ___  ____
 / /   / __ `/ __ \/ __/ _ \/ _ \/ __ \
/ /___/ /_/ / / / / /_/  __/  __/ / / /
\____/\__,_/_/ /_/\__/\___/\___/_/ /_/
    "#
    );
}
