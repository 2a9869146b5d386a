//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - signup, login, current user
//! - [`menu`] - menu browsing and management
//! - [`orders`] - order placement, queues, lifecycle, live feed
//! - [`analytics`] - sales summary for admins

pub mod analytics;
pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
