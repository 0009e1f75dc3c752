//! HTTP surface of the service.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared layers.
//! - Translate JSON requests into `shop_core` calls and errors into status codes.
//! - Carry the key store and reset lifetimes to handlers through [`state::AppState`].

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
