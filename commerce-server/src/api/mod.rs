//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`orders`] - order lifecycle: payments, fulfillments, invoices, status
//! - [`stores`] - store provisioning and finance reporting views

pub mod health;
pub mod orders;
pub mod stores;

use crate::core::ServerState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(stores::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
