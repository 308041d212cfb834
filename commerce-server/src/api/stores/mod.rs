//! Store API Module
//!
//! Store provisioning (with its default chart of accounts and payment
//! method mappings) and the finance reporting views.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Store router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/ledger", get(handler::list_ledger))
        .route("/{id}/accounts", get(handler::list_accounts))
        .route("/{id}/payment-methods", get(handler::list_payment_methods))
}
