//! Order API Module
//!
//! The order lifecycle surface: thin order creation, payment recording,
//! fulfillment tracking, invoices, and the explicit exceptional status
//! transition. Every route is tenant-scoped by store id.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route(
            "/{id}/payments",
            get(handler::list_payments)
                .post(handler::record_payment)
                .patch(handler::correct_payment),
        )
        .route(
            "/{id}/fulfillments",
            get(handler::list_fulfillments)
                .post(handler::create_fulfillment)
                .patch(handler::update_fulfillment_status),
        )
        .route(
            "/{id}/invoices",
            get(handler::list_invoices).post(handler::create_invoice),
        )
        .route("/{id}/status", post(handler::set_exceptional_status))
        .route("/{id}/ledger", get(handler::list_ledger))
}
