//! Health check endpoint

use crate::core::ServerState;
use crate::utils::{AppResponse, ok};
use axum::{Json, Router, routing::get};
use serde::Serialize;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<AppResponse<Health>> {
    ok(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
