//! Store API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{AccountRow, EntryRow, PaymentMethodRow, StoreRow};
use crate::db::repository as repo;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};
use shared::util::{now_millis, snowflake_id};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub price_currency: Option<String>,
}

/// Create a store and seed its default chart of accounts and payment
/// method mappings
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateStoreRequest>,
) -> AppResult<Json<AppResponse<StoreRow>>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("name is required"));
    }

    let now = now_millis();
    let row = StoreRow {
        id: snowflake_id(),
        name: payload.name,
        owner_id: payload.owner_id,
        price_currency: payload.price_currency.unwrap_or_else(|| "USD".to_string()),
        created_at: now,
        updated_at: now,
    };

    let mut tx = state
        .db
        .pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    repo::store::insert(&mut *tx, &row).await?;
    repo::account::seed_defaults(&mut *tx, row.id).await?;
    repo::payment_method::seed_defaults(&mut *tx, row.id).await?;
    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(store_id = row.id, name = %row.name, "Store created");
    Ok(ok_with_message(row, "Store created successfully"))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<StoreRow>>> {
    let row = repo::store::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Store {} not found", id)))?;
    Ok(ok(row))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

/// A store's journal, newest first
pub async fn list_ledger(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<AppResponse<Vec<EntryRow>>>> {
    let rows =
        repo::ledger::list_by_store(&state.db.pool, id, query.limit, query.offset).await?;
    Ok(ok(rows))
}

/// A store's chart of accounts
pub async fn list_accounts(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Vec<AccountRow>>>> {
    let rows = repo::account::list_by_store(&state.db.pool, id).await?;
    Ok(ok(rows))
}

/// A store's payment-method → COA mappings
pub async fn list_payment_methods(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Vec<PaymentMethodRow>>>> {
    let rows = repo::payment_method::list_by_store(&state.db.pool, id).await?;
    Ok(ok(rows))
}
