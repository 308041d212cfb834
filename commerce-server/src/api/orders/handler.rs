//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{EntryRow, FulfillmentRow, InvoiceRow, OrderRow, PaymentRow};
use crate::db::repository as repo;
use crate::orders::status;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};
use shared::finance::{InvoiceStatus, ReferenceType};
use shared::order::{
    ExceptionalStatusInput, FulfillmentInput, FulfillmentOutcome, FulfillmentStatusUpdate,
    InvoiceInput, OrderInput, OrderStatus, PaymentInput, PaymentOutcome, PaymentStatus,
};
use shared::util::{now_millis, snowflake_id};

/// Tenant scope for read endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreScope {
    pub store_id: i64,
}

/// Query params for listing orders
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub store_id: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

// ========== Order creation / reads ==========

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub store_id: i64,
    #[serde(flatten)]
    pub order: OrderInput,
}

/// Create an order with already-resolved totals. Pricing, tax, and
/// shipping are computed upstream; this seeds the aggregate the lifecycle
/// components own from here on.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<OrderRow>>> {
    let input = payload.order;
    for (field, value) in [
        ("price", input.price),
        ("taxTotal", input.tax_total),
        ("discountTotal", input.discount_total),
        ("shippingCost", input.shipping_cost),
        ("totalPayable", input.total_payable),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::validation(format!(
                "{field} must be a non-negative number"
            )));
        }
    }

    let store = repo::store::find_by_id(&state.db.pool, payload.store_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Store {} not found", payload.store_id)))?;

    let now = now_millis();
    let order_number = match input.order_number {
        Some(n) if !n.trim().is_empty() => n,
        _ => {
            let count = repo::order::count_by_store(&state.db.pool, store.id).await?;
            format!(
                "ORD-{}-{:04}",
                chrono::Utc::now().format("%Y%m%d"),
                count + 1
            )
        }
    };

    let row = OrderRow {
        id: snowflake_id(),
        store_id: store.id,
        order_number,
        order_channel: input.order_channel.as_str().to_string(),
        delivery_mode: input.delivery_mode.as_str().to_string(),
        price_currency: input
            .price_currency
            .unwrap_or_else(|| store.price_currency.clone()),
        price: input.price,
        tax_total: input.tax_total,
        discount_total: input.discount_total,
        shipping_cost: input.shipping_cost,
        total_payable: input.total_payable,
        amount_paid: 0.0,
        amount_due: input.total_payable,
        payment_status: PaymentStatus::PaymentDue.as_str().to_string(),
        fulfillment_status: shared::order::FulfillmentStatus::Processing.as_str().to_string(),
        order_status: OrderStatus::OrderPaymentDue.as_str().to_string(),
        status_reason: None,
        customer_name: input.customer_name,
        note: input.note,
        created_at: now,
        updated_at: now,
    };
    repo::order::insert(&state.db.pool, &row).await?;

    tracing::info!(order_id = row.id, order_number = %row.order_number, "Order created");
    Ok(ok_with_message(row, "Order created successfully"))
}

/// List a store's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<OrderRow>>>> {
    let rows =
        repo::order::list_by_store(&state.db.pool, query.store_id, query.limit, query.offset)
            .await?;
    Ok(ok(rows))
}

/// Current aggregate fields of one order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(scope): Query<StoreScope>,
) -> AppResult<Json<AppResponse<OrderRow>>> {
    let row = repo::order::find_by_id(&state.db.pool, scope.store_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(ok(row))
}

// ========== Payments ==========

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub store_id: i64,
    #[serde(flatten)]
    pub payment: PaymentInput,
}

/// Record a payment (full or partial) against an order
pub async fn record_payment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RecordPaymentRequest>,
) -> AppResult<Json<AppResponse<PaymentOutcome>>> {
    let outcome = state
        .payment_recorder()
        .record_payment(payload.store_id, id, payload.payment)
        .await?;
    Ok(ok_with_message(outcome, "Payment recorded successfully"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectPaymentRequest {
    pub store_id: i64,
    pub payment_id: i64,
    pub payment_status: PaymentStatus,
}

/// Correct one payment's status (decline, refund) and heal the aggregate
pub async fn correct_payment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CorrectPaymentRequest>,
) -> AppResult<Json<AppResponse<PaymentOutcome>>> {
    let outcome = state
        .payment_recorder()
        .correct_payment_status(
            payload.store_id,
            id,
            payload.payment_id,
            payload.payment_status,
        )
        .await?;
    Ok(ok_with_message(outcome, "Payment status corrected"))
}

/// Full payment history of an order, most recent first
pub async fn list_payments(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(scope): Query<StoreScope>,
) -> AppResult<Json<AppResponse<Vec<PaymentRow>>>> {
    let rows = repo::payment::list_by_order_desc(&state.db.pool, scope.store_id, id).await?;
    Ok(ok(rows))
}

// ========== Fulfillments ==========

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFulfillmentRequest {
    pub store_id: i64,
    #[serde(flatten)]
    pub fulfillment: FulfillmentInput,
}

/// Create a new shipment for this order (partial or full)
pub async fn create_fulfillment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateFulfillmentRequest>,
) -> AppResult<Json<AppResponse<FulfillmentOutcome>>> {
    let outcome = state
        .fulfillment_tracker()
        .create_fulfillment(payload.store_id, id, payload.fulfillment)
        .await?;
    Ok(ok_with_message(outcome, "Fulfillment created successfully"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFulfillmentRequest {
    pub store_id: i64,
    #[serde(flatten)]
    pub update: FulfillmentStatusUpdate,
}

/// Move one shipment along its chain (e.g. Packed → Shipped → Delivered)
pub async fn update_fulfillment_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateFulfillmentRequest>,
) -> AppResult<Json<AppResponse<FulfillmentOutcome>>> {
    let outcome = state
        .fulfillment_tracker()
        .update_fulfillment_status(
            payload.store_id,
            id,
            payload.update.fulfillment_id,
            payload.update.delivery_status,
        )
        .await?;
    Ok(ok_with_message(outcome, "Fulfillment updated"))
}

/// Full shipment history of an order, chronological
pub async fn list_fulfillments(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(scope): Query<StoreScope>,
) -> AppResult<Json<AppResponse<Vec<FulfillmentRow>>>> {
    let rows = repo::fulfillment::list_by_order_asc(&state.db.pool, scope.store_id, id).await?;
    Ok(ok(rows))
}

// ========== Invoices ==========

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub store_id: i64,
    #[serde(flatten)]
    pub invoice: InvoiceInput,
}

/// Create an additional invoice for this order (deposit, final, revision)
pub async fn create_invoice(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> AppResult<Json<AppResponse<InvoiceRow>>> {
    let input = payload.invoice;
    if !input.total_payment_due.is_finite() || input.total_payment_due < 0.0 {
        return Err(AppError::validation(
            "totalPaymentDue must be a non-negative number",
        ));
    }

    let order_row = repo::order::find_by_id(&state.db.pool, payload.store_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    let count = repo::invoice::count_by_order(&state.db.pool, id).await?;
    let invoice_number = format!("{}-INV-{:02}", order_row.order_number, count + 1);

    let now = now_millis();
    let row = InvoiceRow {
        id: snowflake_id(),
        store_id: payload.store_id,
        order_id: Some(id),
        invoice_number,
        invoice_status: InvoiceStatus::Draft.as_str().to_string(),
        total_payment_due: input.total_payment_due,
        price_currency: input
            .price_currency
            .unwrap_or_else(|| order_row.price_currency.clone()),
        payment_due_date: input.payment_due_date,
        description: input
            .description
            .or_else(|| Some(format!("Invoice for {}", order_row.order_number))),
        created_at: now,
        updated_at: now,
    };
    repo::invoice::insert(&state.db.pool, &row).await?;

    tracing::info!(invoice_id = row.id, invoice_number = %row.invoice_number, "Invoice created");
    Ok(ok_with_message(row, "Invoice created successfully"))
}

/// Invoices of an order, chronological
pub async fn list_invoices(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(scope): Query<StoreScope>,
) -> AppResult<Json<AppResponse<Vec<InvoiceRow>>>> {
    let rows = repo::invoice::list_by_order_asc(&state.db.pool, scope.store_id, id).await?;
    Ok(ok(rows))
}

// ========== Exceptional status ==========

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionalStatusRequest {
    pub store_id: i64,
    #[serde(flatten)]
    pub input: ExceptionalStatusInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutcome {
    pub order_status: OrderStatus,
}

/// Cancel, return, or flag a problem, the one sanctioned regression path
pub async fn set_exceptional_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ExceptionalStatusRequest>,
) -> AppResult<Json<AppResponse<StatusOutcome>>> {
    let _guard = state.locks.acquire(id).await;
    let mut tx = state
        .db
        .pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let order_row = repo::order::find_by_id(&mut *tx, payload.store_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    let new_status = status::apply_exceptional(
        &mut *tx,
        id,
        order_row.order_status(),
        payload.input.order_status,
        payload.input.reason.as_deref(),
        now_millis(),
    )
    .await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(ok(StatusOutcome {
        order_status: new_status,
    }))
}

// ========== Ledger (per order, audit view) ==========

/// Journal rows posted for this order
pub async fn list_ledger(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(scope): Query<StoreScope>,
) -> AppResult<Json<AppResponse<Vec<EntryRow>>>> {
    let rows = repo::ledger::list_by_reference(
        &state.db.pool,
        scope.store_id,
        ReferenceType::Order.as_str(),
        id,
    )
    .await?;
    Ok(ok(rows))
}
