//! Payment rows
//!
//! Append-only: there is an insert and a status correction, nothing else.
//! The aggregate on the order is always recomputed from `list_complete_*`,
//! never incremented.

use super::RepoResult;
use crate::db::models::PaymentRow;
use sqlx::SqliteExecutor;

pub async fn insert(ex: impl SqliteExecutor<'_>, row: &PaymentRow) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO order_payments (
            id, order_id, store_id, amount, price_currency, payment_method,
            payment_gateway, payment_ref, payment_status, invoice_id,
            refund_of, note, idempotency_key, processed_at, created_at,
            updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.order_id)
    .bind(row.store_id)
    .bind(row.amount)
    .bind(&row.price_currency)
    .bind(&row.payment_method)
    .bind(&row.payment_gateway)
    .bind(&row.payment_ref)
    .bind(&row.payment_status)
    .bind(row.invoice_id)
    .bind(row.refund_of)
    .bind(&row.note)
    .bind(&row.idempotency_key)
    .bind(row.processed_at)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Full payment history of an order, most recent first (display order)
pub async fn list_by_order_desc(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    order_id: i64,
) -> RepoResult<Vec<PaymentRow>> {
    let rows = sqlx::query_as::<_, PaymentRow>(
        r#"
        SELECT * FROM order_payments
        WHERE order_id = ? AND store_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(order_id)
    .bind(store_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// All PaymentComplete payments of an order: the recompute input
pub async fn list_complete_by_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
) -> RepoResult<Vec<PaymentRow>> {
    let rows = sqlx::query_as::<_, PaymentRow>(
        r#"
        SELECT * FROM order_payments
        WHERE order_id = ? AND payment_status = 'PaymentComplete'
        ORDER BY created_at ASC
        "#,
    )
    .bind(order_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// All PaymentComplete payments referencing an invoice: the projector input
pub async fn list_complete_by_invoice(
    ex: impl SqliteExecutor<'_>,
    invoice_id: i64,
) -> RepoResult<Vec<PaymentRow>> {
    let rows = sqlx::query_as::<_, PaymentRow>(
        r#"
        SELECT * FROM order_payments
        WHERE invoice_id = ? AND payment_status = 'PaymentComplete'
        ORDER BY created_at ASC
        "#,
    )
    .bind(invoice_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Fetch one payment, scoped to its order
pub async fn find_by_id_for_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    payment_id: i64,
) -> RepoResult<Option<PaymentRow>> {
    let row = sqlx::query_as::<_, PaymentRow>(
        "SELECT * FROM order_payments WHERE id = ? AND order_id = ?",
    )
    .bind(payment_id)
    .bind(order_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

/// Status correction, the only mutation a payment row ever sees
pub async fn update_status(
    ex: impl SqliteExecutor<'_>,
    payment_id: i64,
    payment_status: &str,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE order_payments SET payment_status = ?, updated_at = ? WHERE id = ?")
        .bind(payment_status)
        .bind(now)
        .bind(payment_id)
        .execute(ex)
        .await?;
    Ok(())
}

/// Look up a previously processed payment by its idempotency key
pub async fn find_by_idempotency_key(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    key: &str,
) -> RepoResult<Option<PaymentRow>> {
    let row = sqlx::query_as::<_, PaymentRow>(
        "SELECT * FROM order_payments WHERE store_id = ? AND idempotency_key = ?",
    )
    .bind(store_id)
    .bind(key)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}
