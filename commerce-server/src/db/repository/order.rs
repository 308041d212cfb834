//! Order rows
//!
//! The aggregate/projection columns have exactly one writer each:
//! payment fields are written by the payment recorder, the fulfillment
//! field by the fulfillment tracker, and `order_status` only by the
//! status coordinator (`orders::status`); there is no
//! order-status setter here.

use super::RepoResult;
use crate::db::models::OrderRow;
use sqlx::SqliteExecutor;

pub async fn insert(ex: impl SqliteExecutor<'_>, row: &OrderRow) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO orders (
            id, store_id, order_number, order_channel, delivery_mode,
            price_currency, price, tax_total, discount_total, shipping_cost,
            total_payable, amount_paid, amount_due, payment_status,
            fulfillment_status, order_status, status_reason, customer_name,
            note, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.store_id)
    .bind(&row.order_number)
    .bind(&row.order_channel)
    .bind(&row.delivery_mode)
    .bind(&row.price_currency)
    .bind(row.price)
    .bind(row.tax_total)
    .bind(row.discount_total)
    .bind(row.shipping_cost)
    .bind(row.total_payable)
    .bind(row.amount_paid)
    .bind(row.amount_due)
    .bind(&row.payment_status)
    .bind(&row.fulfillment_status)
    .bind(&row.order_status)
    .bind(&row.status_reason)
    .bind(&row.customer_name)
    .bind(&row.note)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Find an order within a store. A row that exists under another store is
/// reported the same as a missing row.
pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    order_id: i64,
) -> RepoResult<Option<OrderRow>> {
    let row = sqlx::query_as::<_, OrderRow>(
        "SELECT * FROM orders WHERE id = ? AND store_id = ?",
    )
    .bind(order_id)
    .bind(store_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

/// List a store's orders, newest first
pub async fn list_by_store(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<OrderRow>> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT * FROM orders WHERE store_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
    )
    .bind(store_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Write the recomputed payment projection back onto the order
pub async fn update_payment_projection(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    amount_paid: f64,
    amount_due: f64,
    payment_status: &str,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        UPDATE orders
        SET amount_paid = ?, amount_due = ?, payment_status = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(amount_paid)
    .bind(amount_due)
    .bind(payment_status)
    .bind(now)
    .bind(order_id)
    .execute(ex)
    .await?;
    Ok(())
}

/// Write the recomputed fulfillment aggregate back onto the order
pub async fn update_fulfillment_projection(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    fulfillment_status: &str,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE orders SET fulfillment_status = ?, updated_at = ? WHERE id = ?",
    )
    .bind(fulfillment_status)
    .bind(now)
    .bind(order_id)
    .execute(ex)
    .await?;
    Ok(())
}

/// Count orders in a store; used for order-number generation
pub async fn count_by_store(ex: impl SqliteExecutor<'_>, store_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE store_id = ?")
        .bind(store_id)
        .fetch_one(ex)
        .await?;
    Ok(count)
}
