//! Invoice rows
//!
//! After creation only `invoice_status` moves, and only the projector
//! (`orders::projection`) moves it.

use super::RepoResult;
use crate::db::models::InvoiceRow;
use sqlx::SqliteExecutor;

pub async fn insert(ex: impl SqliteExecutor<'_>, row: &InvoiceRow) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO finance_invoices (
            id, store_id, order_id, invoice_number, invoice_status,
            total_payment_due, price_currency, payment_due_date, description,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.store_id)
    .bind(row.order_id)
    .bind(&row.invoice_number)
    .bind(&row.invoice_status)
    .bind(row.total_payment_due)
    .bind(&row.price_currency)
    .bind(row.payment_due_date)
    .bind(&row.description)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    invoice_id: i64,
) -> RepoResult<Option<InvoiceRow>> {
    let row = sqlx::query_as::<_, InvoiceRow>(
        "SELECT * FROM finance_invoices WHERE id = ? AND store_id = ?",
    )
    .bind(invoice_id)
    .bind(store_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

/// Invoices of an order, chronological
pub async fn list_by_order_asc(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    order_id: i64,
) -> RepoResult<Vec<InvoiceRow>> {
    let rows = sqlx::query_as::<_, InvoiceRow>(
        r#"
        SELECT * FROM finance_invoices
        WHERE order_id = ? AND store_id = ?
        ORDER BY created_at ASC
        "#,
    )
    .bind(order_id)
    .bind(store_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Count invoices of an order; used for invoice-number generation
pub async fn count_by_order(ex: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM finance_invoices WHERE order_id = ?")
            .bind(order_id)
            .fetch_one(ex)
            .await?;
    Ok(count)
}

/// Move an invoice to a new display status
pub async fn update_status(
    ex: impl SqliteExecutor<'_>,
    invoice_id: i64,
    invoice_status: &str,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE finance_invoices SET invoice_status = ?, updated_at = ? WHERE id = ?")
        .bind(invoice_status)
        .bind(now)
        .bind(invoice_id)
        .execute(ex)
        .await?;
    Ok(())
}
