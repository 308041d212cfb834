//! Invoice status projector
//!
//! A pure projection: reads the PaymentComplete payments referencing an
//! invoice, compares the sum against the invoice's own total due, and maps
//! the result into the invoice display vocabulary. Only the invoice row is
//! ever written; payments and orders are untouched.

use crate::db::repository::{invoice, payment};
use crate::orders::error::OrderError;
use crate::orders::money::{MONEY_TOLERANCE, sum_amounts, to_decimal};
use shared::finance::InvoiceStatus;
use sqlx::SqliteConnection;

/// Recompute and persist one invoice's display status; returns the status
/// the invoice carries afterwards.
pub async fn project_invoice_status(
    conn: &mut SqliteConnection,
    store_id: i64,
    invoice_id: i64,
    now: i64,
) -> Result<InvoiceStatus, OrderError> {
    let inv = invoice::find_by_id(&mut *conn, store_id, invoice_id)
        .await?
        .ok_or(OrderError::InvoiceNotFound(invoice_id))?;

    let payments = payment::list_complete_by_invoice(&mut *conn, invoice_id).await?;
    let paid = sum_amounts(payments.iter().map(|p| p.amount));
    let due = to_decimal(inv.total_payment_due);

    let status = if paid >= due - MONEY_TOLERANCE {
        InvoiceStatus::Paid
    } else if payments.is_empty() && inv.invoice_status() == InvoiceStatus::Draft {
        InvoiceStatus::Draft
    } else {
        let overdue = inv.payment_due_date.is_some_and(|d| d < now);
        if overdue {
            InvoiceStatus::Overdue
        } else {
            InvoiceStatus::Sent
        }
    };

    if status != inv.invoice_status() {
        invoice::update_status(&mut *conn, invoice_id, status.as_str(), now).await?;
        tracing::info!(
            invoice_id,
            from = %inv.invoice_status(),
            to = %status,
            "Invoice status projected"
        );
    }
    Ok(status)
}
