//! Ledger poster
//!
//! Appends one immutable journal row per call. The poster validates the
//! amount and the account's tenant, nothing more: it does not balance
//! debits against credits. Posting matching legs is the caller's contract,
//! checked by the callers' tests.

use crate::db::models::EntryRow;
use crate::db::repository::{account, ledger};
use crate::orders::error::OrderError;
use shared::finance::{EntryDirection, ReferenceType};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqliteConnection;

/// Metadata attached to every leg of one business event
#[derive(Debug, Clone)]
pub struct PostingMeta {
    pub category: String,
    pub reference_id: Option<i64>,
    pub reference_type: ReferenceType,
    /// Propagated for per-channel reporting
    pub payment_method: Option<String>,
    pub entry_date: i64,
}

impl PostingMeta {
    /// Metadata for legs produced by an order payment event
    pub fn for_order_payment(order_id: i64, method: &str, entry_date: i64) -> Self {
        Self {
            category: "Sales".to_string(),
            reference_id: Some(order_id),
            reference_type: ReferenceType::Order,
            payment_method: Some(method.to_string()),
            entry_date,
        }
    }
}

/// Append one journal leg and return its entry id.
///
/// The amount is an absolute value; the sign is carried by `direction`.
/// Fails outright when the amount is not strictly positive or the account
/// does not exist in the store; fallback policy belongs to the caller.
pub async fn post(
    conn: &mut SqliteConnection,
    store_id: i64,
    account_id: i64,
    direction: EntryDirection,
    amount: f64,
    description: &str,
    meta: &PostingMeta,
) -> Result<i64, OrderError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(OrderError::InvalidAmount);
    }

    account::find_by_id(&mut *conn, store_id, account_id)
        .await?
        .ok_or_else(|| {
            OrderError::LedgerAccount(format!(
                "account {} does not exist in store {}",
                account_id, store_id
            ))
        })?;

    let row = EntryRow {
        id: snowflake_id(),
        store_id,
        account_id,
        direction: direction.as_str().to_string(),
        amount,
        category: meta.category.clone(),
        description: description.to_string(),
        reference_id: meta.reference_id,
        reference_type: meta.reference_type.as_str().to_string(),
        payment_method: meta.payment_method.clone(),
        entry_date: meta.entry_date,
        created_at: now_millis(),
    };
    ledger::insert(&mut *conn, &row).await?;

    tracing::debug!(
        entry_id = row.id,
        account_id,
        direction = direction.as_str(),
        amount,
        "Journal leg posted"
    );
    Ok(row.id)
}
