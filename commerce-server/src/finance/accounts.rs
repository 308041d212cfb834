//! Chart-of-accounts resolution for payment events

use crate::db::models::AccountRow;
use crate::db::repository::{account, payment_method};
use crate::orders::error::OrderError;
use sqlx::SqliteConnection;

/// Generic cash account, the fallback when no mapping is configured
pub const CASH_CODE: &str = "1000";
/// Accounts Receivable
pub const ACCOUNTS_RECEIVABLE_CODE: &str = "1200";
/// Sales Revenue
pub const SALES_REVENUE_CODE: &str = "4000";

/// Resolve the asset account for a payment method.
///
/// The COA code comes from the store's payment-method configuration
/// (matched on method or gateway name); with no mapping the generic cash
/// account is used. A code whose account is missing from the chart fails
/// the event.
pub async fn resolve_asset_account(
    conn: &mut SqliteConnection,
    store_id: i64,
    method: &str,
    gateway: Option<&str>,
) -> Result<AccountRow, OrderError> {
    let code = match payment_method::find_coa_code(&mut *conn, store_id, method, gateway).await? {
        Some(code) => code,
        None => {
            tracing::warn!(
                store_id,
                method,
                "No payment-method mapping configured, falling back to cash account"
            );
            CASH_CODE.to_string()
        }
    };
    require_account(conn, store_id, &code).await
}

/// Look up an account by code, failing the event when it is absent
pub async fn require_account(
    conn: &mut SqliteConnection,
    store_id: i64,
    code: &str,
) -> Result<AccountRow, OrderError> {
    account::find_by_code(&mut *conn, store_id, code)
        .await?
        .ok_or_else(|| {
            OrderError::LedgerAccount(format!(
                "COA account {} is not configured for store {}",
                code, store_id
            ))
        })
}
