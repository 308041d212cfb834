//! Per-store payment method configuration

use super::RepoResult;
use crate::db::models::PaymentMethodRow;
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqliteExecutor};

/// Default method → COA code mapping seeded for every new store
pub const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    ("Cash", "1000"),
    ("Card", "1010"),
    ("CreditCard", "1010"),
    ("BankTransfer", "1020"),
    ("MobileMoney", "1030"),
];

/// Resolve the COA code configured for a payment method or gateway.
///
/// Matches the method name first, then the gateway name, both
/// case-insensitive, matching how the dashboard stores the mapping.
pub async fn find_coa_code(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    method: &str,
    gateway: Option<&str>,
) -> RepoResult<Option<String>> {
    let code: Option<String> = sqlx::query_scalar(
        r#"
        SELECT coa_code FROM store_payment_methods
        WHERE store_id = ?
          AND (LOWER(method) = LOWER(?)
               OR (gateway IS NOT NULL AND LOWER(gateway) = LOWER(?)))
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .bind(store_id)
    .bind(method)
    .bind(gateway.unwrap_or(""))
    .fetch_optional(ex)
    .await?;
    Ok(code)
}

pub async fn insert(ex: impl SqliteExecutor<'_>, row: &PaymentMethodRow) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO store_payment_methods (id, store_id, method, gateway, coa_code, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.store_id)
    .bind(&row.method)
    .bind(&row.gateway)
    .bind(&row.coa_code)
    .bind(row.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Seed the default method mappings for a freshly created store
pub async fn seed_defaults(conn: &mut SqliteConnection, store_id: i64) -> RepoResult<()> {
    let now = now_millis();
    for (method, code) in DEFAULT_MAPPINGS {
        let row = PaymentMethodRow {
            id: snowflake_id(),
            store_id,
            method: (*method).to_string(),
            gateway: None,
            coa_code: (*code).to_string(),
            created_at: now,
        };
        insert(&mut *conn, &row).await?;
    }
    Ok(())
}

pub async fn list_by_store(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
) -> RepoResult<Vec<PaymentMethodRow>> {
    let rows = sqlx::query_as::<_, PaymentMethodRow>(
        "SELECT * FROM store_payment_methods WHERE store_id = ? ORDER BY id ASC",
    )
    .bind(store_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}
