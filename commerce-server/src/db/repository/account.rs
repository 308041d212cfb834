//! Chart-of-accounts rows

use super::RepoResult;
use crate::db::models::AccountRow;
use shared::finance::AccountKind;
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqliteExecutor};

/// Default chart seeded for every new store. COA codes follow the
/// storefront convention: 1xxx assets, 1200 AR, 4000 sales revenue.
pub const DEFAULT_ACCOUNTS: &[(&str, &str, AccountKind)] = &[
    ("1000", "Cash on Hand", AccountKind::Asset),
    ("1010", "Card Settlement", AccountKind::Asset),
    ("1020", "Bank Transfer", AccountKind::Asset),
    ("1030", "Mobile Money", AccountKind::Asset),
    ("1200", "Accounts Receivable", AccountKind::Asset),
    ("4000", "Sales Revenue", AccountKind::Revenue),
];

pub async fn insert(ex: impl SqliteExecutor<'_>, row: &AccountRow) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO finance_accounts (id, store_id, code, name, account_kind, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.store_id)
    .bind(&row.code)
    .bind(&row.name)
    .bind(&row.account_kind)
    .bind(row.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Look up an account by its COA code within a store
pub async fn find_by_code(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    code: &str,
) -> RepoResult<Option<AccountRow>> {
    let row = sqlx::query_as::<_, AccountRow>(
        "SELECT * FROM finance_accounts WHERE store_id = ? AND code = ?",
    )
    .bind(store_id)
    .bind(code)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    account_id: i64,
) -> RepoResult<Option<AccountRow>> {
    let row = sqlx::query_as::<_, AccountRow>(
        "SELECT * FROM finance_accounts WHERE id = ? AND store_id = ?",
    )
    .bind(account_id)
    .bind(store_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

pub async fn list_by_store(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
) -> RepoResult<Vec<AccountRow>> {
    let rows = sqlx::query_as::<_, AccountRow>(
        "SELECT * FROM finance_accounts WHERE store_id = ? ORDER BY code ASC",
    )
    .bind(store_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Seed the default chart of accounts for a freshly created store
pub async fn seed_defaults(conn: &mut SqliteConnection, store_id: i64) -> RepoResult<()> {
    let now = now_millis();
    for (code, name, kind) in DEFAULT_ACCOUNTS {
        let row = AccountRow {
            id: snowflake_id(),
            store_id,
            code: (*code).to_string(),
            name: (*name).to_string(),
            account_kind: kind.as_str().to_string(),
            created_at: now,
        };
        insert(&mut *conn, &row).await?;
    }
    Ok(())
}
