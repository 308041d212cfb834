//! Journal entry rows
//!
//! Insert and read only. No update or delete function exists for
//! `finance_entries`, and none may be added: the journal is append-only.

use super::RepoResult;
use crate::db::models::EntryRow;
use sqlx::SqliteExecutor;

pub async fn insert(ex: impl SqliteExecutor<'_>, row: &EntryRow) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO finance_entries (
            id, store_id, account_id, direction, amount, category,
            description, reference_id, reference_type, payment_method,
            entry_date, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.store_id)
    .bind(row.account_id)
    .bind(&row.direction)
    .bind(row.amount)
    .bind(&row.category)
    .bind(&row.description)
    .bind(row.reference_id)
    .bind(&row.reference_type)
    .bind(&row.payment_method)
    .bind(row.entry_date)
    .bind(row.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// A store's journal, newest first (reporting view)
pub async fn list_by_store(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<EntryRow>> {
    let rows = sqlx::query_as::<_, EntryRow>(
        r#"
        SELECT * FROM finance_entries
        WHERE store_id = ?
        ORDER BY entry_date DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(store_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Journal rows attached to one order (audit view)
pub async fn list_by_reference(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    reference_type: &str,
    reference_id: i64,
) -> RepoResult<Vec<EntryRow>> {
    let rows = sqlx::query_as::<_, EntryRow>(
        r#"
        SELECT * FROM finance_entries
        WHERE store_id = ? AND reference_type = ? AND reference_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(store_id)
    .bind(reference_type)
    .bind(reference_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}
