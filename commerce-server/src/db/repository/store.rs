//! Store rows (tenant roots)

use super::RepoResult;
use crate::db::models::StoreRow;
use sqlx::SqliteExecutor;

pub async fn insert(ex: impl SqliteExecutor<'_>, row: &StoreRow) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO stores (id, name, owner_id, price_currency, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(&row.owner_id)
    .bind(&row.price_currency)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
) -> RepoResult<Option<StoreRow>> {
    let row = sqlx::query_as::<_, StoreRow>("SELECT * FROM stores WHERE id = ?")
        .bind(store_id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}
