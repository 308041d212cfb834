//! Fulfillment rows

use super::RepoResult;
use crate::db::models::FulfillmentRow;
use sqlx::SqliteExecutor;

pub async fn insert(ex: impl SqliteExecutor<'_>, row: &FulfillmentRow) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO order_fulfillments (
            id, order_id, store_id, carrier, tracking_number, tracking_url,
            delivery_mode, delivery_status, item_indexes,
            expected_arrival_from, expected_arrival_until, shipped_at,
            delivered_at, note, idempotency_key, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.id)
    .bind(row.order_id)
    .bind(row.store_id)
    .bind(&row.carrier)
    .bind(&row.tracking_number)
    .bind(&row.tracking_url)
    .bind(&row.delivery_mode)
    .bind(&row.delivery_status)
    .bind(&row.item_indexes)
    .bind(row.expected_arrival_from)
    .bind(row.expected_arrival_until)
    .bind(row.shipped_at)
    .bind(row.delivered_at)
    .bind(&row.note)
    .bind(&row.idempotency_key)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Full shipment history of an order, chronological (display order)
pub async fn list_by_order_asc(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    order_id: i64,
) -> RepoResult<Vec<FulfillmentRow>> {
    let rows = sqlx::query_as::<_, FulfillmentRow>(
        r#"
        SELECT * FROM order_fulfillments
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

/// Fetch one parcel, scoped to its order. A fulfillment ID that belongs to
/// a different order comes back as None, so callers reject it instead of
/// silently updating a stranger's parcel.
pub async fn find_by_id_for_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    fulfillment_id: i64,
) -> RepoResult<Option<FulfillmentRow>> {
    let row = sqlx::query_as::<_, FulfillmentRow>(
        "SELECT * FROM order_fulfillments WHERE id = ? AND order_id = ?",
    )
    .bind(fulfillment_id)
    .bind(order_id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

/// Move one parcel to a new delivery status, stamping shipped/delivered
/// times when the caller provides them
pub async fn update_status(
    ex: impl SqliteExecutor<'_>,
    fulfillment_id: i64,
    delivery_status: &str,
    shipped_at: Option<i64>,
    delivered_at: Option<i64>,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        UPDATE order_fulfillments
        SET delivery_status = ?,
            shipped_at = COALESCE(?, shipped_at),
            delivered_at = COALESCE(?, delivered_at),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(delivery_status)
    .bind(shipped_at)
    .bind(delivered_at)
    .bind(now)
    .bind(fulfillment_id)
    .execute(ex)
    .await?;
    Ok(())
}

/// Look up a previously created fulfillment by its idempotency key
pub async fn find_by_idempotency_key(
    ex: impl SqliteExecutor<'_>,
    store_id: i64,
    key: &str,
) -> RepoResult<Option<FulfillmentRow>> {
    let row = sqlx::query_as::<_, FulfillmentRow>(
        "SELECT * FROM order_fulfillments WHERE store_id = ? AND idempotency_key = ?",
    )
    .bind(store_id)
    .bind(key)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}
