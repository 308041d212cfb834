//! Fulfillment tracker
//!
//! Records parcels against an order (several partial shipments may cover
//! one order) and recomputes the order-level fulfillment aggregate from
//! the full parcel set on every change. The aggregate then pushes the
//! order's overall status forward through the coordinator; it never pulls
//! it back.

use crate::db::models::FulfillmentRow;
use crate::db::repository::{RepoError, fulfillment, order};
use crate::orders::error::OrderError;
use crate::orders::locks::OrderLocks;
use crate::orders::status;
use shared::order::{
    DeliveryMode, FulfillmentInput, FulfillmentOutcome, FulfillmentStatus, OrderStatus,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;

pub struct FulfillmentTracker {
    db: SqlitePool,
    locks: Arc<OrderLocks>,
}

impl FulfillmentTracker {
    pub fn new(db: SqlitePool, locks: Arc<OrderLocks>) -> Self {
        Self { db, locks }
    }

    /// Create one parcel covering a subset of the order's items.
    ///
    /// New parcels start at Processing; a tracking number alone is enough
    /// to count the order as Shipped at the aggregate level.
    pub async fn create_fulfillment(
        &self,
        store_id: i64,
        order_id: i64,
        input: FulfillmentInput,
    ) -> Result<FulfillmentOutcome, OrderError> {
        let _guard = self.locks.acquire(order_id).await;
        let mut tx = self.db.begin().await.map_err(RepoError::from)?;

        // Retried request with a known idempotency key: hand back the stored
        // outcome, apply nothing.
        if let Some(key) = input.idempotency_key.as_deref()
            && let Some(existing) =
                fulfillment::find_by_idempotency_key(&mut *tx, store_id, key).await?
        {
            let order_row = order::find_by_id(&mut *tx, store_id, existing.order_id)
                .await?
                .ok_or(OrderError::OrderNotFound(existing.order_id))?;
            tracing::info!(
                fulfillment_id = existing.id,
                idempotency_key = key,
                "Replaying recorded fulfillment outcome"
            );
            return Ok(FulfillmentOutcome {
                fulfillment_id: existing.id,
                fulfillment_status: order_row.fulfillment_status(),
            });
        }

        let order_row = order::find_by_id(&mut *tx, store_id, order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let now = now_millis();
        let row = FulfillmentRow {
            id: snowflake_id(),
            order_id,
            store_id,
            carrier: input.carrier.clone(),
            tracking_number: input.tracking_number.clone(),
            tracking_url: input.tracking_url.clone(),
            delivery_mode: input.delivery_mode.as_str().to_string(),
            delivery_status: FulfillmentStatus::Processing.as_str().to_string(),
            item_indexes: sqlx::types::Json(input.item_indexes.clone()),
            expected_arrival_from: input.expected_arrival_from,
            expected_arrival_until: input.expected_arrival_until,
            shipped_at: None,
            delivered_at: None,
            note: input.note.clone(),
            idempotency_key: input.idempotency_key.clone(),
            created_at: now,
            updated_at: now,
        };
        fulfillment::insert(&mut *tx, &row).await?;

        let aggregate =
            recompute_fulfillment_aggregate(&mut *tx, store_id, order_id, now).await?;
        push_order_status(&mut *tx, &order_row, aggregate, now).await?;

        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            order_id,
            fulfillment_id = row.id,
            tracking = row.tracking_number.as_deref().unwrap_or(""),
            aggregate = aggregate.as_str(),
            "Fulfillment created"
        );

        Ok(FulfillmentOutcome {
            fulfillment_id: row.id,
            fulfillment_status: aggregate,
        })
    }

    /// Move one parcel along its chain (Packed → Shipped → Delivered, or
    /// out to Failed/Returned) and recompute the order aggregate.
    ///
    /// A fulfillment id belonging to a different order is rejected, not
    /// silently ignored.
    pub async fn update_fulfillment_status(
        &self,
        store_id: i64,
        order_id: i64,
        fulfillment_id: i64,
        new_status: FulfillmentStatus,
    ) -> Result<FulfillmentOutcome, OrderError> {
        let _guard = self.locks.acquire(order_id).await;
        let mut tx = self.db.begin().await.map_err(RepoError::from)?;

        let order_row = order::find_by_id(&mut *tx, store_id, order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let parcel = fulfillment::find_by_id_for_order(&mut *tx, order_id, fulfillment_id)
            .await?
            .ok_or(OrderError::FulfillmentNotFound {
                order_id,
                fulfillment_id,
            })?;

        let current = parcel.delivery_status();
        if !current.can_transition_to(new_status) {
            return Err(OrderError::InvalidOperation(format!(
                "Fulfillment {} cannot move from {} to {}",
                fulfillment_id, current, new_status
            )));
        }

        let now = now_millis();
        let shipped_at = (new_status == FulfillmentStatus::Shipped).then_some(now);
        let delivered_at = (new_status == FulfillmentStatus::Delivered).then_some(now);
        fulfillment::update_status(
            &mut *tx,
            fulfillment_id,
            new_status.as_str(),
            shipped_at,
            delivered_at,
            now,
        )
        .await?;

        let aggregate =
            recompute_fulfillment_aggregate(&mut *tx, store_id, order_id, now).await?;
        push_order_status(&mut *tx, &order_row, aggregate, now).await?;

        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            order_id,
            fulfillment_id,
            status = new_status.as_str(),
            aggregate = aggregate.as_str(),
            "Fulfillment status updated"
        );

        Ok(FulfillmentOutcome {
            fulfillment_id,
            fulfillment_status: aggregate,
        })
    }
}

/// Derive the order-level aggregate from the full parcel set.
///
/// - every parcel Delivered → Delivered
/// - else any parcel Shipped/Delivered, or carrying a tracking number → Shipped
/// - else any parcel Packed → Packed
/// - else → Processing
///
/// One delivered parcel among laggards reports Shipped, not Delivered:
/// partial delivery is never presented as complete.
pub fn derive_aggregate(parcels: &[FulfillmentRow]) -> FulfillmentStatus {
    if parcels.is_empty() {
        return FulfillmentStatus::Processing;
    }
    if parcels
        .iter()
        .all(|p| p.delivery_status() == FulfillmentStatus::Delivered)
    {
        return FulfillmentStatus::Delivered;
    }
    if parcels.iter().any(|p| {
        matches!(
            p.delivery_status(),
            FulfillmentStatus::Shipped | FulfillmentStatus::Delivered
        ) || p.has_tracking()
    }) {
        return FulfillmentStatus::Shipped;
    }
    if parcels
        .iter()
        .any(|p| p.delivery_status() == FulfillmentStatus::Packed)
    {
        return FulfillmentStatus::Packed;
    }
    FulfillmentStatus::Processing
}

/// Reload the parcel set, derive the aggregate, and write it onto the order
async fn recompute_fulfillment_aggregate(
    conn: &mut SqliteConnection,
    store_id: i64,
    order_id: i64,
    now: i64,
) -> Result<FulfillmentStatus, OrderError> {
    let parcels = fulfillment::list_by_order_asc(&mut *conn, store_id, order_id).await?;
    let aggregate = derive_aggregate(&parcels);
    order::update_fulfillment_projection(&mut *conn, order_id, aggregate.as_str(), now).await?;
    Ok(aggregate)
}

/// Mirror the aggregate onto the order's overall status, forward only.
/// Packed/Processing push nothing; an untracked parcel leaves the order
/// status wherever it was.
async fn push_order_status(
    conn: &mut SqliteConnection,
    order_row: &crate::db::models::OrderRow,
    aggregate: FulfillmentStatus,
    now: i64,
) -> Result<(), OrderError> {
    let target = match aggregate {
        FulfillmentStatus::Delivered => Some(OrderStatus::OrderDelivered),
        FulfillmentStatus::Shipped => {
            // Pickup orders become ready for collection when everything is
            // packed up and tracked; nothing is in transit to the customer.
            if order_row.delivery_mode == DeliveryMode::Pickup.as_str() {
                Some(OrderStatus::OrderPickupAvailable)
            } else {
                Some(OrderStatus::OrderShipped)
            }
        }
        _ => None,
    };
    if let Some(target) = target {
        status::advance_order(
            &mut *conn,
            order_row.id,
            order_row.order_status(),
            target,
            now,
        )
        .await?;
    }
    Ok(())
}
