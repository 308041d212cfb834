//! Order status coordinator
//!
//! The single owner of `orders.order_status`. The two UPDATE statements in
//! this module are the only places in the crate that touch that column.
//!
//! Advancement is monotonic over [`OrderStatus::rank`]: payment and
//! fulfillment events can only push the status forward. A refund or a
//! corrected shipment recompute never moves it back; regression happens
//! solely through [`apply_exceptional`], which callers must invoke as a
//! deliberate, separately authorized action.

use crate::db::repository::RepoResult;
use crate::orders::error::OrderError;
use shared::order::OrderStatus;
use sqlx::SqliteExecutor;

/// Pure advancement rule: returns the status the order should carry after
/// an event proposes `target`.
///
/// - an exceptional current status is frozen (only `apply_exceptional`
///   placed it there, only external action may move it again)
/// - a target at or below the current rank is ignored
pub fn advance(current: OrderStatus, target: OrderStatus) -> OrderStatus {
    if current.is_exceptional() {
        return current;
    }
    match (current.rank(), target.rank()) {
        (Some(cur), Some(tgt)) if tgt > cur => target,
        _ => current,
    }
}

/// Advance an order's status as a consequence of a payment or fulfillment
/// event. Writes only when the rule actually moves the status forward, and
/// returns the status the order carries afterwards.
pub async fn advance_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    current: OrderStatus,
    target: OrderStatus,
    now: i64,
) -> RepoResult<OrderStatus> {
    let next = advance(current, target);
    if next != current {
        sqlx::query("UPDATE orders SET order_status = ?, updated_at = ? WHERE id = ?")
            .bind(next.as_str())
            .bind(now)
            .bind(order_id)
            .execute(ex)
            .await?;
        tracing::info!(
            order_id,
            from = current.as_str(),
            to = next.as_str(),
            "Order status advanced"
        );
    }
    Ok(next)
}

/// The explicit regression path: cancel, return, or flag a problem.
///
/// Rejected when the order is already in an exceptional state; allowed from
/// every forward-chain state including OrderDelivered (a delivered order can
/// still be returned).
pub async fn apply_exceptional(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    current: OrderStatus,
    target: OrderStatus,
    reason: Option<&str>,
    now: i64,
) -> Result<OrderStatus, OrderError> {
    if !target.is_exceptional() {
        return Err(OrderError::InvalidOperation(format!(
            "{} is not a cancel/return/problem status",
            target
        )));
    }
    if current.is_exceptional() {
        return Err(OrderError::InvalidOperation(format!(
            "Order is already {}",
            current
        )));
    }

    sqlx::query(
        "UPDATE orders SET order_status = ?, status_reason = ?, updated_at = ? WHERE id = ?",
    )
    .bind(target.as_str())
    .bind(reason)
    .bind(now)
    .bind(order_id)
    .execute(ex)
    .await
    .map_err(crate::db::repository::RepoError::from)?;

    tracing::info!(
        order_id,
        from = current.as_str(),
        to = target.as_str(),
        reason = reason.unwrap_or(""),
        "Order moved to exceptional status"
    );
    Ok(target)
}
