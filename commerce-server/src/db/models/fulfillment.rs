//! Fulfillment row: one parcel within an order

use serde::{Deserialize, Serialize};
use shared::order::FulfillmentStatus;
use sqlx::FromRow;
use sqlx::types::Json;

/// One row of `order_fulfillments`.
///
/// No single row represents "the" shipment state of an order; the order's
/// aggregate is always recomputed from the full set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentRow {
    pub id: i64,
    pub order_id: i64,
    pub store_id: i64,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub tracking_url: Option<String>,
    pub delivery_mode: String,
    pub delivery_status: String,
    /// Which orderedItem indexes this parcel covers, stored as JSON
    pub item_indexes: Json<Vec<u32>>,
    pub expected_arrival_from: Option<i64>,
    pub expected_arrival_until: Option<i64>,
    pub shipped_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub note: Option<String>,
    pub idempotency_key: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl FulfillmentRow {
    pub fn delivery_status(&self) -> FulfillmentStatus {
        self.delivery_status.parse().unwrap_or_default()
    }

    pub fn has_tracking(&self) -> bool {
        self.tracking_number
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }
}
