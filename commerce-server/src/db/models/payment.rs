//! Payment row: one attempted money movement

use serde::{Deserialize, Serialize};
use shared::order::PaymentStatus;
use sqlx::FromRow;

/// One row of `order_payments`.
///
/// Immutable once created except for status corrections; a refund is a new
/// row referencing the original through `refund_of`, never a mutation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    pub id: i64,
    pub order_id: i64,
    pub store_id: i64,
    pub amount: f64,
    pub price_currency: String,
    pub payment_method: String,
    pub payment_gateway: String,
    pub payment_ref: Option<String>,
    pub payment_status: String,
    pub invoice_id: Option<i64>,
    pub refund_of: Option<i64>,
    pub note: Option<String>,
    pub idempotency_key: Option<String>,
    pub processed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PaymentRow {
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status.parse().unwrap_or_default()
    }
}
