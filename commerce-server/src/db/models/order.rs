//! Order row: the root aggregate

use serde::{Deserialize, Serialize};
use shared::order::{FulfillmentStatus, OrderStatus, PaymentStatus};
use sqlx::FromRow;

/// One row of `orders`.
///
/// `amount_paid`, `amount_due`, `payment_status`, `fulfillment_status`, and
/// `order_status` are projections: recomputed by the lifecycle components
/// from the payment/fulfillment history, never written by any other code
/// path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: i64,
    pub store_id: i64,
    pub order_number: String,
    pub order_channel: String,
    pub delivery_mode: String,
    pub price_currency: String,
    /// Subtotal before tax/discount
    pub price: f64,
    pub tax_total: f64,
    pub discount_total: f64,
    pub shipping_cost: f64,
    pub total_payable: f64,
    pub amount_paid: f64,
    pub amount_due: f64,
    pub payment_status: String,
    pub fulfillment_status: String,
    pub order_status: String,
    pub status_reason: Option<String>,
    pub customer_name: Option<String>,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl OrderRow {
    pub fn order_status(&self) -> OrderStatus {
        self.order_status.parse().unwrap_or_default()
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status.parse().unwrap_or_default()
    }

    pub fn fulfillment_status(&self) -> FulfillmentStatus {
        self.fulfillment_status.parse().unwrap_or_default()
    }
}
