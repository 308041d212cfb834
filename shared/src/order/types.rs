//! Input and outcome types for the order lifecycle operations
//!
//! Wire format is camelCase to match what the storefront and dashboard
//! already send.

use super::{DeliveryMode, FulfillmentStatus, OrderChannel, OrderStatus, PaymentStatus};
use serde::{Deserialize, Serialize};

/// Payment input for recording a payment against an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    /// Amount in the order currency; must be finite and strictly positive
    pub amount: f64,
    /// "Cash", "Card", "BankTransfer", "MobileMoney", "Crypto", ...
    /// Unknown methods are accepted and routed to the default asset account.
    pub payment_method: String,
    /// Defaults to the order currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<String>,
    /// "Stripe", "Paystack", "Manual", ... Defaults to "Manual".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_gateway: Option<String>,
    /// Gateway transaction ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_ref: Option<String>,
    /// Which invoice this payment covers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
    /// Original payment when this record is a refund
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_of: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Caller-supplied dedup token; a retried request with the same key
    /// returns the stored outcome instead of a duplicate record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Result of recording a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub payment_id: i64,
    pub amount_paid: f64,
    pub amount_due: f64,
    pub payment_status: PaymentStatus,
}

/// Fulfillment input for creating one parcel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub delivery_mode: DeliveryMode,
    /// Which orderedItem indexes this parcel covers
    #[serde(default)]
    pub item_indexes: Vec<u32>,
    /// Expected arrival window (Unix millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_arrival_from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_arrival_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Result of creating or updating a fulfillment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOutcome {
    pub fulfillment_id: i64,
    /// The recomputed order-level aggregate
    pub fulfillment_status: FulfillmentStatus,
}

/// Request to move one parcel to a new delivery status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentStatusUpdate {
    pub fulfillment_id: i64,
    pub delivery_status: FulfillmentStatus,
}

/// Invoice input (split invoices, deposits, advance invoices)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceInput {
    pub total_payment_due: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<String>,
    /// Unix millis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_due_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Thin order-creation input.
///
/// Totals arrive already resolved (pricing, tax, and shipping are upstream
/// concerns); this surface only seeds the aggregate the lifecycle components
/// then own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(default)]
    pub order_channel: OrderChannel,
    #[serde(default)]
    pub delivery_mode: DeliveryMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<String>,
    /// Subtotal before tax/discount
    pub price: f64,
    #[serde(default)]
    pub tax_total: f64,
    #[serde(default)]
    pub discount_total: f64,
    #[serde(default)]
    pub shipping_cost: f64,
    /// Final amount due
    pub total_payable: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The explicit, separately authorized regression path: cancel, return, or
/// flag a problem. Never triggered by aggregate recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionalStatusInput {
    /// Must be OrderCancelled, OrderReturned, or OrderProblem
    pub order_status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
