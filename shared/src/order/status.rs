//! Status vocabularies and their partial orders

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overall order lifecycle status (schema.org OrderStatus vocabulary).
///
/// The forward chain carries an explicit rank; the alternates (Cancelled,
/// Returned, Problem) are unranked and reachable only through the explicit
/// exceptional transition, never as a byproduct of aggregate recomputation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    OrderPaymentDue,
    OrderProcessing,
    OrderShipped,
    OrderPickupAvailable,
    OrderDelivered,
    OrderCancelled,
    OrderReturned,
    OrderProblem,
}

impl OrderStatus {
    /// Position in the forward chain; None for the exceptional states.
    pub fn rank(&self) -> Option<u8> {
        match self {
            OrderStatus::OrderPaymentDue => Some(0),
            OrderStatus::OrderProcessing => Some(1),
            OrderStatus::OrderShipped => Some(2),
            OrderStatus::OrderPickupAvailable => Some(3),
            OrderStatus::OrderDelivered => Some(4),
            OrderStatus::OrderCancelled
            | OrderStatus::OrderReturned
            | OrderStatus::OrderProblem => None,
        }
    }

    /// Exceptional states end (or suspend) the forward chain.
    pub fn is_exceptional(&self) -> bool {
        self.rank().is_none()
    }

    /// Whether no further forward advancement is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::OrderDelivered
                | OrderStatus::OrderCancelled
                | OrderStatus::OrderReturned
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::OrderPaymentDue => "OrderPaymentDue",
            OrderStatus::OrderProcessing => "OrderProcessing",
            OrderStatus::OrderShipped => "OrderShipped",
            OrderStatus::OrderPickupAvailable => "OrderPickupAvailable",
            OrderStatus::OrderDelivered => "OrderDelivered",
            OrderStatus::OrderCancelled => "OrderCancelled",
            OrderStatus::OrderReturned => "OrderReturned",
            OrderStatus::OrderProblem => "OrderProblem",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OrderPaymentDue" => Ok(OrderStatus::OrderPaymentDue),
            "OrderProcessing" => Ok(OrderStatus::OrderProcessing),
            "OrderShipped" => Ok(OrderStatus::OrderShipped),
            "OrderPickupAvailable" => Ok(OrderStatus::OrderPickupAvailable),
            "OrderDelivered" => Ok(OrderStatus::OrderDelivered),
            "OrderCancelled" => Ok(OrderStatus::OrderCancelled),
            "OrderReturned" => Ok(OrderStatus::OrderReturned),
            "OrderProblem" => Ok(OrderStatus::OrderProblem),
            _ => Err(StatusParseError::new("OrderStatus", s)),
        }
    }
}

/// Status of one payment attempt (schema.org PaymentStatusType).
///
/// The order-level aggregate uses the same vocabulary: PaymentAutoPay is the
/// partial-payment state the dashboard renders as "partially paid".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    PaymentDue,
    PaymentComplete,
    PaymentDeclined,
    PaymentPastDue,
    PaymentRefunded,
    PaymentAutoPay,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::PaymentDue => "PaymentDue",
            PaymentStatus::PaymentComplete => "PaymentComplete",
            PaymentStatus::PaymentDeclined => "PaymentDeclined",
            PaymentStatus::PaymentPastDue => "PaymentPastDue",
            PaymentStatus::PaymentRefunded => "PaymentRefunded",
            PaymentStatus::PaymentAutoPay => "PaymentAutoPay",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PaymentDue" => Ok(PaymentStatus::PaymentDue),
            "PaymentComplete" => Ok(PaymentStatus::PaymentComplete),
            "PaymentDeclined" => Ok(PaymentStatus::PaymentDeclined),
            "PaymentPastDue" => Ok(PaymentStatus::PaymentPastDue),
            "PaymentRefunded" => Ok(PaymentStatus::PaymentRefunded),
            "PaymentAutoPay" => Ok(PaymentStatus::PaymentAutoPay),
            _ => Err(StatusParseError::new("PaymentStatus", s)),
        }
    }
}

/// Delivery status of one parcel, and of the order-level aggregate.
///
/// Per-parcel chain: Processing → Packed → Shipped → Delivered.
/// Failed and Returned are terminal alternates reachable from any
/// non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FulfillmentStatus {
    #[default]
    Processing,
    Packed,
    Shipped,
    Delivered,
    Failed,
    Returned,
}

impl FulfillmentStatus {
    /// Position in the per-parcel forward chain; None for Failed/Returned.
    pub fn rank(&self) -> Option<u8> {
        match self {
            FulfillmentStatus::Processing => Some(0),
            FulfillmentStatus::Packed => Some(1),
            FulfillmentStatus::Shipped => Some(2),
            FulfillmentStatus::Delivered => Some(3),
            FulfillmentStatus::Failed | FulfillmentStatus::Returned => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FulfillmentStatus::Delivered
                | FulfillmentStatus::Failed
                | FulfillmentStatus::Returned
        )
    }

    /// Whether a parcel may move from `self` to `to`.
    ///
    /// Forward moves only; Failed/Returned are reachable from any
    /// non-terminal state.
    pub fn can_transition_to(&self, to: FulfillmentStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), to.rank()) {
            (Some(from), Some(target)) => target > from,
            // non-terminal → Failed/Returned
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentStatus::Processing => "Processing",
            FulfillmentStatus::Packed => "Packed",
            FulfillmentStatus::Shipped => "Shipped",
            FulfillmentStatus::Delivered => "Delivered",
            FulfillmentStatus::Failed => "Failed",
            FulfillmentStatus::Returned => "Returned",
        }
    }
}

impl fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FulfillmentStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(FulfillmentStatus::Processing),
            "Packed" => Ok(FulfillmentStatus::Packed),
            "Shipped" => Ok(FulfillmentStatus::Shipped),
            "Delivered" => Ok(FulfillmentStatus::Delivered),
            "Failed" => Ok(FulfillmentStatus::Failed),
            "Returned" => Ok(FulfillmentStatus::Returned),
            _ => Err(StatusParseError::new("FulfillmentStatus", s)),
        }
    }
}

/// How the order reaches the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    #[default]
    Delivery,
    Pickup,
    Download,
    Service,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Delivery => "Delivery",
            DeliveryMode::Pickup => "Pickup",
            DeliveryMode::Download => "Download",
            DeliveryMode::Service => "Service",
        }
    }
}

impl FromStr for DeliveryMode {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Delivery" => Ok(DeliveryMode::Delivery),
            "Pickup" => Ok(DeliveryMode::Pickup),
            "Download" => Ok(DeliveryMode::Download),
            "Service" => Ok(DeliveryMode::Service),
            _ => Err(StatusParseError::new("DeliveryMode", s)),
        }
    }
}

/// Sales channel the order arrived through
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderChannel {
    #[default]
    Online,
    #[serde(rename = "POS")]
    Pos,
    WhatsApp,
    Phone,
    Manual,
}

impl OrderChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderChannel::Online => "Online",
            OrderChannel::Pos => "POS",
            OrderChannel::WhatsApp => "WhatsApp",
            OrderChannel::Phone => "Phone",
            OrderChannel::Manual => "Manual",
        }
    }
}

impl FromStr for OrderChannel {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Online" => Ok(OrderChannel::Online),
            "POS" => Ok(OrderChannel::Pos),
            "WhatsApp" => Ok(OrderChannel::WhatsApp),
            "Phone" => Ok(OrderChannel::Phone),
            "Manual" => Ok(OrderChannel::Manual),
            _ => Err(StatusParseError::new("OrderChannel", s)),
        }
    }
}

/// A status string in storage did not match its vocabulary
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid {vocabulary} value: {value}")]
pub struct StatusParseError {
    pub vocabulary: &'static str,
    pub value: String,
}

impl StatusParseError {
    fn new(vocabulary: &'static str, value: &str) -> Self {
        Self {
            vocabulary,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_rank_is_monotonic_on_forward_chain() {
        let chain = [
            OrderStatus::OrderPaymentDue,
            OrderStatus::OrderProcessing,
            OrderStatus::OrderShipped,
            OrderStatus::OrderPickupAvailable,
            OrderStatus::OrderDelivered,
        ];
        for pair in chain.windows(2) {
            assert!(pair[0].rank().unwrap() < pair[1].rank().unwrap());
        }
    }

    #[test]
    fn test_exceptional_states_have_no_rank() {
        assert!(OrderStatus::OrderCancelled.rank().is_none());
        assert!(OrderStatus::OrderReturned.rank().is_none());
        assert!(OrderStatus::OrderProblem.rank().is_none());
        assert!(OrderStatus::OrderProblem.is_exceptional());
    }

    #[test]
    fn test_fulfillment_forward_transitions() {
        use FulfillmentStatus::*;
        assert!(Processing.can_transition_to(Packed));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Packed.can_transition_to(Delivered));
        assert!(!Shipped.can_transition_to(Packed));
        assert!(!Delivered.can_transition_to(Shipped));
    }

    #[test]
    fn test_fulfillment_terminal_alternates() {
        use FulfillmentStatus::*;
        assert!(Processing.can_transition_to(Failed));
        assert!(Shipped.can_transition_to(Returned));
        assert!(!Failed.can_transition_to(Shipped));
        assert!(!Returned.can_transition_to(Delivered));
    }

    #[test]
    fn test_round_trip_storage_strings() {
        for s in [
            OrderStatus::OrderPaymentDue,
            OrderStatus::OrderPickupAvailable,
            OrderStatus::OrderProblem,
        ] {
            assert_eq!(s.as_str().parse::<OrderStatus>().unwrap(), s);
        }
        assert_eq!(
            "PaymentAutoPay".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::PaymentAutoPay
        );
        assert!("NotAStatus".parse::<OrderStatus>().is_err());
    }
}
