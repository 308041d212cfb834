//! Order domain vocabulary
//!
//! Status enums follow the schema.org Order vocabulary the storefront and
//! admin dashboard already speak, so rows serialize to the exact strings the
//! UI filters on ("OrderPaymentDue", "PaymentAutoPay", ...).

mod status;
mod types;

pub use status::{
    DeliveryMode, FulfillmentStatus, OrderChannel, OrderStatus, PaymentStatus, StatusParseError,
};
pub use types::{
    ExceptionalStatusInput, FulfillmentInput, FulfillmentOutcome, FulfillmentStatusUpdate,
    InvoiceInput, OrderInput, PaymentInput, PaymentOutcome,
};
