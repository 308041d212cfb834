//! Order lifecycle error type

use crate::db::repository::RepoError;
use crate::utils::AppError;
use thiserror::Error;

/// Errors raised by the lifecycle components.
///
/// Every variant aborts the whole operation; the transaction the component
/// opened is rolled back, so no aggregate is ever left half-updated.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order {0} not found")]
    OrderNotFound(i64),

    #[error("Store {0} not found")]
    StoreNotFound(i64),

    #[error("Fulfillment {fulfillment_id} does not belong to order {order_id}")]
    FulfillmentNotFound { order_id: i64, fulfillment_id: i64 },

    #[error("Payment {payment_id} does not belong to order {order_id}")]
    PaymentNotFound { order_id: i64, payment_id: i64 },

    #[error("Invoice {0} not found")]
    InvoiceNotFound(i64),

    #[error("Amount must be a positive finite number")]
    InvalidAmount,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A journal leg could not be posted because its account is missing
    /// from the store's chart. The whole payment event fails with it.
    #[error("Ledger account unavailable: {0}")]
    LedgerAccount(String),

    #[error(transparent)]
    Storage(#[from] RepoError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::OrderNotFound(_)
            | OrderError::StoreNotFound(_)
            | OrderError::FulfillmentNotFound { .. }
            | OrderError::PaymentNotFound { .. }
            | OrderError::InvoiceNotFound(_) => AppError::NotFound(err.to_string()),
            OrderError::InvalidAmount => AppError::Validation(err.to_string()),
            OrderError::InvalidOperation(msg) => AppError::Validation(msg),
            OrderError::LedgerAccount(msg) => AppError::BusinessRule(msg),
            OrderError::Storage(repo) => repo.into(),
        }
    }
}
