//! Row models for the SQLite tables
//!
//! Status columns are stored as their vocabulary strings and exposed as
//! strings on the rows; the lifecycle components parse them through the
//! `shared` enums when they need the partial orders.

mod finance;
mod fulfillment;
mod order;
mod payment;
mod store;

pub use finance::{AccountRow, EntryRow, InvoiceRow, PaymentMethodRow};
pub use fulfillment::FulfillmentRow;
pub use order::OrderRow;
pub use payment::PaymentRow;
pub use store::StoreRow;
