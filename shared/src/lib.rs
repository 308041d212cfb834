//! Shared domain vocabulary for the commerce platform
//!
//! Types that both the server and its clients agree on:
//!
//! - **order** (`order`): status vocabularies, their partial orders, and
//!   the input/outcome types of the order lifecycle operations
//! - **finance** (`finance`): ledger and invoice vocabulary
//! - **util** (`util`): ID generation and time helpers

pub mod finance;
pub mod order;
pub mod util;

// Re-export the vocabulary most callers want
pub use finance::{AccountKind, EntryDirection, InvoiceStatus, ReferenceType};
pub use order::{DeliveryMode, FulfillmentStatus, OrderChannel, OrderStatus, PaymentStatus};
