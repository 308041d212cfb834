//! Accounting: chart-of-accounts resolution and the journal poster

pub mod accounts;
pub mod ledger;

pub use ledger::{PostingMeta, post};
