//! Ledger and invoice vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of one journal leg. Amounts are always positive; the sign is
/// carried here, not in the magnitude.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryDirection {
    Debit,
    Credit,
}

impl EntryDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryDirection::Debit => "Debit",
            EntryDirection::Credit => "Credit",
        }
    }
}

impl fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryDirection {
    type Err = FinanceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Debit" => Ok(EntryDirection::Debit),
            "Credit" => Ok(EntryDirection::Credit),
            _ => Err(FinanceParseError::new("EntryDirection", s)),
        }
    }
}

/// Chart-of-accounts classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Asset => "Asset",
            AccountKind::Liability => "Liability",
            AccountKind::Equity => "Equity",
            AccountKind::Revenue => "Revenue",
            AccountKind::Expense => "Expense",
        }
    }
}

impl FromStr for AccountKind {
    type Err = FinanceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Asset" => Ok(AccountKind::Asset),
            "Liability" => Ok(AccountKind::Liability),
            "Equity" => Ok(AccountKind::Equity),
            "Revenue" => Ok(AccountKind::Revenue),
            "Expense" => Ok(AccountKind::Expense),
            _ => Err(FinanceParseError::new("AccountKind", s)),
        }
    }
}

/// What a journal entry references
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReferenceType {
    Invoice,
    Bill,
    Order,
    #[default]
    Manual,
}

impl ReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::Invoice => "Invoice",
            ReferenceType::Bill => "Bill",
            ReferenceType::Order => "Order",
            ReferenceType::Manual => "Manual",
        }
    }
}

impl FromStr for ReferenceType {
    type Err = FinanceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Invoice" => Ok(ReferenceType::Invoice),
            "Bill" => Ok(ReferenceType::Bill),
            "Order" => Ok(ReferenceType::Order),
            "Manual" => Ok(ReferenceType::Manual),
            _ => Err(FinanceParseError::new("ReferenceType", s)),
        }
    }
}

/// Invoice display status: the accounting UI's own vocabulary, distinct
/// from the payment-status vocabulary the projector reads from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
            InvoiceStatus::Void => "Void",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = FinanceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(InvoiceStatus::Draft),
            "Sent" => Ok(InvoiceStatus::Sent),
            "Paid" => Ok(InvoiceStatus::Paid),
            "Overdue" => Ok(InvoiceStatus::Overdue),
            "Cancelled" => Ok(InvoiceStatus::Cancelled),
            "Void" => Ok(InvoiceStatus::Void),
            _ => Err(FinanceParseError::new("InvoiceStatus", s)),
        }
    }
}

/// A finance string in storage did not match its vocabulary
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid {vocabulary} value: {value}")]
pub struct FinanceParseError {
    pub vocabulary: &'static str,
    pub value: String,
}

impl FinanceParseError {
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
    fn test_direction_round_trip() {
        assert_eq!("Debit".parse::<EntryDirection>().unwrap(), EntryDirection::Debit);
        assert_eq!(EntryDirection::Credit.as_str(), "Credit");
        assert!("debit".parse::<EntryDirection>().is_err());
    }

    #[test]
    fn test_invoice_status_round_trip() {
        for s in [
            InvoiceStatus::Draft,
            InvoiceStatus::Sent,
            InvoiceStatus::Paid,
            InvoiceStatus::Overdue,
        ] {
            assert_eq!(s.as_str().parse::<InvoiceStatus>().unwrap(), s);
        }
    }
}
