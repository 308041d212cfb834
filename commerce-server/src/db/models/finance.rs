//! Finance rows: invoices, chart of accounts, journal entries

use serde::{Deserialize, Serialize};
use shared::finance::InvoiceStatus;
use sqlx::FromRow;

/// One row of `finance_invoices`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRow {
    pub id: i64,
    pub store_id: i64,
    pub order_id: Option<i64>,
    pub invoice_number: String,
    pub invoice_status: String,
    pub total_payment_due: f64,
    pub price_currency: String,
    pub payment_due_date: Option<i64>,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl InvoiceRow {
    pub fn invoice_status(&self) -> InvoiceStatus {
        self.invoice_status.parse().unwrap_or_default()
    }
}

/// One row of `finance_accounts`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AccountRow {
    pub id: i64,
    pub store_id: i64,
    /// COA code, e.g. "1200" for Accounts Receivable
    pub code: String,
    pub name: String,
    pub account_kind: String,
    pub created_at: i64,
}

/// One row of `finance_entries`; immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EntryRow {
    pub id: i64,
    pub store_id: i64,
    pub account_id: i64,
    pub direction: String,
    /// Always positive; the sign lives in `direction`
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub reference_id: Option<i64>,
    pub reference_type: String,
    pub payment_method: Option<String>,
    pub entry_date: i64,
    pub created_at: i64,
}

/// One row of `store_payment_methods`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodRow {
    pub id: i64,
    pub store_id: i64,
    pub method: String,
    pub gateway: Option<String>,
    pub coa_code: String,
    pub created_at: i64,
}
