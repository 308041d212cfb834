//! Store row: the tenant root

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `stores`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoreRow {
    pub id: i64,
    pub name: String,
    /// External auth subject; authentication itself is upstream
    pub owner_id: Option<String>,
    pub price_currency: String,
    pub created_at: i64,
    pub updated_at: i64,
}
