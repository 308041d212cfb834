//! Shared server state

use crate::core::Config;
use crate::db::DbService;
use crate::orders::{FulfillmentTracker, OrderLocks, PaymentRecorder};
use crate::utils::AppError;
use std::sync::Arc;

/// State shared by every request handler: the database service and the
/// per-order lock registry. Handlers build the lifecycle components from
/// it per request, the same way repositories are built per request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DbService,
    pub locks: Arc<OrderLocks>,
}

impl ServerState {
    /// Open the database, run migrations, and assemble the state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.db_path).await?;
        Ok(Self {
            db,
            locks: Arc::new(OrderLocks::new()),
        })
    }

    /// Payment recorder bound to this state
    pub fn payment_recorder(&self) -> PaymentRecorder {
        PaymentRecorder::new(self.db.pool.clone(), self.locks.clone())
    }

    /// Fulfillment tracker bound to this state
    pub fn fulfillment_tracker(&self) -> FulfillmentTracker {
        FulfillmentTracker::new(self.db.pool.clone(), self.locks.clone())
    }
}
