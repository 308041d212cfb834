//! Commerce Server - multi-tenant storefront backend
//!
//! # Architecture overview
//!
//! The platform's UI and catalog CRUD live elsewhere; this service owns the
//! order financial lifecycle: the part that has to stay consistent while
//! partial payments, partial shipments, and refunds land out of order:
//!
//! - **orders** (`orders`): payment recorder, fulfillment tracker, status
//!   coordinator, invoice projector, per-order locks
//! - **finance** (`finance`): chart-of-accounts resolution and the
//!   append-only journal poster
//! - **db** (`db`): embedded SQLite storage (sqlx, WAL)
//! - **api** (`api`): RESTful surface over the above
//!
//! # Module structure
//!
//! ```text
//! commerce-server/src/
//! ├── core/          # config, state, HTTP server
//! ├── api/           # routes and handlers
//! ├── orders/        # order lifecycle components
//! ├── finance/       # ledger poster, account resolution
//! ├── db/            # pool, models, repositories
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod finance;
pub mod orders;
pub mod utils;

// Re-export common types
pub use crate::core::{Config, Server, ServerState};
pub use crate::db::DbService;
pub use crate::orders::{FulfillmentTracker, OrderError, OrderLocks, PaymentRecorder};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/___  ____ ___  ____ ___  ___  _____________
 / /   / __ \/ __ `__ \/ __ `__ \/ _ \/ ___/ ___/ _ \
/ /___/ /_/ / / / / / / / / / / /  __/ /  / /__/  __/
\____/\____/_/ /_/ /_/_/ /_/ /_/\___/_/   \___/\___/
    "#
    );
}
