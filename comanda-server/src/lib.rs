//! Comanda Server — multi-tenant food-order lifecycle tracker
//!
//! Backing service for customer order tracking and the staff kitchen
//! dashboard:
//!
//! - **Orders** (`orders`): embedded redb store, lifecycle state machine,
//!   timing metrics and dashboard aggregation
//! - **HTTP API** (`api`): tenant-scoped REST surface
//! - **Services** (`services`): simulated email notifications, daily report
//!   export
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # storage, state machine, metrics, dashboard
//! ├── services/      # notifications, report export
//! ├── config.rs      # env-based configuration
//! └── state.rs       # shared application state
//! ```

pub mod api;
pub mod config;
pub mod orders;
pub mod services;
pub mod state;

pub use config::Config;
pub use orders::{OrderStorage, OrdersManager};
pub use state::AppState;
