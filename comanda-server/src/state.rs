//! Application state

use crate::config::Config;
use crate::orders::{OrderStorage, OrdersManager};
use shared::error::AppResult;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order lifecycle manager (the only mutator of order state)
    pub manager: Arc<OrdersManager>,
    /// Server configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state backed by the on-disk database
    pub fn new(config: Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            shared::error::AppError::internal(format!(
                "Failed to create data dir {}: {e}",
                config.data_dir.display()
            ))
        })?;
        let storage = OrderStorage::open(config.db_path())?;
        Ok(Self {
            manager: Arc::new(OrdersManager::new(storage)),
            config: Arc::new(config),
        })
    }

    /// Create application state backed by an in-memory database
    /// (tests and demos)
    pub fn in_memory(config: Config) -> AppResult<Self> {
        let storage = OrderStorage::open_in_memory()?;
        Ok(Self {
            manager: Arc::new(OrdersManager::new(storage)),
            config: Arc::new(config),
        })
    }
}
