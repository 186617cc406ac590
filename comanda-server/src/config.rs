//! Server configuration

use std::path::PathBuf;

/// Server configuration, loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port (env: HTTP_PORT, default 8080)
    pub http_port: u16,
    /// Data directory for the embedded database and exported reports
    /// (env: DATA_DIR, default "data")
    pub data_dir: PathBuf,
    /// Optional log directory; when set, logs also go to a daily-rolled file
    /// (env: LOG_DIR)
    pub log_dir: Option<String>,
    /// Completed orders required before remaining-time estimates are shown
    /// (env: MIN_METRIC_SAMPLES, default 3)
    pub min_metric_samples: usize,
    /// Number of orders in the dashboard recent-orders panel
    /// (env: RECENT_ORDERS_LIMIT, default 10)
    pub recent_orders_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            data_dir: PathBuf::from("data"),
            log_dir: None,
            min_metric_samples: 3,
            recent_orders_limit: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            min_metric_samples: std::env::var("MIN_METRIC_SAMPLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_metric_samples),
            recent_orders_limit: std::env::var("RECENT_ORDERS_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.recent_orders_limit),
        }
    }

    /// Path of the embedded database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("comanda.redb")
    }
}
