//! Daily order report export
//!
//! Dumps a tenant's orders for the current UTC day as a JSON file under the
//! data directory: `reports/<tenant>/<YYYY-MM-DD>/orders.json`. The returned
//! key is relative to the data directory, so a deployment that later syncs
//! reports to object storage can use it as-is.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::models::Order;
use std::fs;
use std::path::Path;

/// Result of a report export
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub message: String,
    pub key: String,
    pub order_count: usize,
}

fn utc_date(ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Write the report file for `tenant_id` covering the UTC day of `now_ms`.
pub fn export_daily(
    orders: &[Order],
    data_dir: &Path,
    tenant_id: &str,
    now_ms: i64,
) -> AppResult<DailyReport> {
    let date = utc_date(now_ms)
        .ok_or_else(|| AppError::internal(format!("Timestamp out of range: {now_ms}")))?;

    let day_orders: Vec<&Order> = orders
        .iter()
        .filter(|o| utc_date(o.created_at).as_deref() == Some(date.as_str()))
        .collect();

    let key = format!("reports/{tenant_id}/{date}/orders.json");
    let path = data_dir.join(&key);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::internal(format!("Failed to create report dir: {e}")))?;
    }

    let body = serde_json::to_vec_pretty(&day_orders)
        .map_err(|e| AppError::internal(format!("Failed to serialize report: {e}")))?;
    fs::write(&path, body)
        .map_err(|e| AppError::internal(format!("Failed to write report: {e}")))?;

    tracing::info!(tenant_id, %date, orders = day_orders.len(), "daily report exported");

    Ok(DailyReport {
        message: "report generated".to_string(),
        key,
        order_count: day_orders.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{OrderLine, PhaseEvent};
    use shared::phase::OrderPhase;

    const DAY: i64 = 24 * 60 * 60 * 1000;

    fn order_created_at(id: &str, created_at: i64) -> Order {
        Order {
            order_id: id.to_string(),
            tenant_id: "t1".to_string(),
            customer_name: "Ana".to_string(),
            customer_phone: String::new(),
            customer_email: String::new(),
            customer_address: String::new(),
            items: vec![OrderLine {
                product_id: "p1".to_string(),
                name: "Item".to_string(),
                quantity: 1,
                unit_price: Decimal::new(1000, 2),
            }],
            status: OrderPhase::Received,
            created_at,
            updated_at: created_at,
            timeline: vec![PhaseEvent {
                status: OrderPhase::Received,
                attended_by: "system".to_string(),
                role: "SYSTEM".to_string(),
                timestamp: created_at,
            }],
        }
    }

    #[test]
    fn test_exports_only_todays_orders() {
        let dir = tempfile::tempdir().unwrap();
        let now = 10 * DAY + 3_600_000;
        let orders = vec![
            order_created_at("today-1", 10 * DAY),
            order_created_at("today-2", 10 * DAY + 7_200_000),
            order_created_at("yesterday", 9 * DAY),
        ];

        let report = export_daily(&orders, dir.path(), "t1", now).unwrap();
        assert_eq!(report.order_count, 2);
        assert_eq!(report.key, "reports/t1/1970-01-11/orders.json");

        let written = fs::read_to_string(dir.path().join(&report.key)).unwrap();
        let parsed: Vec<Order> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed.iter().all(|o| o.order_id.starts_with("today")));
    }

    #[test]
    fn test_empty_day_still_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = export_daily(&[], dir.path(), "t1", DAY).unwrap();
        assert_eq!(report.order_count, 0);
        assert!(dir.path().join(&report.key).exists());
    }
}
