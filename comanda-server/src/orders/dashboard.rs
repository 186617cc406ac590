//! Tenant-wide dashboard summaries
//!
//! Aggregates order counts, average delivery times and a recent-orders list
//! for the staff dashboard. Averages use the tenant's full history (no
//! recency window); with zero completed orders they report as zero, never
//! as an error or NaN.

use serde::{Deserialize, Serialize};
use shared::models::Order;
use shared::phase::OrderPhase;
use shared::util::minutes_between;
use std::collections::BTreeMap;

/// Mean times across the tenant's orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageTimes {
    /// Mean total delivery time over completed orders, in minutes
    pub total_delivery_minutes: f64,
    /// Mean time from creation to reaching each phase, keyed
    /// `<phase>_minutes`, over orders that reached it
    pub phases: BTreeMap<String, f64>,
}

/// Condensed view of one order for the recent-orders panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentOrder {
    pub order_id: String,
    pub customer_name: String,
    pub status: OrderPhase,
    pub created_at: i64,
    /// Minutes from creation to each reached phase, keyed `<phase>_minutes`
    pub phase_minutes: BTreeMap<String, i64>,
}

/// Dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub in_progress_orders: usize,
    pub completed_orders: usize,
    pub average_times: AverageTimes,
    pub recent_orders: Vec<RecentOrder>,
}

fn phase_key(phase: OrderPhase) -> String {
    format!("{}_minutes", phase.as_str().to_ascii_lowercase())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the dashboard summary from a tenant's orders.
pub fn summarize(orders: &[Order], recent_limit: usize) -> DashboardSummary {
    let completed: Vec<&Order> = orders.iter().filter(|o| o.is_completed()).collect();

    let total_delivery_minutes = if completed.is_empty() {
        0.0
    } else {
        let sum: i64 = completed
            .iter()
            .map(|o| {
                minutes_between(
                    o.created_at,
                    o.timeline.last().map(|e| e.timestamp).unwrap_or(o.created_at),
                )
            })
            .sum();
        round2(sum as f64 / completed.len() as f64)
    };

    // Mean time-from-creation to reach each phase beyond RECEIVED,
    // over the orders that reached it (completed or not)
    let mut phases = BTreeMap::new();
    for phase in &OrderPhase::SEQUENCE[1..] {
        let reached: Vec<i64> = orders
            .iter()
            .filter_map(|o| {
                o.phase_reached_at(*phase)
                    .map(|ts| minutes_between(o.created_at, ts))
            })
            .collect();
        if !reached.is_empty() {
            let mean = reached.iter().sum::<i64>() as f64 / reached.len() as f64;
            phases.insert(phase_key(*phase), round2(mean));
        }
    }

    let mut recent: Vec<&Order> = orders.iter().collect();
    recent.sort_by_key(|o| std::cmp::Reverse(o.created_at));
    let recent_orders = recent
        .into_iter()
        .take(recent_limit)
        .map(|o| RecentOrder {
            order_id: o.order_id.clone(),
            customer_name: o.customer_name.clone(),
            status: o.status,
            created_at: o.created_at,
            phase_minutes: o
                .timeline
                .iter()
                .skip(1)
                .map(|e| {
                    (
                        phase_key(e.status),
                        minutes_between(o.created_at, e.timestamp),
                    )
                })
                .collect(),
        })
        .collect();

    DashboardSummary {
        total_orders: orders.len(),
        in_progress_orders: orders.len() - completed.len(),
        completed_orders: completed.len(),
        average_times: AverageTimes {
            total_delivery_minutes,
            phases,
        },
        recent_orders,
    }
}
