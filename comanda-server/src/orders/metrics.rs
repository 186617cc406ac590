//! Per-order timing metrics
//!
//! Everything here is a pure function of the stored timeline plus, for
//! in-progress orders, a historical-average snapshot and "now". No hidden
//! clocks, no randomness: the same inputs always produce the same metrics.

use serde::{Deserialize, Serialize};
use shared::models::Order;
use shared::phase::OrderPhase;
use shared::util::minutes_between;
use std::collections::HashMap;

/// Timeline entry annotated with human-readable status text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub status: OrderPhase,
    pub description: String,
    pub timestamp: i64,
    pub attended_by: String,
    pub role: String,
}

/// Timing of one reached phase, relative to order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTiming {
    pub status: OrderPhase,
    pub description: String,
    pub started_at: i64,
    pub attended_by: String,
    pub time_from_creation_minutes: i64,
}

/// Total lifecycle duration of a delivered order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalTime {
    pub minutes: i64,
}

/// Remaining-time estimate for an in-progress order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatedRemaining {
    pub minutes: i64,
}

/// Full metrics payload for one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMetrics {
    pub order_id: String,
    pub tenant_id: String,
    pub current_status: OrderPhase,
    pub is_completed: bool,
    pub created_at: i64,
    pub customer_name: String,
    pub timeline: Vec<TimelineEntry>,
    pub phases: Vec<PhaseTiming>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<TotalTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_remaining_time: Option<EstimatedRemaining>,
}

/// Tenant-wide average minutes spent in each phase, over completed orders
///
/// Shared source for remaining-time estimates; the sample count gates
/// whether estimates are produced at all.
#[derive(Debug, Clone, Default)]
pub struct PhaseAverages {
    samples: usize,
    minutes_in_phase: HashMap<OrderPhase, f64>,
}

impl PhaseAverages {
    /// Compute averages from a tenant's order history. Only completed orders
    /// contribute: their timelines cover every phase, so per-phase durations
    /// are well-defined.
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut sums: HashMap<OrderPhase, (f64, usize)> = HashMap::new();
        let mut samples = 0usize;

        for order in orders {
            if !order.is_completed() {
                continue;
            }
            samples += 1;
            for pair in order.timeline.windows(2) {
                let spent_minutes = (pair[1].timestamp - pair[0].timestamp).max(0) as f64 / 60_000.0;
                let entry = sums.entry(pair[0].status).or_insert((0.0, 0));
                entry.0 += spent_minutes;
                entry.1 += 1;
            }
        }

        let minutes_in_phase = sums
            .into_iter()
            .map(|(phase, (sum, count))| (phase, sum / count as f64))
            .collect();

        Self {
            samples,
            minutes_in_phase,
        }
    }

    /// Number of completed orders behind these averages
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Average minutes spent in `phase`, if any completed order passed it
    pub fn minutes_in(&self, phase: OrderPhase) -> Option<f64> {
        self.minutes_in_phase.get(&phase).copied()
    }
}

/// Derive the metrics payload for one order.
///
/// `now_ms` only matters for in-progress orders (elapsed time in the current
/// phase); completed orders are fully determined by their timeline.
pub fn compute(
    order: &Order,
    averages: &PhaseAverages,
    min_samples: usize,
    now_ms: i64,
) -> OrderMetrics {
    let timeline = order
        .timeline
        .iter()
        .map(|e| TimelineEntry {
            status: e.status,
            description: e.status.description().to_string(),
            timestamp: e.timestamp,
            attended_by: e.attended_by.clone(),
            role: e.role.clone(),
        })
        .collect();

    // Every phase transition after the synthesized creation event
    let phases = order
        .timeline
        .iter()
        .skip(1)
        .map(|e| PhaseTiming {
            status: e.status,
            description: e.status.description().to_string(),
            started_at: e.timestamp,
            attended_by: e.attended_by.clone(),
            time_from_creation_minutes: minutes_between(order.created_at, e.timestamp),
        })
        .collect();

    let total_time = order.is_completed().then(|| TotalTime {
        minutes: minutes_between(
            order.created_at,
            order
                .timeline
                .last()
                .map(|e| e.timestamp)
                .unwrap_or(order.created_at),
        ),
    });

    let estimated_remaining_time = if order.is_completed() || averages.samples() < min_samples {
        None
    } else {
        Some(estimate_remaining(order, averages, now_ms))
    };

    OrderMetrics {
        order_id: order.order_id.clone(),
        tenant_id: order.tenant_id.clone(),
        current_status: order.status,
        is_completed: order.is_completed(),
        created_at: order.created_at,
        customer_name: order.customer_name.clone(),
        timeline,
        phases,
        total_time,
        estimated_remaining_time,
    }
}

/// Sum the average duration of every remaining phase; for the current phase
/// only the not-yet-spent remainder counts, floored at zero.
fn estimate_remaining(
    order: &Order,
    averages: &PhaseAverages,
    now_ms: i64,
) -> EstimatedRemaining {
    let current = order.status;
    let entered_current = order
        .phase_reached_at(current)
        .unwrap_or(order.created_at);
    let elapsed_in_current = (now_ms - entered_current).max(0) as f64 / 60_000.0;

    let mut remaining = 0.0;
    for phase in &OrderPhase::SEQUENCE[current.index()..] {
        if phase.is_terminal() {
            break;
        }
        let avg = averages.minutes_in(*phase).unwrap_or(0.0);
        remaining += if *phase == current {
            (avg - elapsed_in_current).max(0.0)
        } else {
            avg
        };
    }

    EstimatedRemaining {
        minutes: remaining.round() as i64,
    }
}
