//! Order Model

use crate::phase::OrderPhase;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Actor identifier used for the synthesized creation event.
pub const SYSTEM_ACTOR: &str = "system";

/// Role recorded on the synthesized creation event.
pub const SYSTEM_ROLE: &str = "SYSTEM";

/// A single phase-transition record in an order's timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseEvent {
    /// Phase reached by this event
    pub status: OrderPhase,
    /// Actor who performed the transition
    pub attended_by: String,
    /// Actor role (e.g. KITCHEN_STAFF, PACKER, DELIVERY_DRIVER)
    pub role: String,
    /// Server-assigned timestamp (ms), non-decreasing within a timeline
    pub timestamp: i64,
}

/// Order line — name and price are snapshotted from the menu at creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    /// Menu price at creation time, in currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

/// Order entity
///
/// Mutated only by appending timeline events through the lifecycle state
/// machine; never deleted (kept for historical metrics).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub tenant_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub items: Vec<OrderLine>,
    /// Current phase; always equals the status of the last timeline entry
    pub status: OrderPhase,
    pub created_at: i64,
    pub updated_at: i64,
    /// Append-only, ordered by timestamp; first entry is always RECEIVED
    pub timeline: Vec<PhaseEvent>,
}

impl Order {
    /// Append a phase event, keeping `status` and `updated_at` in sync with
    /// the timeline. The invariant `status == timeline.last().status` holds
    /// by construction because this is the only mutation path.
    pub fn record_event(&mut self, event: PhaseEvent) {
        self.status = event.status;
        self.updated_at = event.timestamp;
        self.timeline.push(event);
    }

    /// Whether the order has reached the terminal phase.
    pub fn is_completed(&self) -> bool {
        self.status.is_terminal()
    }

    /// Timestamp at which the order first reached `phase`, if it has.
    pub fn phase_reached_at(&self, phase: OrderPhase) -> Option<i64> {
        self.timeline
            .iter()
            .find(|e| e.status == phase)
            .map(|e| e.timestamp)
    }
}

/// Order creation draft, as submitted by the client
///
/// Line prices are intentionally absent: the store resolves them from the
/// tenant's menu so the client cannot set its own prices.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderDraft {
    #[serde(default)]
    pub items: Vec<OrderLineDraft>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_address: String,
}

/// One requested line in an order draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineDraft {
    pub product_id: String,
    /// Display name as the client knew it; the menu name wins
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
}
