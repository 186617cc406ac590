//! Order preparation phases
//!
//! The whole lifecycle is driven by one ordered table: [`OrderPhase::SEQUENCE`].
//! The state machine validates transitions against it and the metrics engine
//! walks it to compute remaining-time estimates, so there is a single source
//! of truth for phase ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A phase in the fixed preparation sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPhase {
    Received,
    Cooking,
    Packing,
    Delivering,
    Delivered,
}

/// Error returned when parsing an unknown phase name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPhase(pub String);

impl fmt::Display for InvalidPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid order phase: {}", self.0)
    }
}

impl std::error::Error for InvalidPhase {}

impl OrderPhase {
    /// The fixed preparation sequence, in order.
    pub const SEQUENCE: [OrderPhase; 5] = [
        OrderPhase::Received,
        OrderPhase::Cooking,
        OrderPhase::Packing,
        OrderPhase::Delivering,
        OrderPhase::Delivered,
    ];

    /// Position of this phase within [`Self::SEQUENCE`].
    pub fn index(self) -> usize {
        match self {
            OrderPhase::Received => 0,
            OrderPhase::Cooking => 1,
            OrderPhase::Packing => 2,
            OrderPhase::Delivering => 3,
            OrderPhase::Delivered => 4,
        }
    }

    /// The single phase that may follow this one, if any.
    pub fn successor(self) -> Option<OrderPhase> {
        Self::SEQUENCE.get(self.index() + 1).copied()
    }

    /// Whether this phase ends the lifecycle.
    pub fn is_terminal(self) -> bool {
        self.successor().is_none()
    }

    /// Wire name (SCREAMING_SNAKE_CASE, matches serde encoding).
    pub fn as_str(self) -> &'static str {
        match self {
            OrderPhase::Received => "RECEIVED",
            OrderPhase::Cooking => "COOKING",
            OrderPhase::Packing => "PACKING",
            OrderPhase::Delivering => "DELIVERING",
            OrderPhase::Delivered => "DELIVERED",
        }
    }

    /// Human-readable status text for timelines and notifications.
    pub fn description(self) -> &'static str {
        match self {
            OrderPhase::Received => "Order received",
            OrderPhase::Cooking => "Kitchen preparing the order",
            OrderPhase::Packing => "Packing the order",
            OrderPhase::Delivering => "On the way to the customer",
            OrderPhase::Delivered => "Order delivered",
        }
    }

    /// The staff role expected to move an order *into* this phase.
    ///
    /// A mismatch is reported as a warning, never rejected.
    pub fn expected_role(self) -> Option<&'static str> {
        match self {
            OrderPhase::Received => None,
            OrderPhase::Cooking => Some("KITCHEN_STAFF"),
            OrderPhase::Packing => Some("PACKER"),
            OrderPhase::Delivering => Some("DELIVERY_DRIVER"),
            OrderPhase::Delivered => Some("DELIVERY_DRIVER"),
        }
    }
}

impl fmt::Display for OrderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderPhase {
    type Err = InvalidPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SEQUENCE
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| InvalidPhase(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        assert_eq!(OrderPhase::Received.successor(), Some(OrderPhase::Cooking));
        assert_eq!(OrderPhase::Cooking.successor(), Some(OrderPhase::Packing));
        assert_eq!(OrderPhase::Packing.successor(), Some(OrderPhase::Delivering));
        assert_eq!(
            OrderPhase::Delivering.successor(),
            Some(OrderPhase::Delivered)
        );
        assert_eq!(OrderPhase::Delivered.successor(), None);
    }

    #[test]
    fn test_index_matches_sequence() {
        for (i, phase) in OrderPhase::SEQUENCE.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn test_terminal() {
        assert!(OrderPhase::Delivered.is_terminal());
        assert!(!OrderPhase::Received.is_terminal());
    }

    #[test]
    fn test_parse_roundtrip() {
        for phase in OrderPhase::SEQUENCE {
            assert_eq!(phase.as_str().parse::<OrderPhase>().unwrap(), phase);
        }
        assert!("ACTIVE".parse::<OrderPhase>().is_err());
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&OrderPhase::Cooking).unwrap();
        assert_eq!(json, "\"COOKING\"");
        let parsed: OrderPhase = serde_json::from_str("\"DELIVERED\"").unwrap();
        assert_eq!(parsed, OrderPhase::Delivered);
    }

    #[test]
    fn test_expected_roles() {
        assert_eq!(OrderPhase::Cooking.expected_role(), Some("KITCHEN_STAFF"));
        assert_eq!(OrderPhase::Packing.expected_role(), Some("PACKER"));
        assert_eq!(
            OrderPhase::Delivered.expected_role(),
            Some("DELIVERY_DRIVER")
        );
        assert_eq!(OrderPhase::Received.expected_role(), None);
    }
}
