//! The five flight phases a mission moves through.

use std::fmt::{self, Display};

/// Status of an order, derived from its progress by a [`MissionSchedule`](super::MissionSchedule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Packing,
    Ascending,
    InTransit,
    Landing,
    Delivered,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Packing => "packing",
            Phase::Ascending => "ascending",
            Phase::InTransit => "in transit",
            Phase::Landing => "landing",
            Phase::Delivered => "delivered",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Delivered
    }

    /// Human-readable status line; the in-transit phase carries the distance left.
    pub fn label(self, remaining_km: f64) -> String {
        match self {
            Phase::InTransit => format!("{} - {:.1} km left", self.name(), remaining_km),
            other => other.name().to_string(),
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Phase::Packing.label(10.0), "packing");
        assert_eq!(Phase::InTransit.label(126.28), "in transit - 126.3 km left");
        assert_eq!(Phase::Delivered.to_string(), "delivered");
    }

    #[test]
    fn test_phases_are_ordered() {
        assert!(Phase::Packing < Phase::Ascending);
        assert!(Phase::Landing < Phase::Delivered);
        assert!(Phase::Delivered.is_terminal());
        assert!(!Phase::Landing.is_terminal());
    }
}
