use super::{Coord, MissionSchedule, OrderError, Phase};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Which way the package travels relative to this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// A single delivery mission.
///
/// `progress` is the only independent piece of flight state: `phase` and `current`
/// are recomputed from it by [`Order::advance_to`], so the three never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub origin_address: String,
    pub destination_address: String,
    pub origin: Coord,
    pub destination: Coord,
    pub current: Coord,
    pub weight_kg: f64,
    pub send_time: DateTime<Utc>,
    pub deliver_time: DateTime<Utc>,
    pub direction: Direction,
    pub progress: f64,
    pub phase: Phase,
}

impl Order {
    /// Moves the order to `progress`, deriving phase and position from it.
    pub fn advance_to(&mut self, progress: f64, schedule: &MissionSchedule) {
        let progress = progress.clamp(0.0, 1.0);
        self.progress = progress;
        self.phase = schedule.phase_at(progress);
        self.current = self.origin.lerp(&self.destination, progress);
    }

    /// Forces the terminal state regardless of the schedule.
    pub fn mark_delivered(&mut self) {
        self.progress = 1.0;
        self.phase = Phase::Delivered;
        self.current = self.origin.lerp(&self.destination, 1.0);
    }

    pub fn is_delivered(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn route_km(&self) -> f64 {
        self.origin.distance_km(&self.destination)
    }

    pub fn remaining_km(&self) -> f64 {
        self.route_km() * (1.0 - self.progress)
    }

    pub fn status_label(&self) -> String {
        self.phase.label(self.remaining_km())
    }
}

/// Payload for creating a new order.
///
/// Coordinates come already resolved; address lookup happens outside this crate.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub origin_address: String,
    pub destination_address: String,
    pub origin: Coord,
    pub destination: Coord,
    pub weight_kg: f64,
    pub send_time: DateTime<Utc>,
    pub deliver_time: DateTime<Utc>,
    pub direction: Direction,
}

impl OrderDraft {
    /// Validates the draft and assigns a fresh id. The order starts at the origin
    /// with zero progress.
    pub fn into_order(self, schedule: &MissionSchedule) -> Result<Order, OrderError> {
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(OrderError::InvalidWeight(self.weight_kg));
        }
        self.origin.validate()?;
        self.destination.validate()?;

        let mut order = Order {
            id: Uuid::new_v4().to_string(),
            origin_address: self.origin_address,
            destination_address: self.destination_address,
            origin: self.origin,
            destination: self.destination,
            current: self.origin,
            weight_kg: self.weight_kg,
            send_time: self.send_time,
            deliver_time: self.deliver_time,
            direction: self.direction,
            progress: 0.0,
            phase: Phase::Packing,
        };
        order.advance_to(0.0, schedule);
        Ok(order)
    }
}
