//! # Mission Simulator
//!
//! Flies one order from its current progress to delivery.
//!
//! The flight is a fixed number of steps. Every step waits the schedule's delay,
//! sets `progress = step / N`, derives phase and position from it, and publishes
//! the new state to the registry. Every `k`-th step the order is also pushed to
//! the store; a failed push is logged and the flight goes on. When the loop ends
//! the order is forced to delivered and pushed once more unconditionally.
//!
//! Two tokens can cut a flight short:
//! - the lease's completion token skips straight to the delivered flush;
//! - the shutdown token stops immediately without touching the order, so the last
//!   pushed progress can be resumed later.

use super::MissionLease;
use crate::model::{MissionSchedule, Order, ServerResponse};
use crate::sync::SyncError;
use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Where a simulator sends its periodic and final updates.
#[async_trait]
pub trait UpdateSink: Send + Sync + 'static {
    async fn push_update(&self, order: &Order) -> Result<ServerResponse, SyncError>;
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MissionError {
    #[error("Lease for {lease} does not match order {order}")]
    LeaseMismatch { lease: String, order: String },

    #[error("Order {0} is already delivered")]
    AlreadyDelivered(String),
}

/// How a flight ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissionOutcome {
    /// Reached the last step, or completion was requested; terminal state flushed.
    Delivered,
    /// Stopped by shutdown at the given progress.
    Interrupted { progress: f64 },
}

pub struct MissionSimulator<S: UpdateSink> {
    lease: MissionLease,
    order: Order,
    schedule: MissionSchedule,
    sink: S,
    shutdown: CancellationToken,
}

impl<S: UpdateSink> MissionSimulator<S> {
    pub fn new(
        lease: MissionLease,
        order: Order,
        schedule: MissionSchedule,
        sink: S,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            lease,
            order,
            schedule,
            sink,
            shutdown,
        }
    }

    pub async fn run(mut self) -> Result<MissionOutcome, MissionError> {
        if self.lease.id() != self.order.id {
            return Err(MissionError::LeaseMismatch {
                lease: self.lease.id().to_string(),
                order: self.order.id.clone(),
            });
        }
        if self.order.is_delivered() {
            return Err(MissionError::AlreadyDelivered(self.order.id.clone()));
        }

        let start = self.schedule.start_step(self.order.progress);
        let completion = self.lease.completion().clone();
        info!(
            order_id = %self.order.id,
            start_step = start,
            steps = self.schedule.steps,
            route_km = self.order.route_km(),
            "Mission started"
        );

        for step in start..=self.schedule.steps {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    info!(order_id = %self.order.id, progress = self.order.progress, "Mission interrupted");
                    return Ok(MissionOutcome::Interrupted { progress: self.order.progress });
                }
                _ = completion.cancelled() => {
                    info!(order_id = %self.order.id, step, "Mission completed early");
                    break;
                }
                _ = tokio::time::sleep(self.schedule.step_delay()) => {}
            }

            // Never move backwards when the stored progress sits between two steps.
            let progress = self.schedule.fraction(step).max(self.order.progress);
            let previous = self.order.phase;
            self.order.advance_to(progress, &self.schedule);
            self.lease.publish(&self.order);

            if self.order.phase != previous {
                info!(order_id = %self.order.id, phase = %self.order.phase, "Phase changed");
            }
            if self.schedule.publishes_at(step) {
                self.push().await;
            }
        }

        self.order.mark_delivered();
        self.lease.publish(&self.order);
        self.push().await;
        info!(order_id = %self.order.id, "Mission delivered");
        Ok(MissionOutcome::Delivered)
    }

    async fn push(&self) {
        match self.sink.push_update(&self.order).await {
            Ok(reply) => debug!(
                order_id = %self.order.id,
                progress = self.order.progress,
                reply = %reply.message,
                "Update pushed"
            ),
            Err(e) => warn!(
                order_id = %self.order.id,
                progress = self.order.progress,
                error = %e,
                "Update lost; flight continues"
            ),
        }
    }
}
