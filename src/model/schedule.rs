//! The configurable flight schedule shared by every simulator.
//!
//! A schedule fixes the number of steps a full flight takes, the delay between
//! steps, how often progress is pushed to the order store, and the three progress
//! thresholds that split a flight into five [`Phase`]s.

use super::Phase;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Reasons a schedule cannot be used.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScheduleError {
    #[error("steps must be greater than zero")]
    ZeroSteps,
    #[error("publish_every must be greater than zero")]
    ZeroPublishInterval,
    #[error("thresholds must satisfy 0 < packing < takeoff < landing < 1 (got {packing}, {takeoff}, {landing})")]
    UnorderedThresholds { packing: f64, takeoff: f64, landing: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionSchedule {
    /// Number of steps in a complete flight (N).
    pub steps: u32,
    /// Delay before each step, in milliseconds.
    pub step_delay_ms: u64,
    /// Push progress to the store on every k-th step.
    pub publish_every: u32,
    /// Below this fraction the package is still being packed.
    pub packing: f64,
    /// Below this fraction the drone is still climbing.
    pub takeoff: f64,
    /// At or above this fraction the drone is landing.
    pub landing: f64,
}

impl Default for MissionSchedule {
    fn default() -> Self {
        Self {
            steps: 600,
            step_delay_ms: 100,
            publish_every: 20,
            packing: 0.05,
            takeoff: 0.10,
            landing: 0.95,
        }
    }
}

impl MissionSchedule {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.steps == 0 {
            return Err(ScheduleError::ZeroSteps);
        }
        if self.publish_every == 0 {
            return Err(ScheduleError::ZeroPublishInterval);
        }
        let ordered = 0.0 < self.packing
            && self.packing < self.takeoff
            && self.takeoff < self.landing
            && self.landing < 1.0;
        if !ordered {
            return Err(ScheduleError::UnorderedThresholds {
                packing: self.packing,
                takeoff: self.takeoff,
                landing: self.landing,
            });
        }
        Ok(())
    }

    /// Maps a progress fraction to its phase. Depends on nothing but `progress`.
    pub fn phase_at(&self, progress: f64) -> Phase {
        if progress < self.packing {
            Phase::Packing
        } else if progress < self.takeoff {
            Phase::Ascending
        } else if progress < self.landing {
            Phase::InTransit
        } else if progress < 1.0 {
            Phase::Landing
        } else {
            Phase::Delivered
        }
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Step a flight at `progress` resumes from: `floor(progress * N)`.
    pub fn start_step(&self, progress: f64) -> u32 {
        let step = (progress.clamp(0.0, 1.0) * self.steps as f64).floor() as u32;
        step.min(self.steps)
    }

    /// Progress fraction reached at `step`.
    pub fn fraction(&self, step: u32) -> f64 {
        step as f64 / self.steps as f64
    }

    pub fn publishes_at(&self, step: u32) -> bool {
        step % self.publish_every == 0
    }
}
