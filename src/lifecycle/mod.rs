//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the pieces of the simulation:
//!
//! - [`DroneSystem`] spawns the order store actor, builds the shared
//!   [`MissionRegistry`](crate::mission::MissionRegistry) and hands both to a
//!   [`SyncClient`](crate::sync::SyncClient).
//! - [`Config`] loads the mission schedule, retry policy and store settings.
//! - [`setup_tracing`] initializes logging.
//!
//! ## Shutdown
//!
//! 1. Cancel the shutdown token; every simulator stops at its next suspension point
//!    without marking its order delivered.
//! 2. Join every simulator task.
//! 3. Drop the store clients; the store actor sees its mailbox close and exits.
//! 4. Await the store task.

pub mod config;
pub mod drone_system;
pub mod tracing;

pub use config::*;
pub use drone_system::*;
pub use self::tracing::*;
