//! # Drone Mission
//!
//! > **A simulation engine for drone package deliveries, kept in step with a shared
//! > order store.**
//!
//! Every delivery is an [`Order`](model::Order) flying a straight line between two
//! coordinates. While it flies, a simulator advances its progress in fixed steps,
//! derives its [`Phase`](model::Phase) from that progress, moves its position along
//! the route, and periodically pushes its state to the store. Sessions that start
//! later pull the store and resume whatever was left unfinished.
//!
//! ## 🏗️ Design
//!
//! ### One writer per order
//! The [`MissionRegistry`](mission::MissionRegistry) hands out at most one
//! [`MissionLease`](mission::MissionLease) per order id. The lease owner is the
//! only task that mutates the live order; everybody else reads snapshots or
//! subscribes to events. Dropping the lease deregisters the mission.
//!
//! ### One mutual-exclusion domain for the store
//! The order store is a [`StoreActor`](framework::StoreActor): requests are drained
//! from one mailbox in arrival order, so a read-all never observes a half-applied
//! write and "insert if absent" is atomic.
//!
//! ### Progress never goes backwards
//! A resumed mission restarts at `floor(progress * steps)` but never reports less
//! than the stored progress.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic store actor, its client, its messages and the mock used in tests.
//!
//! ### 2. The Data ([`model`])
//! [`Order`](model::Order), [`Phase`](model::Phase),
//! [`MissionSchedule`](model::MissionSchedule) and the
//! [`OrderMsg`](model::OrderMsg) wire form.
//!
//! ### 3. The Store ([`order_store`], [`clients`])
//! The order store actor and the [`OrderService`](clients::OrderService) backends:
//! the in-process store and a JSON [`FileCache`](clients::FileCache).
//!
//! ### 4. The Flights ([`mission`])
//! The registry and the [`MissionSimulator`](mission::MissionSimulator).
//!
//! ### 5. The Sync ([`sync`])
//! [`SyncClient`](sync::SyncClient): pull, reconcile, resume, push.
//!
//! ### 6. The Orchestrator ([`lifecycle`])
//! [`DroneSystem`](lifecycle::DroneSystem), configuration and tracing setup.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Fly one package with the default schedule
//! RUST_LOG=info cargo run
//!
//! # Use a config file
//! RUST_LOG=info cargo run -- drone.toml
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod mission;
pub mod model;
pub mod order_store;
pub mod sync;
