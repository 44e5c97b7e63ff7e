//! Client-side synchronization with the order store.
//!
//! [`SyncClient`] pulls the full order set at session start, reconciles it with
//! the missions already flying locally, pushes creations and updates, and starts
//! simulators for undelivered orders.

pub mod client;
pub mod error;
pub mod retry;

pub use client::*;
pub use error::*;
pub use retry::*;
