//! Mission execution: the [`MissionRegistry`] that guarantees one simulator per
//! order, and the [`MissionSimulator`] that flies it.

pub mod registry;
pub mod simulator;

pub use registry::*;
pub use simulator::*;
