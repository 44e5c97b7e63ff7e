//! Pure data structures: the delivery [`Order`], its flight [`Phase`]s, the
//! [`MissionSchedule`] that drives them, and the [`OrderMsg`] wire form.

pub mod error;
pub mod geo;
pub mod order;
pub mod phase;
pub mod schedule;
pub mod wire;

pub use error::*;
pub use geo::*;
pub use order::*;
pub use phase::*;
pub use schedule::*;
pub use wire::*;
