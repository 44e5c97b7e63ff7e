//! Generic record-store actor.
//!
//! This module provides the building blocks for an authoritative, in-memory
//! registry of records that many tasks can read and write concurrently.
//!
//! # Main Components
//!
//! - [`StoreEntity`] - Trait that record types implement to be held by a store actor
//! - [`StoreActor`] - Generic actor that owns the records and serializes every access
//! - [`StoreClient`] - Cheap-to-clone handle used to talk to the actor
//! - [`WriteOutcome`] - What an insert or replace actually did
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use entity::StoreEntity;
pub use error::FrameworkError;
pub use message::{Response, StoreRequest, WriteOutcome};
