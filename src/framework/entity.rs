//! # StoreEntity Trait
//!
//! The contract a record type must satisfy to be held by a [`StoreActor`](super::StoreActor).
//!
//! A record carries its own identity (unlike a server-assigned id), so the store never
//! generates keys: clients submit whole records and the store decides, by id, whether
//! the write is an insert, a replacement, or a no-op.
//!
//! # Provided Methods (Hooks)
//! - [`StoreEntity::on_insert`]
//! - [`StoreEntity::on_replace`]
//!
//! Both default to accepting the write. Override them to validate incoming records.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be managed by a `StoreActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` and receive the `Context` injected through
/// [`StoreActor::run`](super::StoreActor::run), so validation can consult other services.
#[async_trait]
pub trait StoreEntity: Clone + Send + Sync + Debug + 'static {
    /// The unique identifier for this record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type returned when a hook rejects a write.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Primary identity of the record.
    fn id(&self) -> Self::Id;

    /// Called before a record with a previously unseen id is stored.
    async fn on_insert(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called before `self` overwrites `previous`.
    async fn on_replace(&self, _previous: &Self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
