//! # Mission Registry
//!
//! Tracks which orders currently have a simulator running.
//!
//! Registration is a single atomic step ([`MissionRegistry::try_start`]) that either
//! hands out the one [`MissionLease`] for an order id or refuses. Whoever holds the
//! lease is the only writer of that order's live state; dropping the lease
//! deregisters the id, on normal return, early return, or panic alike.
//!
//! Observers never touch the live order directly. They read snapshots with
//! [`MissionRegistry::lookup`], follow one order with [`MissionRegistry::watch`], or
//! subscribe to [`MissionEvent`]s for every mission.

use crate::model::Order;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Capacity of the event channel; slow subscribers observe `Lagged`.
pub const EVENT_CAPACITY: usize = 256;

/// Notifications about live missions.
#[derive(Debug, Clone)]
pub enum MissionEvent {
    Started { id: String },
    Progressed(Order),
    Finished { id: String },
}

struct MissionSlot {
    generation: u64,
    live: watch::Receiver<Order>,
    complete: CancellationToken,
}

struct RegistryInner {
    missions: DashMap<String, MissionSlot>,
    events: broadcast::Sender<MissionEvent>,
    generation: AtomicU64,
}

/// Shared handle to the set of live missions. Clones refer to the same registry.
#[derive(Clone)]
pub struct MissionRegistry {
    inner: Arc<RegistryInner>,
}

impl MissionRegistry {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(RegistryInner {
                missions: DashMap::new(),
                events,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Registers `order` as live unless its id already is.
    ///
    /// Returns the lease on success; the caller must run exactly one simulator with
    /// it. Two concurrent calls for the same id never both succeed.
    pub fn try_start(&self, order: Order) -> Option<MissionLease> {
        let id = order.id.clone();
        let lease = match self.inner.missions.entry(id.clone()) {
            Entry::Occupied(_) => {
                debug!(order_id = %id, "Mission already live");
                return None;
            }
            Entry::Vacant(vacant) => {
                let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);
                let (sender, receiver) = watch::channel(order);
                let complete = CancellationToken::new();
                vacant.insert(MissionSlot {
                    generation,
                    live: receiver,
                    complete: complete.clone(),
                });
                MissionLease {
                    id: id.clone(),
                    generation,
                    live: sender,
                    complete,
                    registry: self.clone(),
                }
            }
        };
        info!(order_id = %id, active = self.active_count(), "Mission registered");
        let _ = self.inner.events.send(MissionEvent::Started { id });
        Some(lease)
    }

    /// Snapshot of the live order, if a simulator owns it.
    pub fn lookup(&self, id: &str) -> Option<Order> {
        self.inner
            .missions
            .get(id)
            .map(|slot| slot.live.borrow().clone())
    }

    /// Follows one live order. The receiver reports the latest state and closes
    /// when the mission ends.
    pub fn watch(&self, id: &str) -> Option<watch::Receiver<Order>> {
        self.inner.missions.get(id).map(|slot| slot.live.clone())
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.inner.missions.contains_key(id)
    }

    pub fn active_count(&self) -> usize {
        self.inner.missions.len()
    }

    /// Asks the simulator owning `id` to finish now and flush the delivered state.
    ///
    /// Returns false when no mission is live for `id`.
    pub fn complete(&self, id: &str) -> bool {
        match self.inner.missions.get(id) {
            Some(slot) => {
                info!(order_id = %id, "Completion requested");
                slot.complete.cancel();
                true
            }
            None => false,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MissionEvent> {
        self.inner.events.subscribe()
    }

    fn publish(&self, order: &Order) {
        let _ = self.inner.events.send(MissionEvent::Progressed(order.clone()));
    }

    /// Deregisters `id`, but only the registration made under `generation`.
    fn remove(&self, id: &str, generation: u64) {
        let removed = self
            .inner
            .missions
            .remove_if(id, |_, slot| slot.generation == generation)
            .is_some();
        if removed {
            info!(order_id = %id, active = self.active_count(), "Mission deregistered");
            let _ = self.inner.events.send(MissionEvent::Finished { id: id.to_string() });
        }
    }
}

impl Default for MissionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive right to fly one order.
///
/// Held by the running simulator. Publishing through the lease updates every
/// observer; dropping it removes the order from the registry.
pub struct MissionLease {
    id: String,
    generation: u64,
    live: watch::Sender<Order>,
    complete: CancellationToken,
    registry: MissionRegistry,
}

impl MissionLease {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Cancelled when someone calls [`MissionRegistry::complete`] for this order.
    pub fn completion(&self) -> &CancellationToken {
        &self.complete
    }

    /// Makes `order` the live state seen by lookups, watchers and subscribers.
    pub fn publish(&self, order: &Order) {
        self.live.send_replace(order.clone());
        self.registry.publish(order);
    }
}

impl Drop for MissionLease {
    fn drop(&mut self) {
        self.registry.remove(&self.id, self.generation);
    }
}
