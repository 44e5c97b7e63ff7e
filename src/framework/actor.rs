//! # Generic Store Actor
//!
//! The `StoreActor` owns a keyed collection of records and processes requests
//! sequentially, so every read-all, existence check and write happens inside one
//! mutual-exclusion domain without explicit locks.

use super::client::StoreClient;
use super::entity::StoreEntity;
use super::error::FrameworkError;
use super::message::{StoreRequest, WriteOutcome};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// **Concurrency Model**:
/// Any number of clients may hold a [`StoreClient`] and issue requests at the same
/// time. The actor drains its mailbox one message at a time, so a concurrent
/// insert and replace for the same id can never interleave and lose an update.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: HashMap<T::Id, T>,
}

impl<T: StoreEntity> StoreActor<T> {
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        let client = StoreClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` argument is passed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::List { respond_to } => {
                    let records: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, count = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::Insert { record, respond_to } => {
                    let result = self.insert(record, &context).await;
                    let _ = respond_to.send(result);
                }
                StoreRequest::Replace { record, respond_to } => {
                    let result = self.replace(record, &context).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn insert(&mut self, record: T, context: &T::Context) -> Result<WriteOutcome, FrameworkError> {
        let id = record.id();
        if self.store.contains_key(&id) {
            info!(%id, "Duplicate insert ignored");
            return Ok(WriteOutcome::Ignored);
        }
        if let Err(e) = record.on_insert(context).await {
            warn!(%id, error = %e, "Insert rejected");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        self.store.insert(id.clone(), record);
        info!(%id, size = self.store.len(), "Inserted");
        Ok(WriteOutcome::Inserted)
    }

    async fn replace(&mut self, record: T, context: &T::Context) -> Result<WriteOutcome, FrameworkError> {
        let id = record.id();
        let Some(previous) = self.store.get(&id) else {
            debug!(%id, "Replace for unknown id ignored");
            return Ok(WriteOutcome::Ignored);
        };
        if let Err(e) = record.on_replace(previous, context).await {
            warn!(%id, error = %e, "Replace rejected");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        debug!(%id, "Replaced");
        self.store.insert(id, record);
        Ok(WriteOutcome::Replaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Beacon {
        id: String,
        level: u32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("level may not decrease")]
    struct BeaconError;

    #[async_trait]
    impl StoreEntity for Beacon {
        type Id = String;
        type Context = ();
        type Error = BeaconError;

        fn id(&self) -> String {
            self.id.clone()
        }

        async fn on_replace(&self, previous: &Self, _ctx: &()) -> Result<(), BeaconError> {
            if self.level < previous.level {
                return Err(BeaconError);
            }
            Ok(())
        }
    }

    fn beacon(id: &str, level: u32) -> Beacon {
        Beacon { id: id.into(), level }
    }

    #[tokio::test]
    async fn test_insert_then_replace() {
        let (actor, client) = StoreActor::<Beacon>::new(8);
        tokio::spawn(actor.run(()));

        assert_eq!(client.insert(beacon("a", 1)).await.unwrap(), WriteOutcome::Inserted);
        assert_eq!(client.insert(beacon("a", 9)).await.unwrap(), WriteOutcome::Ignored);
        assert_eq!(client.get("a".into()).await.unwrap(), Some(beacon("a", 1)));

        assert_eq!(client.replace(beacon("a", 2)).await.unwrap(), WriteOutcome::Replaced);
        assert_eq!(client.replace(beacon("b", 2)).await.unwrap(), WriteOutcome::Ignored);

        let all = client.list().await.unwrap();
        assert_eq!(all, vec![beacon("a", 2)]);
    }

    #[tokio::test]
    async fn test_hook_rejection_keeps_previous_record() {
        let (actor, client) = StoreActor::<Beacon>::new(8);
        tokio::spawn(actor.run(()));

        client.insert(beacon("a", 5)).await.unwrap();
        let result = client.replace(beacon("a", 3)).await;
        assert!(matches!(result, Err(FrameworkError::EntityError(_))));
        assert_eq!(client.get("a".into()).await.unwrap(), Some(beacon("a", 5)));
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let (actor, client) = StoreActor::<Beacon>::new(8);
        drop(actor);
        assert!(matches!(client.list().await, Err(FrameworkError::ActorClosed)));
    }
}
