//! # Store Messages
//!
//! Request and reply types exchanged between [`StoreClient`](super::StoreClient)
//! and [`StoreActor`](super::StoreActor).

use super::entity::StoreEntity;
use super::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// What a write did to the store.
///
/// Writes that do not apply are reported as [`WriteOutcome::Ignored`] rather than
/// as errors: a duplicate insert or a replace for an unknown id leaves the store untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Inserted,
    Replaced,
    Ignored,
}

/// Internal message type sent to the actor.
///
/// - **List**: snapshot of every record, iteration order unspecified.
/// - **Get**: one record by id.
/// - **Insert**: store the record only if its id is absent.
/// - **Replace**: overwrite the record only if its id is present.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Insert {
        record: T,
        respond_to: Response<WriteOutcome>,
    },
    Replace {
        record: T,
        respond_to: Response<WriteOutcome>,
    },
}
