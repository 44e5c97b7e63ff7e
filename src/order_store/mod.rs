//! The authoritative order registry shared by every client.
//!
//! The store is a [`StoreActor`] over [`OrderMsg`] records: it keeps whatever the
//! clients last wrote, keyed by order id, and never notifies anyone of changes.
//! Clients pull with `list` and push with `insert` (create) or `replace` (update).

pub mod entity;

use crate::clients::OrderStoreClient;
use crate::framework::StoreActor;
use crate::model::OrderMsg;

/// Mailbox size used when no configuration is supplied.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Creates a new order store actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<OrderMsg>, OrderStoreClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size);
    let client = OrderStoreClient::new(generic_client);
    (actor, client)
}
