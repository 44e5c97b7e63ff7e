//! Typed access to the places orders are stored.
//!
//! [`OrderService`] is the logical remote interface (list / add / update). It is
//! implemented by [`OrderStoreClient`], which wraps the generic
//! [`StoreClient`](crate::framework::StoreClient) of the order store actor, and by
//! [`FileCache`], a local JSON file used as an offline backend.

pub mod file_cache;
pub mod order_service;
pub mod order_store_client;

pub use file_cache::*;
pub use order_service::*;
pub use order_store_client::*;
