use crate::framework::FrameworkError;
use crate::model::{OrderList, OrderMsg, ServerResponse};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reaching an order backend. A rejected write is not an error: it comes
/// back as a [`ServerResponse`] with `success == false`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Order store unavailable: {0}")]
    Unavailable(#[from] FrameworkError),

    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache encoding error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// The remote order interface.
///
/// - `list_orders` returns every stored record.
/// - `add_order` inserts when the id is new; a duplicate id is silently ignored.
/// - `update_order` replaces when the id exists; an unknown id is silently ignored.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn list_orders(&self) -> Result<OrderList, ServiceError>;

    async fn add_order(&self, order: OrderMsg) -> Result<ServerResponse, ServiceError>;

    async fn update_order(&self, order: OrderMsg) -> Result<ServerResponse, ServiceError>;
}
