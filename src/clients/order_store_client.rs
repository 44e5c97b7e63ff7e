use crate::clients::{OrderService, ServiceError};
use crate::framework::{FrameworkError, StoreClient, WriteOutcome};
use crate::model::{OrderList, OrderMsg, ServerResponse};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the order store actor.
#[derive(Clone)]
pub struct OrderStoreClient {
    inner: StoreClient<OrderMsg>,
}

impl OrderStoreClient {
    pub fn new(inner: StoreClient<OrderMsg>) -> Self {
        Self { inner }
    }

    pub async fn get(&self, id: impl Into<String>) -> Result<Option<OrderMsg>, ServiceError> {
        Ok(self.inner.get(id.into()).await?)
    }

    /// Validation failures become a negative reply; channel failures stay errors.
    fn into_response(result: Result<WriteOutcome, FrameworkError>) -> Result<ServerResponse, ServiceError> {
        match result {
            Ok(WriteOutcome::Inserted) => Ok(ServerResponse::ok("inserted")),
            Ok(WriteOutcome::Replaced) => Ok(ServerResponse::ok("replaced")),
            Ok(WriteOutcome::Ignored) => Ok(ServerResponse::ok("ignored")),
            Err(FrameworkError::EntityError(e)) => Ok(ServerResponse::rejected(e.to_string())),
            Err(e) => Err(ServiceError::Unavailable(e)),
        }
    }
}

#[async_trait]
impl OrderService for OrderStoreClient {
    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<OrderList, ServiceError> {
        debug!("Sending request");
        let orders = self.inner.list().await?;
        Ok(OrderList { orders })
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn add_order(&self, order: OrderMsg) -> Result<ServerResponse, ServiceError> {
        debug!("Sending request");
        Self::into_response(self.inner.insert(order).await)
    }

    #[instrument(skip(self, order), fields(order_id = %order.id, progress = order.progress))]
    async fn update_order(&self, order: OrderMsg) -> Result<ServerResponse, ServiceError> {
        debug!("Sending request");
        Self::into_response(self.inner.replace(order).await)
    }
}
