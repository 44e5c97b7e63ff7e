//! Local offline copy of the order store, kept in a single JSON file.
//!
//! Writes follow the same rules as the remote store: insert only when the id is
//! new, replace only when it exists. Every call reads and rewrites the whole file
//! under one async mutex.

use crate::clients::{OrderService, ServiceError};
use crate::model::{OrderList, OrderMsg, ServerResponse};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

pub struct FileCache {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<OrderMsg>, ServiceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, orders: &[OrderMsg]) -> Result<(), ServiceError> {
        let bytes = serde_json::to_vec_pretty(orders)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderService for FileCache {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn list_orders(&self) -> Result<OrderList, ServiceError> {
        let _guard = self.lock.lock().await;
        let orders = self.load().await?;
        debug!(count = orders.len(), "Loaded cache");
        Ok(OrderList { orders })
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn add_order(&self, order: OrderMsg) -> Result<ServerResponse, ServiceError> {
        if let Err(e) = order.validate() {
            return Ok(ServerResponse::rejected(e.to_string()));
        }
        let _guard = self.lock.lock().await;
        let mut orders = self.load().await?;
        if orders.iter().any(|o| o.id == order.id) {
            info!("Duplicate insert ignored");
            return Ok(ServerResponse::ok("ignored"));
        }
        orders.push(order);
        self.save(&orders).await?;
        Ok(ServerResponse::ok("inserted"))
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn update_order(&self, order: OrderMsg) -> Result<ServerResponse, ServiceError> {
        if let Err(e) = order.validate() {
            return Ok(ServerResponse::rejected(e.to_string()));
        }
        let _guard = self.lock.lock().await;
        let mut orders = self.load().await?;
        let Some(slot) = orders.iter_mut().find(|o| o.id == order.id) else {
            debug!("Replace for unknown id ignored");
            return Ok(ServerResponse::ok("ignored"));
        };
        *slot = order;
        self.save(&orders).await?;
        Ok(ServerResponse::ok("replaced"))
    }
}
