use crate::clients::{OrderService, OrderStoreClient};
use crate::lifecycle::{Config, ConfigError};
use crate::mission::MissionRegistry;
use crate::model::{Order, OrderDraft, OrderError};
use crate::sync::{ReconciledView, SyncClient};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runtime orchestrator for the delivery simulation.
///
/// `DroneSystem` is responsible for:
/// - **Lifecycle Management**: starting the order store actor and stopping every
///   running mission
/// - **Dependency Wiring**: handing the chosen [`OrderService`] and the shared
///   [`MissionRegistry`] to the [`SyncClient`]
///
/// # Example
///
/// ```ignore
/// let system = DroneSystem::new(&Config::default())?;
/// let order = system.send(draft).await?;
/// let view = system.sync.load_and_resume().await;
/// system.shutdown().await?;
/// ```
pub struct DroneSystem {
    /// Synchronization entry point; also starts missions.
    pub sync: SyncClient,

    /// Live missions, shared with `sync`.
    pub registry: MissionRegistry,

    /// Direct handle to the in-process order store, when one was started.
    pub store: Option<OrderStoreClient>,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DroneSystem {
    /// Starts an in-process order store and wires a sync client to it.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let (store_actor, store_client) = crate::order_store::new(config.store.buffer_size);

        let mut system = Self::with_service(config, Arc::new(store_client.clone()))?;
        system.handles.push(tokio::spawn(store_actor.run(())));
        system.store = Some(store_client);
        Ok(system)
    }

    /// Wires a sync client to an existing backend, such as a
    /// [`FileCache`](crate::clients::FileCache).
    pub fn with_service(config: &Config, service: Arc<dyn OrderService>) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = MissionRegistry::new();
        let sync = SyncClient::new(
            service,
            registry.clone(),
            config.mission.clone(),
            config.sync.clone(),
        )?;
        Ok(Self {
            sync,
            registry,
            store: None,
            handles: Vec::new(),
        })
    }

    /// Creates an order from `draft`, stores it and starts its mission.
    ///
    /// Failing to reach the store is logged, not returned: the mission flies anyway.
    pub async fn send(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        let order = draft.into_order(self.sync.schedule())?;
        info!(order_id = %order.id, route_km = order.route_km(), "Sending package");

        if let Err(e) = self.sync.create(order.clone()).await {
            warn!(order_id = %order.id, error = %e, "Order not stored; flying locally");
        }
        Ok(order)
    }

    /// Pulls the store and resumes undelivered missions.
    pub async fn reload(&self) -> ReconciledView {
        self.sync.load_and_resume().await
    }

    /// Stops every mission, then the order store.
    ///
    /// Missions are interrupted, not delivered. The store actor exits once the
    /// last client is dropped.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        self.sync.shutdown().await;

        drop(self.sync);
        drop(self.store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
