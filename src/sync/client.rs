use crate::clients::OrderService;
use crate::mission::{MissionError, MissionOutcome, MissionRegistry, MissionSimulator, UpdateSink};
use crate::model::{Direction, MissionSchedule, Order, OrderMsg, ScheduleError, ServerResponse};
use crate::sync::{RetryPolicy, SyncError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Orders as a session sees them after pulling from the store.
#[derive(Debug, Clone, Default)]
pub struct ReconciledView {
    pub outgoing: Vec<Order>,
    pub incoming: Vec<Order>,
    /// Ids of the missions this pull started.
    pub resumed: Vec<String>,
}

impl ReconciledView {
    pub fn find(&self, id: &str) -> Option<&Order> {
        self.outgoing
            .iter()
            .chain(self.incoming.iter())
            .find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type MissionResult = (String, Result<MissionOutcome, MissionError>);

/// Keeps the local missions and the order store in step.
///
/// Cheap to clone; clones share the backend, the registry and the set of running
/// simulator tasks. Every simulator holds a clone to push its updates.
#[derive(Clone)]
pub struct SyncClient {
    service: Arc<dyn OrderService>,
    registry: MissionRegistry,
    schedule: MissionSchedule,
    retry: RetryPolicy,
    shutdown: CancellationToken,
    tasks: Arc<Mutex<JoinSet<MissionResult>>>,
}

impl SyncClient {
    /// Fails when `schedule` could not drive a mission.
    pub fn new(
        service: Arc<dyn OrderService>,
        registry: MissionRegistry,
        schedule: MissionSchedule,
        retry: RetryPolicy,
    ) -> Result<Self, ScheduleError> {
        schedule.validate()?;
        Ok(Self {
            service,
            registry,
            schedule,
            retry,
            shutdown: CancellationToken::new(),
            tasks: Arc::new(Mutex::new(JoinSet::new())),
        })
    }

    pub fn registry(&self) -> &MissionRegistry {
        &self.registry
    }

    pub fn schedule(&self) -> &MissionSchedule {
        &self.schedule
    }

    /// Pulls every order, prefers the live copy of any order already flying here,
    /// sorts them by direction, and resumes every undelivered order nobody flies.
    ///
    /// A failed pull is treated as an empty store.
    #[instrument(skip(self))]
    pub async fn load_and_resume(&self) -> ReconciledView {
        let service = &self.service;
        let pulled = match self.retry.run("list_orders", move || service.list_orders()).await {
            Ok(list) => list.orders,
            Err(e) => {
                warn!(error = %e, "Could not pull orders; continuing with none");
                Vec::new()
            }
        };

        let mut view = ReconciledView::default();
        for record in pulled {
            let snapshot = match record.into_order(&self.schedule) {
                Ok(order) => order,
                Err(e) => {
                    warn!(error = %e, "Skipping undecodable order");
                    continue;
                }
            };

            let order = match self.registry.lookup(&snapshot.id) {
                Some(live) => {
                    debug!(
                        order_id = %live.id,
                        snapshot_progress = snapshot.progress,
                        live_progress = live.progress,
                        "Using live order instead of pulled snapshot"
                    );
                    live
                }
                None => snapshot,
            };

            if !order.is_delivered() && self.start_mission(order.clone()) {
                view.resumed.push(order.id.clone());
            }
            match order.direction {
                Direction::Outgoing => view.outgoing.push(order),
                Direction::Incoming => view.incoming.push(order),
            }
        }

        info!(
            outgoing = view.outgoing.len(),
            incoming = view.incoming.len(),
            resumed = view.resumed.len(),
            "Orders reconciled"
        );
        view
    }

    /// Stores a new order and starts flying it.
    ///
    /// The mission starts even when the store cannot be reached; the returned
    /// error only reports that the store may not know about the order.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn create(&self, order: Order) -> Result<ServerResponse, SyncError> {
        let service = &self.service;
        let msg = OrderMsg::from(&order);
        let pushed = self
            .retry
            .run("add_order", move || service.add_order(msg.clone()))
            .await
            .map_err(SyncError::from)
            .and_then(accepted);

        if !self.start_mission(order) {
            warn!("Mission not started");
        }
        pushed
    }

    /// Pushes the current state of `order` through the store's update path.
    pub async fn push_update(&self, order: &Order) -> Result<ServerResponse, SyncError> {
        let service = &self.service;
        let msg = OrderMsg::from(order);
        self.retry
            .run("update_order", move || service.update_order(msg.clone()))
            .await
            .map_err(SyncError::from)
            .and_then(accepted)
    }

    /// Registers `order` and spawns its simulator, unless it is delivered, already
    /// flying, or the client is shutting down.
    pub fn start_mission(&self, order: Order) -> bool {
        if order.is_delivered() || self.shutdown.is_cancelled() {
            return false;
        }
        let Some(lease) = self.registry.try_start(order.clone()) else {
            return false;
        };

        let id = order.id.clone();
        let simulator = MissionSimulator::new(
            lease,
            order,
            self.schedule.clone(),
            self.clone(),
            self.shutdown.child_token(),
        );

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        while let Some(finished) = tasks.try_join_next() {
            log_finished(finished);
        }
        tasks.spawn(async move { (id, simulator.run().await) });
        true
    }

    /// Stops every simulator and waits for them to exit. Interrupted missions keep
    /// their last pushed progress and can be resumed by a later session.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let mut tasks = {
            let mut guard = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        info!(missions = tasks.len(), "Stopping missions");
        while let Some(finished) = tasks.join_next().await {
            log_finished(finished);
        }
    }
}

#[async_trait]
impl UpdateSink for SyncClient {
    async fn push_update(&self, order: &Order) -> Result<ServerResponse, SyncError> {
        SyncClient::push_update(self, order).await
    }
}

/// Reports how a reaped simulator task ended. A panicked simulator has already
/// released its lease while unwinding.
fn log_finished(finished: Result<MissionResult, JoinError>) {
    match finished {
        Ok((id, Ok(outcome))) => debug!(order_id = %id, ?outcome, "Mission task finished"),
        Ok((id, Err(e))) => error!(order_id = %id, error = %e, "Mission failed"),
        Err(e) => error!(panicked = e.is_panic(), error = %e, "Mission task failed"),
    }
}

fn accepted(reply: ServerResponse) -> Result<ServerResponse, SyncError> {
    if reply.success {
        Ok(reply)
    } else {
        Err(SyncError::Rejected(reply.message))
    }
}
