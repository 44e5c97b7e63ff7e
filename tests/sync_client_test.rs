use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use drone_mission::clients::{OrderService, OrderStoreClient, ServiceError};
use drone_mission::framework::mock::{create_mock_client, expect_replace, MockClient};
use drone_mission::framework::{FrameworkError, WriteOutcome};
use drone_mission::mission::{MissionEvent, MissionRegistry};
use drone_mission::model::{
    Coord, Direction, MissionSchedule, Order, OrderDraft, OrderError, OrderList, OrderMsg, ScheduleError,
    ServerResponse,
};
use drone_mission::sync::{RetryPolicy, SyncClient, SyncError};
use std::sync::Arc;
use std::time::Duration;

fn idle_schedule() -> MissionSchedule {
    MissionSchedule {
        steps: 100,
        step_delay_ms: 60_000,
        ..MissionSchedule::default()
    }
}

fn order_at(progress: f64, schedule: &MissionSchedule) -> Order {
    let now = Utc::now();
    let mut order = OrderDraft {
        origin_address: "Gdańsk".to_string(),
        destination_address: "Sopot".to_string(),
        origin: Coord::new(54.35, 18.65),
        destination: Coord::new(54.44, 18.56),
        weight_kg: 0.8,
        send_time: now,
        deliver_time: now + ChronoDuration::minutes(30),
        direction: Direction::Outgoing,
    }
    .into_order(schedule)
    .unwrap();
    order.advance_to(progress, schedule);
    order
}

fn sync_client(mock: &MockClient<OrderMsg>, schedule: MissionSchedule, retry: RetryPolicy) -> SyncClient {
    SyncClient::new(
        Arc::new(OrderStoreClient::new(mock.client())),
        MissionRegistry::new(),
        schedule,
        retry,
    )
    .unwrap()
}

/// Pattern: Client + Mock
/// - Real SyncClient and registry
/// - Mocked store replies
#[tokio::test]
async fn test_unreachable_store_reads_as_empty() {
    let mut mock = MockClient::<OrderMsg>::new();
    mock.expect_list().return_err(FrameworkError::ActorClosed);

    let sync = sync_client(&mock, idle_schedule(), RetryPolicy::none());
    let view = sync.load_and_resume().await;

    assert!(view.is_empty());
    assert!(view.resumed.is_empty());
    assert_eq!(sync.registry().active_count(), 0);
    mock.verify();
}

#[tokio::test]
async fn test_pull_is_retried_then_resumes() {
    let schedule = idle_schedule();
    let pending = order_at(0.25, &schedule);

    let mut mock = MockClient::<OrderMsg>::new();
    mock.expect_list().return_err(FrameworkError::ActorClosed);
    mock.expect_list().return_ok(vec![OrderMsg::from(&pending)]);

    let retry = RetryPolicy {
        max_attempts: 2,
        retry_backoff_ms: 1,
    };
    let sync = sync_client(&mock, schedule, retry);
    let view = sync.load_and_resume().await;

    assert_eq!(view.resumed, vec![pending.id.clone()]);
    assert_eq!(view.find(&pending.id).unwrap().progress, 0.25);
    assert!(sync.registry().is_active(&pending.id));
    mock.verify();

    sync.shutdown().await;
    assert_eq!(sync.registry().active_count(), 0);
}

#[tokio::test]
async fn test_undecodable_records_are_skipped() {
    let schedule = idle_schedule();
    let good = order_at(0.5, &schedule);
    let mut broken = OrderMsg::from(&order_at(0.1, &schedule));
    broken.send_date = "yesterday".to_string();

    let mut mock = MockClient::<OrderMsg>::new();
    mock.expect_list().return_ok(vec![broken, OrderMsg::from(&good)]);

    let sync = sync_client(&mock, schedule, RetryPolicy::none());
    let view = sync.load_and_resume().await;

    assert_eq!(view.len(), 1);
    assert!(view.find(&good.id).is_some());
    sync.shutdown().await;
}

#[tokio::test]
async fn test_mission_flies_even_when_create_fails() {
    let schedule = idle_schedule();
    let order = order_at(0.0, &schedule);

    let mut mock = MockClient::<OrderMsg>::new();
    mock.expect_insert().return_err(FrameworkError::ActorClosed);

    let sync = sync_client(&mock, schedule, RetryPolicy::none());
    let result = sync.create(order.clone()).await;

    assert!(matches!(result, Err(SyncError::Service(_))));
    assert!(sync.registry().is_active(&order.id));
    mock.verify();
    sync.shutdown().await;
}

#[tokio::test]
async fn test_refused_write_is_reported() {
    let schedule = idle_schedule();
    let order = order_at(0.0, &schedule);

    let mut mock = MockClient::<OrderMsg>::new();
    mock.expect_insert()
        .return_err(FrameworkError::EntityError(Box::new(OrderError::EmptyId)));

    let sync = sync_client(&mock, schedule, RetryPolicy::none());
    match sync.create(order).await {
        Err(SyncError::Rejected(message)) => assert!(message.contains("id")),
        other => panic!("Expected rejection, got {:?}", other),
    }
    sync.shutdown().await;
}

/// Pattern: Raw channel
/// A mission resumed at 0.52 pushes only progress at or above 0.52, in order,
/// ending with the delivered record.
#[tokio::test]
async fn test_resumed_mission_pushes_monotonic_progress() {
    let schedule = MissionSchedule {
        steps: 20,
        step_delay_ms: 1,
        publish_every: 5,
        ..MissionSchedule::default()
    };
    let order = order_at(0.52, &schedule);

    let (client, mut receiver) = create_mock_client::<OrderMsg>(16);
    let sync = SyncClient::new(
        Arc::new(OrderStoreClient::new(client)),
        MissionRegistry::new(),
        schedule,
        RetryPolicy::none(),
    )
    .unwrap();
    assert!(sync.start_mission(order.clone()));

    // Resumes at step 10, pushes at steps 10, 15 and 20, then the delivered flush.
    let mut pushed = Vec::new();
    for _ in 0..4 {
        let (record, respond_to) = expect_replace(&mut receiver).await.expect("Expected a replace");
        assert_eq!(record.id, order.id);
        pushed.push((record.progress, record.status.clone()));
        let _ = respond_to.send(Ok(WriteOutcome::Replaced));
    }

    let progress: Vec<f64> = pushed.iter().map(|(p, _)| *p).collect();
    assert_eq!(progress[0], 0.52);
    assert!(progress.windows(2).all(|w| w[0] <= w[1]), "{:?}", progress);
    assert_eq!(pushed[3], (1.0, "delivered".to_string()));

    sync.shutdown().await;
}

/// Another client marked the order delivered before it reached 1.0; pulling it
/// must not fly it again.
#[tokio::test]
async fn test_pulled_delivered_status_is_not_resumed() {
    let schedule = idle_schedule();
    let order = order_at(0.7, &schedule);
    let mut record = OrderMsg::from(&order);
    record.status = "delivered".to_string();

    let mut mock = MockClient::<OrderMsg>::new();
    mock.expect_list().return_ok(vec![record]);

    let sync = sync_client(&mock, schedule, RetryPolicy::none());
    let view = sync.load_and_resume().await;

    assert!(view.resumed.is_empty());
    let pulled = view.find(&order.id).unwrap();
    assert!(pulled.is_delivered());
    assert_eq!(pulled.progress, 1.0);
    assert!(!sync.registry().is_active(&order.id));
    mock.verify();
}

#[tokio::test]
async fn test_store_client_get_forwards_reply() {
    let schedule = idle_schedule();
    let record = OrderMsg::from(&order_at(0.4, &schedule));

    let mut mock = MockClient::<OrderMsg>::new();
    mock.expect_get().return_ok(Some(record.clone()));
    mock.expect_get().return_ok(None);

    let client = OrderStoreClient::new(mock.client());
    assert_eq!(client.get(record.id.clone()).await.unwrap(), Some(record));
    assert_eq!(client.get("missing").await.unwrap(), None);
    mock.verify();
}

#[test]
fn test_unusable_schedule_is_refused() {
    let schedule = MissionSchedule {
        publish_every: 0,
        ..MissionSchedule::default()
    };
    let (client, _receiver) = create_mock_client::<OrderMsg>(1);

    let result = SyncClient::new(
        Arc::new(OrderStoreClient::new(client)),
        MissionRegistry::new(),
        schedule,
        RetryPolicy::none(),
    );
    assert!(matches!(result, Err(ScheduleError::ZeroPublishInterval)));
}

/// Backend whose update path panics, taking the simulator task down with it.
struct PanickingService;

#[async_trait]
impl OrderService for PanickingService {
    async fn list_orders(&self) -> Result<OrderList, ServiceError> {
        Ok(OrderList::default())
    }

    async fn add_order(&self, _order: OrderMsg) -> Result<ServerResponse, ServiceError> {
        Ok(ServerResponse::ok("inserted"))
    }

    async fn update_order(&self, _order: OrderMsg) -> Result<ServerResponse, ServiceError> {
        panic!("update path blew up");
    }
}

/// A simulator that panics mid-flight is logged and deregistered, so the order
/// can be started again.
#[tokio::test]
async fn test_panicking_mission_is_released() {
    let schedule = MissionSchedule {
        steps: 4,
        step_delay_ms: 1,
        publish_every: 1,
        ..MissionSchedule::default()
    };
    let order = order_at(0.0, &schedule);
    let sync = SyncClient::new(
        Arc::new(PanickingService),
        MissionRegistry::new(),
        schedule,
        RetryPolicy::none(),
    )
    .unwrap();
    let mut events = sync.registry().subscribe();

    assert!(sync.start_mission(order.clone()));
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(MissionEvent::Finished { id }) = events.recv().await {
                if id == order.id {
                    break;
                }
            }
        }
    })
    .await
    .expect("Panicked mission was never released");

    assert!(!sync.registry().is_active(&order.id));
    assert!(sync.start_mission(order.clone()));
    sync.shutdown().await;
    assert_eq!(sync.registry().active_count(), 0);
}
