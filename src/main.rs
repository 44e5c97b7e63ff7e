//! Demo: flies one package from Warsaw to Kraków, then reloads the order list.
//!
//! The first CLI argument, if present, is the path of a TOML config file.

use chrono::{Duration, Utc};
use drone_mission::lifecycle::{setup_tracing, Config, DroneSystem};
use drone_mission::mission::MissionEvent;
use drone_mission::model::{Coord, Direction, OrderDraft};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };
    info!(
        steps = config.mission.steps,
        step_delay_ms = config.mission.step_delay_ms,
        "Starting drone mission demo"
    );

    let system = DroneSystem::new(&config).map_err(|e| e.to_string())?;
    let mut events = system.registry.subscribe();

    let now = Utc::now();
    let draft = OrderDraft {
        origin_address: "Plac Defilad 1, Warszawa".to_string(),
        destination_address: "Rynek Główny 1, Kraków".to_string(),
        origin: Coord::new(52.2297, 21.0122),
        destination: Coord::new(50.0614, 19.9366),
        weight_kg: 2.5,
        send_time: now,
        deliver_time: now + Duration::hours(2),
        direction: Direction::Outgoing,
    };

    let span = tracing::info_span!("send_package");
    let order = async { system.send(draft).await.map_err(|e| e.to_string()) }
        .instrument(span)
        .await?;
    info!(order_id = %order.id, route_km = order.route_km(), "Package sent");

    // Watch the flight for a while.
    let watch_for = config.mission.step_delay() * config.mission.steps.min(100);
    let observed = tokio::time::timeout(watch_for, async {
        while let Ok(event) = events.recv().await {
            match event {
                MissionEvent::Progressed(order) => {
                    info!(order_id = %order.id, status = %order.status_label(), progress = order.progress, "Update")
                }
                MissionEvent::Finished { id } => {
                    info!(order_id = %id, "Mission finished");
                    break;
                }
                MissionEvent::Started { .. } => {}
            }
        }
    })
    .await;
    if observed.is_err() {
        info!("Leaving the package in the air");
    }

    // Reloading sees the pushed state and does not fly the order twice.
    let view = system.reload().await;
    match view.find(&order.id) {
        Some(current) => info!(
            order_id = %current.id,
            status = %current.status_label(),
            resumed = view.resumed.len(),
            "Reconciled"
        ),
        None => error!(order_id = %order.id, "Order missing from store"),
    }

    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
