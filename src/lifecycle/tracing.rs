//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ```bash
//! # Mission lifecycle and phase changes
//! RUST_LOG=info cargo run
//!
//! # Every push to the store, reconciliation decisions, store requests
//! RUST_LOG=debug cargo run
//!
//! # Only the simulator
//! RUST_LOG=drone_mission::mission=debug cargo run
//! ```
//!
//! Log lines carry the order id as a structured field, so one mission can be
//! followed with a plain filter:
//!
//! ```text
//! INFO Mission registered order_id=6f1c... active=1
//! INFO Mission started order_id=6f1c... start_step=0 steps=600 route_km=252.56
//! INFO Phase changed order_id=6f1c... phase=ascending
//! INFO Phase changed order_id=6f1c... phase=in transit
//! WARN Update lost; flight continues order_id=6f1c... progress=0.5 error=Order store unavailable: Actor closed
//! INFO Mission delivered order_id=6f1c...
//! INFO Mission deregistered order_id=6f1c... active=0
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
