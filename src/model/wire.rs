//! Wire form of an order as exchanged with the order store.
//!
//! Field names follow the remote interface (`originLat`, `isIncoming`, ...).
//! Timestamps travel as ISO-8601 strings.

use super::{Coord, Direction, MissionSchedule, Order, OrderError, Phase};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMsg {
    pub id: String,
    pub origin_address: String,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub destination_address: String,
    pub dest_lat: f64,
    pub dest_lng: f64,
    pub package_weight_kg: f64,
    pub status: String,
    pub progress: f64,
    pub is_incoming: bool,
    pub current_lat: f64,
    pub current_lng: f64,
    pub send_date: String,
    pub delivery_date: String,
}

/// Reply to a write on the remote interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResponse {
    pub success: bool,
    pub message: String,
}

impl ServerResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Reply to a list call on the remote interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderList {
    pub orders: Vec<OrderMsg>,
}

impl From<&Order> for OrderMsg {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            origin_address: order.origin_address.clone(),
            origin_lat: order.origin.lat,
            origin_lng: order.origin.lng,
            destination_address: order.destination_address.clone(),
            dest_lat: order.destination.lat,
            dest_lng: order.destination.lng,
            package_weight_kg: order.weight_kg,
            status: order.status_label(),
            progress: order.progress,
            is_incoming: order.direction == Direction::Incoming,
            current_lat: order.current.lat,
            current_lng: order.current.lng,
            send_date: order.send_time.to_rfc3339_opts(SecondsFormat::Millis, true),
            delivery_date: order.deliver_time.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl OrderMsg {
    /// Checks the fields a store must never accept.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.id.trim().is_empty() {
            return Err(OrderError::EmptyId);
        }
        if !(self.package_weight_kg.is_finite() && self.package_weight_kg > 0.0) {
            return Err(OrderError::InvalidWeight(self.package_weight_kg));
        }
        if !(0.0..=1.0).contains(&self.progress) {
            return Err(OrderError::InvalidProgress(self.progress));
        }
        Coord::new(self.origin_lat, self.origin_lng).validate()?;
        Coord::new(self.dest_lat, self.dest_lng).validate()?;
        Ok(())
    }

    /// Decodes the record into a domain order.
    ///
    /// Phase and current position are recomputed from `progress` through
    /// `schedule`. The one exception is a record whose `status` says delivered:
    /// someone else finished it, so it decodes as delivered whatever its progress.
    /// The `current*` fields on the wire are informational.
    pub fn into_order(self, schedule: &MissionSchedule) -> Result<Order, OrderError> {
        self.validate()?;
        let send_time = parse_timestamp("sendDate", &self.send_date)?;
        let deliver_time = parse_timestamp("deliveryDate", &self.delivery_date)?;
        let origin = Coord::new(self.origin_lat, self.origin_lng);

        let mut order = Order {
            id: self.id,
            origin_address: self.origin_address,
            destination_address: self.destination_address,
            origin,
            destination: Coord::new(self.dest_lat, self.dest_lng),
            current: origin,
            weight_kg: self.package_weight_kg,
            send_time,
            deliver_time,
            direction: if self.is_incoming {
                Direction::Incoming
            } else {
                Direction::Outgoing
            },
            progress: 0.0,
            phase: Phase::Packing,
        };
        if self.status.trim() == Phase::Delivered.name() {
            order.mark_delivered();
        } else {
            order.advance_to(self.progress, schedule);
        }
        Ok(order)
    }
}

/// Parses RFC 3339, falling back to a zone-less ISO-8601 date-time taken as UTC.
fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, OrderError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| OrderError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_order() -> Order {
        let schedule = MissionSchedule::default();
        let mut order = Order {
            id: "order-1".into(),
            origin_address: "Warszawa".into(),
            destination_address: "Kraków".into(),
            origin: Coord::new(52.23, 21.01),
            destination: Coord::new(50.06, 19.94),
            current: Coord::new(52.23, 21.01),
            weight_kg: 1.5,
            send_time: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
            deliver_time: Utc.with_ymd_and_hms(2025, 3, 2, 8, 0, 0).unwrap(),
            direction: Direction::Incoming,
            progress: 0.0,
            phase: Phase::Packing,
        };
        order.advance_to(0.5, &schedule);
        order
    }

    #[test]
    fn test_json_field_names() {
        let msg = OrderMsg::from(&sample_order());
        let json = serde_json::to_value(&msg).unwrap();

        for field in [
            "id", "originAddress", "originLat", "originLng", "destinationAddress", "destLat",
            "destLng", "packageWeightKg", "status", "progress", "isIncoming", "currentLat",
            "currentLng", "sendDate", "deliveryDate",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        assert_eq!(json["isIncoming"], true);
        assert_eq!(json["sendDate"], "2025-03-01T08:00:00.000Z");
        assert!(json["status"].as_str().unwrap().starts_with("in transit"));
    }

    #[test]
    fn test_decode_recomputes_phase_and_position() {
        let schedule = MissionSchedule::default();
        let mut msg = OrderMsg::from(&sample_order());
        msg.status = "something stale".into();
        msg.current_lat = 0.0;
        msg.progress = 0.97;

        let order = msg.into_order(&schedule).unwrap();
        assert_eq!(order.phase, Phase::Landing);
        assert!((order.current.lat - (52.23 + (50.06 - 52.23) * 0.97)).abs() < 1e-9);
        assert_eq!(order.direction, Direction::Incoming);
    }

    #[test]
    fn test_decode_honors_delivered_status() {
        let schedule = MissionSchedule::default();
        let mut msg = OrderMsg::from(&sample_order());
        msg.progress = 0.7;
        msg.status = "delivered".into();

        let order = msg.into_order(&schedule).unwrap();
        assert!(order.is_delivered());
        assert_eq!(order.progress, 1.0);
        assert_eq!(order.phase, schedule.phase_at(order.progress));
        assert!((order.current.lat - 50.06).abs() < 1e-9);
    }

    #[test]
    fn test_decode_accepts_zoneless_timestamps() {
        let schedule = MissionSchedule::default();
        let mut msg = OrderMsg::from(&sample_order());
        msg.send_date = "2025-03-01T08:00:00.0000000".into();

        let order = msg.into_order(&schedule).unwrap();
        assert_eq!(order.send_time, Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_rejects_bad_records() {
        let schedule = MissionSchedule::default();

        let mut msg = OrderMsg::from(&sample_order());
        msg.delivery_date = "tomorrow".into();
        assert!(matches!(
            msg.into_order(&schedule),
            Err(OrderError::InvalidTimestamp { field: "deliveryDate", .. })
        ));

        let mut msg = OrderMsg::from(&sample_order());
        msg.progress = 1.2;
        assert_eq!(msg.validate(), Err(OrderError::InvalidProgress(1.2)));

        let mut msg = OrderMsg::from(&sample_order());
        msg.id = " ".into();
        assert_eq!(msg.validate(), Err(OrderError::EmptyId));
    }

    #[test]
    fn test_server_response_json() {
        let json = serde_json::to_string(&ServerResponse::ok("OK")).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"OK"}"#);

        let list: OrderList = serde_json::from_str(r#"{"orders":[]}"#).unwrap();
        assert!(list.orders.is_empty());
    }
}
