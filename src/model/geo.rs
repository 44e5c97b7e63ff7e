//! Geographic points and the two operations missions need on them.

use super::OrderError;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

impl Coord {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn validate(&self) -> Result<(), OrderError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(OrderError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }

    /// Linear interpolation towards `to`, each axis independently.
    ///
    /// `t = 0` yields `self`, `t = 1` yields `to`.
    pub fn lerp(&self, to: &Coord, t: f64) -> Coord {
        Coord {
            lat: self.lat + (to.lat - self.lat) * t,
            lng: self.lng + (to.lng - self.lng) * t,
        }
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(&self, to: &Coord) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), to.lat.to_radians());
        let dlat = lat2 - lat1;
        let dlng = (to.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WARSAW: Coord = Coord { lat: 52.23, lng: 21.01 };
    const KRAKOW: Coord = Coord { lat: 50.06, lng: 19.94 };

    #[test]
    fn test_lerp_midpoint() {
        let mid = WARSAW.lerp(&KRAKOW, 0.5);
        assert!((mid.lat - 51.145).abs() < 1e-9);
        assert!((mid.lng - 20.475).abs() < 1e-9);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(WARSAW.lerp(&KRAKOW, 0.0), WARSAW);
        let end = WARSAW.lerp(&KRAKOW, 1.0);
        assert!((end.lat - KRAKOW.lat).abs() < 1e-12);
        assert!((end.lng - KRAKOW.lng).abs() < 1e-12);
    }

    #[test]
    fn test_distance_warsaw_krakow() {
        // Roughly 252 km as the crow flies.
        let km = WARSAW.distance_km(&KRAKOW);
        assert!((km - 252.0).abs() < 3.0, "got {km}");
        assert_eq!(WARSAW.distance_km(&WARSAW), 0.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(WARSAW.validate().is_ok());
        assert!(Coord::new(91.0, 0.0).validate().is_err());
        assert!(Coord::new(0.0, -180.5).validate().is_err());
        assert!(Coord::new(f64::NAN, 0.0).validate().is_err());
    }
}
