//! Stop coordinates.

use serde::{Deserialize, Serialize};

/// A stop location in floating point degrees.
///
/// A stop is identified by the index of its coordinate in the input slice.
///
/// # Examples
///
/// ```
/// use delivery_routing::models::Coordinate;
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Straight-line distance to another coordinate, in degrees.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let dlat = other.lat - self.lat;
        let dlng = other.lng - self.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_symmetric() {
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(4.0, 6.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-12);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_lat_lng() {
        let c: Coordinate = serde_json::from_str(r#"{"lat": 43.65, "lng": -79.38}"#)
            .expect("valid coordinate");
        assert_eq!(c, Coordinate::new(43.65, -79.38));
    }
}
