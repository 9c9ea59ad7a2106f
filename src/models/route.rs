//! Per-vehicle route type.

use serde::{Deserialize, Serialize};

/// An ordered sequence of stops assigned to a single vehicle.
///
/// `distance` always covers depot → first stop → … → last stop → depot.
/// Fleet routes from [`optimize`](crate::solver::optimize) leave the depot out
/// of `stops`; the tour from [`recalculate`](crate::solver::recalculate)
/// lists it first.
///
/// # Examples
///
/// ```
/// use delivery_routing::models::Route;
///
/// let route = Route::new(1, vec![4, 2], 250);
/// assert_eq!(route.vehicle_id(), 1);
/// assert_eq!(route.stops(), &[4, 2]);
/// assert_eq!(route.distance(), 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<usize>,
    distance: i64,
}

impl Route {
    /// Creates a route.
    pub fn new(vehicle_id: usize, stops: Vec<usize>, distance: i64) -> Self {
        Self {
            vehicle_id,
            stops,
            distance,
        }
    }

    /// Creates an empty route for the given vehicle.
    pub fn empty(vehicle_id: usize) -> Self {
        Self::new(vehicle_id, Vec::new(), 0)
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the stop indices in visiting order.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Number of listed stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the vehicle visits nothing.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Total route distance.
    pub fn distance(&self) -> i64 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::empty(2);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 2);
        assert_eq!(r.distance(), 0);
    }

    #[test]
    fn test_route_serializes_fields() {
        let r = Route::new(0, vec![3, 1], 42);
        let value = serde_json::to_value(&r).expect("serializable");
        assert_eq!(value["vehicle_id"], 0);
        assert_eq!(value["stops"], serde_json::json!([3, 1]));
        assert_eq!(value["distance"], 42);
    }
}
