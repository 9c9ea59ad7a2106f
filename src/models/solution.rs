//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;

/// A route whose distance exceeds its vehicle's ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Vehicle whose route is too long.
    pub vehicle_id: usize,
    /// Actual route distance.
    pub distance: i64,
    /// Maximum allowed distance.
    pub max_distance: i64,
}

impl Violation {
    /// Distance above the ceiling.
    pub fn excess(&self) -> i64 {
        self.distance - self.max_distance
    }
}

/// A complete assignment of stops to vehicles.
///
/// Holds one route per vehicle, in vehicle id order, including vehicles that
/// visit nothing.
///
/// # Examples
///
/// ```
/// use delivery_routing::models::{Route, Solution};
///
/// let sol = Solution::new(vec![Route::new(0, vec![2, 1], 30), Route::empty(1)]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.total_distance(), 30);
/// assert_eq!(sol.num_served(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    total_distance: i64,
}

impl Solution {
    /// Creates a solution, summing the route distances.
    pub fn new(routes: Vec<Route>) -> Self {
        let total_distance = routes.iter().map(Route::distance).sum();
        Self {
            routes,
            total_distance,
        }
    }

    /// Returns the routes in vehicle order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the route driven by `vehicle_id`, if that vehicle exists.
    pub fn route(&self, vehicle_id: usize) -> Option<&Route> {
        self.routes.iter().find(|r| r.vehicle_id() == vehicle_id)
    }

    /// Number of routes (one per vehicle).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    /// Total number of listed stops across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Longest minus shortest route distance.
    pub fn span(&self) -> i64 {
        let max = self.routes.iter().map(Route::distance).max().unwrap_or(0);
        let min = self.routes.iter().map(Route::distance).min().unwrap_or(0);
        max - min
    }

    /// All listed stops, sorted ascending. Duplicates are kept.
    pub fn served_stops(&self) -> Vec<usize> {
        let mut stops: Vec<usize> = self
            .routes
            .iter()
            .flat_map(|r| r.stops().iter().copied())
            .collect();
        stops.sort_unstable();
        stops
    }
}
