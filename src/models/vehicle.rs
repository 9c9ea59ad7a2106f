//! Vehicle type with a route distance ceiling.

use crate::config::DEFAULT_MAX_DISTANCE;

/// A vehicle that starts and ends its route at the depot.
///
/// # Examples
///
/// ```
/// use delivery_routing::models::Vehicle;
///
/// let v = Vehicle::new(0).with_max_distance(1_000);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.max_distance(), 1_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: usize,
    depot_id: usize,
    max_distance: i64,
}

impl Vehicle {
    /// Creates a vehicle at depot 0 with the default ceiling.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            depot_id: 0,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    /// Builds `count` identical vehicles sharing one depot and ceiling.
    pub fn fleet(count: usize, depot_id: usize, max_distance: i64) -> Vec<Vehicle> {
        (0..count)
            .map(|id| {
                Vehicle::new(id)
                    .with_depot(depot_id)
                    .with_max_distance(max_distance)
            })
            .collect()
    }

    /// Sets the depot for this vehicle.
    pub fn with_depot(mut self, depot_id: usize) -> Self {
        self.depot_id = depot_id;
        self
    }

    /// Sets maximum route distance.
    pub fn with_max_distance(mut self, max: i64) -> Self {
        self.max_distance = max;
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Depot location (start and end of route).
    pub fn depot_id(&self) -> usize {
        self.depot_id
    }

    /// Maximum cumulative route distance.
    pub fn max_distance(&self) -> i64 {
        self.max_distance
    }

    /// Distance above the ceiling, zero when within it.
    pub fn excess(&self, distance: i64) -> i64 {
        (distance - self.max_distance).max(0)
    }
}
