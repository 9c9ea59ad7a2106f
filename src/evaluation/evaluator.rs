//! Route evaluator that computes distances, the balancing term, and ceiling
//! violations.

use crate::distance::{ArcCost, DistanceMatrix};
use crate::models::{Route, Solution, Vehicle, Violation};

/// Evaluates routes against a fleet: route distance, global span cost and
/// per-vehicle distance ceilings.
///
/// The objective of a solution is
/// `Σ route distance + span_coefficient × (max route − min route)`.
///
/// # Examples
///
/// ```
/// use delivery_routing::distance::DistanceMatrix;
/// use delivery_routing::evaluation::RouteEvaluator;
/// use delivery_routing::models::Vehicle;
///
/// let dm = DistanceMatrix::from_data(3, vec![0, 3, 4, 3, 0, 5, 4, 5, 0]).unwrap();
/// let fleet = Vehicle::fleet(2, 0, 100);
/// let evaluator = RouteEvaluator::new(&dm, &fleet, 10);
///
/// let solution = evaluator.build_solution(&[vec![1], vec![2]]);
/// assert_eq!(solution.total_distance(), 6 + 8);
/// // 14 + 10 × (8 − 6)
/// let (objective, violations) = evaluator.evaluate_solution(&solution);
/// assert_eq!(objective, 34);
/// assert!(violations.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator<'a> {
    distances: &'a DistanceMatrix,
    fleet: &'a [Vehicle],
    span_coefficient: i64,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(distances: &'a DistanceMatrix, fleet: &'a [Vehicle], span_coefficient: i64) -> Self {
        Self {
            distances,
            fleet,
            span_coefficient,
        }
    }

    /// Distance of one vehicle's route through `stops`.
    pub fn route_distance(&self, vehicle: &Vehicle, stops: &[usize]) -> i64 {
        self.distances.route_cost(stops, vehicle.depot_id())
    }

    /// Builds the route of `vehicle` through `stops`.
    pub fn build_route(&self, vehicle: &Vehicle, stops: &[usize]) -> Route {
        Route::new(vehicle.id(), stops.to_vec(), self.route_distance(vehicle, stops))
    }

    /// Builds a solution from one stop sequence per vehicle.
    ///
    /// Sequences beyond the fleet size are ignored.
    pub fn build_solution(&self, routes: &[Vec<usize>]) -> Solution {
        Solution::new(
            self.fleet
                .iter()
                .zip(routes)
                .map(|(vehicle, stops)| self.build_route(vehicle, stops))
                .collect(),
        )
    }

    /// Weighted difference between the longest and shortest route.
    pub fn span_cost(&self, route_distances: impl IntoIterator<Item = i64>) -> i64 {
        span_cost(route_distances, self.span_coefficient)
    }

    /// Total distance plus the weighted span.
    pub fn objective(&self, route_distances: &[i64]) -> i64 {
        route_distances.iter().sum::<i64>() + self.span_cost(route_distances.iter().copied())
    }

    /// Distance of route `vehicle` above that vehicle's ceiling.
    pub fn excess(&self, vehicle: usize, distance: i64) -> i64 {
        self.fleet.get(vehicle).map_or(0, |v| v.excess(distance))
    }

    /// Total distance above the ceilings, vehicle by vehicle.
    pub fn total_excess(&self, route_distances: &[i64]) -> i64 {
        self.fleet
            .iter()
            .zip(route_distances)
            .map(|(v, &d)| v.excess(d))
            .sum()
    }

    /// Evaluates an entire solution, returning its objective and violations.
    pub fn evaluate_solution(&self, solution: &Solution) -> (i64, Vec<Violation>) {
        let distances: Vec<i64> = solution.routes().iter().map(Route::distance).collect();
        let violations = solution
            .routes()
            .iter()
            .filter_map(|route| {
                let vehicle = self.fleet.get(route.vehicle_id())?;
                (route.distance() > vehicle.max_distance()).then(|| Violation {
                    vehicle_id: vehicle.id(),
                    distance: route.distance(),
                    max_distance: vehicle.max_distance(),
                })
            })
            .collect();
        (self.objective(&distances), violations)
    }
}

/// `coefficient × (max − min)` over the route distances; zero when empty.
pub fn span_cost(route_distances: impl IntoIterator<Item = i64>, coefficient: i64) -> i64 {
    let bounds = route_distances
        .into_iter()
        .fold(None, |acc: Option<(i64, i64)>, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        });
    bounds.map_or(0, |(lo, hi)| coefficient * (hi - lo))
}
