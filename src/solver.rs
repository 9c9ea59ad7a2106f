//! Solve entry points.
//!
//! [`optimize`] routes a fleet over coordinates, [`optimize_matrix`] does the
//! same over a caller-supplied matrix, and [`recalculate`] orders every stop
//! into a single tour. Each call builds the matrix, constructs initial routes
//! by cheapest insertion, improves them with guided local search until the
//! deadline, and extracts the best feasible routes.

use std::time::Instant;

use log::{info, warn};

use crate::config::SolverConfig;
use crate::constructive::cheapest_insertion_until;
use crate::distance::DistanceMatrix;
use crate::error::{ConfigurationError, RoutingError};
use crate::evaluation::RouteEvaluator;
use crate::local_search::{GuidedLocalSearch, SearchStats};
use crate::models::{Coordinate, Route, Solution, Vehicle};

/// Result of a successful solve.
#[derive(Debug, Clone)]
pub struct Solved {
    /// One route per vehicle, empty routes included.
    pub solution: Solution,
    /// Total distance plus the weighted span of the returned routes.
    pub objective: i64,
    /// Counters of the local search.
    pub stats: SearchStats,
}

/// Assigns and orders `stops` over `num_vehicles` vehicles.
///
/// Stop `config.depot` is the depot and never appears in a route.
///
/// # Errors
///
/// - [`RoutingError::Configuration`] for an empty input, no vehicles, a depot
///   index out of range, a zero time limit or a negative ceiling or weight.
/// - [`RoutingError::NoFeasibleSolution`] if no assignment keeps every route
///   under the ceiling within the time limit.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use delivery_routing::config::SolverConfig;
/// use delivery_routing::models::Coordinate;
/// use delivery_routing::solver::optimize;
///
/// let stops = [
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.01, 0.0),
///     Coordinate::new(0.0, 0.01),
/// ];
/// let config = SolverConfig::default().with_time_limit(Duration::from_secs(1));
/// let solved = optimize(&stops, 2, &config).unwrap();
///
/// assert_eq!(solved.solution.num_routes(), 2);
/// assert_eq!(solved.solution.served_stops(), vec![1, 2]);
/// ```
pub fn optimize(
    stops: &[Coordinate],
    num_vehicles: usize,
    config: &SolverConfig,
) -> Result<Solved, RoutingError> {
    if stops.is_empty() {
        return Err(ConfigurationError::NoStops.into());
    }
    let distances = DistanceMatrix::from_coordinates(stops);
    optimize_matrix(&distances, num_vehicles, config)
}

/// Like [`optimize`], over an arbitrary (possibly asymmetric) matrix.
///
/// # Errors
///
/// Same as [`optimize`].
pub fn optimize_matrix(
    distances: &DistanceMatrix,
    num_vehicles: usize,
    config: &SolverConfig,
) -> Result<Solved, RoutingError> {
    let started = Instant::now();
    validate(distances, num_vehicles, config)?;
    // A limit too large to represent as an instant means no deadline
    let deadline = started.checked_add(config.time_limit);

    info!(
        "optimizing {} stops over {num_vehicles} vehicles, ceiling {}, limit {:?}",
        distances.size() - 1,
        config.max_distance_per_vehicle,
        config.time_limit
    );

    let fleet = Vehicle::fleet(num_vehicles, config.depot, config.max_distance_per_vehicle);
    check_reachable(distances, &fleet, config.depot)?;

    let initial = cheapest_insertion_until(distances, &fleet, deadline)?;
    let outcome = GuidedLocalSearch::new(distances, &fleet, config, deadline).run(initial)?;

    let evaluator = RouteEvaluator::new(distances, &fleet, config.span_coefficient);
    let solution = evaluator.build_solution(&outcome.routes);
    let (objective, violations) = evaluator.evaluate_solution(&solution);
    if !violations.is_empty() {
        warn!("best solution violates {} ceilings", violations.len());
        return Err(RoutingError::NoFeasibleSolution);
    }

    info!(
        "solved: total distance {}, span {}, objective {} in {:?}",
        solution.total_distance(),
        solution.span(),
        objective,
        started.elapsed()
    );
    Ok(Solved {
        solution,
        objective,
        stats: outcome.stats,
    })
}

/// Orders all `stops` into one closed tour starting and ending at
/// `config.depot`.
///
/// The returned route lists the depot first, followed by every other stop in
/// visiting order.
///
/// # Errors
///
/// Same as [`optimize`] with one vehicle.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use delivery_routing::config::SolverConfig;
/// use delivery_routing::models::Coordinate;
/// use delivery_routing::solver::recalculate;
///
/// let stops = [Coordinate::new(0.0, 0.0), Coordinate::new(0.01, 0.0)];
/// let config = SolverConfig::default().with_time_limit(Duration::from_secs(1));
/// let solved = recalculate(&stops, &config).unwrap();
///
/// let tour = &solved.solution.routes()[0];
/// assert_eq!(tour.stops(), &[0, 1]);
/// assert_eq!(tour.distance(), 2_000);
/// ```
pub fn recalculate(stops: &[Coordinate], config: &SolverConfig) -> Result<Solved, RoutingError> {
    let mut solved = optimize(stops, 1, config)?;
    solved.solution = prepend_depot(solved.solution, config.depot);
    Ok(solved)
}

fn validate(
    distances: &DistanceMatrix,
    num_vehicles: usize,
    config: &SolverConfig,
) -> Result<(), ConfigurationError> {
    config.validate()?;
    if num_vehicles == 0 {
        return Err(ConfigurationError::NoVehicles);
    }
    if distances.size() == 0 {
        return Err(ConfigurationError::NoStops);
    }
    if config.depot >= distances.size() {
        return Err(ConfigurationError::DepotOutOfRange {
            depot: config.depot,
            len: distances.size(),
        });
    }
    Ok(())
}

/// Fails fast when some stop cannot be served alone by any vehicle.
fn check_reachable(
    distances: &DistanceMatrix,
    fleet: &[Vehicle],
    depot: usize,
) -> Result<(), RoutingError> {
    let ceiling = fleet.iter().map(Vehicle::max_distance).max().unwrap_or(0);
    let unreachable = (0..distances.size())
        .filter(|&stop| stop != depot)
        .find(|&stop| distances.round_trip(depot, stop) > ceiling);
    match unreachable {
        Some(stop) => {
            warn!(
                "stop {stop} needs a round trip of {} but the ceiling is {ceiling}",
                distances.round_trip(depot, stop)
            );
            Err(RoutingError::NoFeasibleSolution)
        }
        None => Ok(()),
    }
}

fn prepend_depot(solution: Solution, depot: usize) -> Solution {
    let routes = solution
        .routes()
        .iter()
        .map(|route| {
            let mut stops = Vec::with_capacity(route.len() + 1);
            stops.push(depot);
            stops.extend_from_slice(route.stops());
            Route::new(route.vehicle_id(), stops, route.distance())
        })
        .collect();
    Solution::new(routes)
}
