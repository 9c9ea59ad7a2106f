//! Cheapest-insertion constructive heuristic.
//!
//! # Algorithm
//!
//! Every vehicle starts with an empty route anchored at the depot. At each
//! step the (stop, vehicle, position) triple with the smallest marginal
//! distance increase is selected and the stop is inserted there:
//!
//! ```text
//! delta = d(prev, s) + d(s, next) - d(prev, next)
//! ```
//!
//! Ties go to the lowest stop index, then the lowest vehicle id, then the
//! earliest position. Distance ceilings are ignored at this stage; the local
//! search repairs or penalizes violations.
//!
//! The best insertion of every unassigned stop into every vehicle is cached.
//! Inserting `s` between `prev` and `next` only replaces the gap
//! `prev → next` with `prev → s` and `s → next`, so a cached best is compared
//! against the two new gaps. Only stops whose cached best was the replaced
//! gap re-scan the route.
//!
//! If a deadline passes mid-construction, each remaining stop is appended to
//! the end of the vehicle with its cheapest cached insertion.
//!
//! # Complexity
//!
//! O(n² · V) for selection plus one O(L) re-scan per invalidated cache entry,
//! where n = stops, V = vehicles and L = route length.

use std::cmp::Ordering;
use std::time::Instant;

use log::{debug, warn};

use crate::distance::{ArcCost, DistanceMatrix};
use crate::error::{ConfigurationError, RoutingError};
use crate::models::Vehicle;

/// Best insertion of one stop into one route: `(delta, position)`.
type Insertion = (i64, usize);

/// Builds one stop sequence per vehicle by cheapest insertion.
///
/// Every stop of the matrix other than the vehicles' depot is assigned
/// exactly once. All vehicles are assumed to share the depot of `fleet[0]`.
///
/// # Errors
///
/// Returns [`ConfigurationError::NoVehicles`] for an empty fleet.
///
/// # Examples
///
/// ```
/// use delivery_routing::distance::DistanceMatrix;
/// use delivery_routing::constructive::cheapest_insertion;
/// use delivery_routing::models::Vehicle;
///
/// // Depot 0 with stops at 1, 2 and 3 units along a line
/// let dm = DistanceMatrix::from_data(
///     4,
///     vec![0, 1, 2, 3, 1, 0, 1, 2, 2, 1, 0, 1, 3, 2, 1, 0],
/// ).unwrap();
/// let fleet = Vehicle::fleet(1, 0, 100);
///
/// let routes = cheapest_insertion(&dm, &fleet).unwrap();
/// // Position ties go to the front of the route
/// assert_eq!(routes, vec![vec![3, 2, 1]]);
/// ```
pub fn cheapest_insertion(
    distances: &DistanceMatrix,
    fleet: &[Vehicle],
) -> Result<Vec<Vec<usize>>, RoutingError> {
    cheapest_insertion_until(distances, fleet, None)
}

/// Like [`cheapest_insertion`], but stops choosing insertions once
/// `deadline` passes and appends the remaining stops instead.
///
/// # Errors
///
/// Returns [`ConfigurationError::NoVehicles`] for an empty fleet.
pub fn cheapest_insertion_until(
    distances: &DistanceMatrix,
    fleet: &[Vehicle],
    deadline: Option<Instant>,
) -> Result<Vec<Vec<usize>>, RoutingError> {
    let Some(first) = fleet.first() else {
        return Err(ConfigurationError::NoVehicles.into());
    };
    let depot = first.depot_id();
    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); fleet.len()];

    let mut unassigned: Vec<usize> = (0..distances.size()).filter(|&s| s != depot).collect();
    if unassigned.is_empty() {
        return Ok(routes);
    }

    // best[k][v] caches the cheapest insertion of unassigned[k] into route v
    let mut best: Vec<Vec<Insertion>> = unassigned
        .iter()
        .map(|&s| {
            routes
                .iter()
                .map(|r| best_position(r, s, depot, distances))
                .collect()
        })
        .collect();

    while !unassigned.is_empty() {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            warn!(
                "construction deadline reached, appending {} remaining stops",
                unassigned.len()
            );
            append_remaining(&mut routes, &unassigned, &best);
            break;
        }

        let mut choice: Option<(usize, usize, Insertion)> = None;
        // unassigned is ascending, so strict comparison keeps the lowest stop
        // and vehicle on ties
        for (k, per_vehicle) in best.iter().enumerate() {
            for (v, &(delta, pos)) in per_vehicle.iter().enumerate() {
                if choice.is_none_or(|(_, _, (d, _))| delta < d) {
                    choice = Some((k, v, (delta, pos)));
                }
            }
        }
        let Some((k, v, (_, pos))) = choice else {
            break;
        };

        let stop = unassigned.remove(k);
        best.remove(k);
        routes[v].insert(pos, stop);

        for (k, &s) in unassigned.iter().enumerate() {
            best[k][v] = update_best(&routes[v], s, pos, best[k][v], depot, distances);
        }
    }

    debug!(
        "cheapest insertion built {} routes, lengths {:?}",
        routes.len(),
        routes.iter().map(Vec::len).collect::<Vec<_>>()
    );
    Ok(routes)
}

/// Cheapest position for `stop` in `route`, earliest position on ties.
fn best_position(route: &[usize], stop: usize, depot: usize, arcs: &impl ArcCost) -> Insertion {
    (0..=route.len())
        .map(|pos| (insertion_cost(route, pos, stop, depot, arcs), pos))
        .min()
        .unwrap_or((0, 0))
}

/// Cached best of `stop` for `route` right after a stop was inserted at
/// `inserted`.
fn update_best(
    route: &[usize],
    stop: usize,
    inserted: usize,
    cached: Insertion,
    depot: usize,
    arcs: &impl ArcCost,
) -> Insertion {
    let (delta, pos) = cached;
    let kept = match pos.cmp(&inserted) {
        Ordering::Less => (delta, pos),
        Ordering::Greater => (delta, pos + 1),
        // The cached gap no longer exists
        Ordering::Equal => return best_position(route, stop, depot, arcs),
    };
    let before = (insertion_cost(route, inserted, stop, depot, arcs), inserted);
    let after = (insertion_cost(route, inserted + 1, stop, depot, arcs), inserted + 1);
    kept.min(before).min(after)
}

/// Appends each remaining stop to the vehicle with its cheapest cached
/// insertion, lowest vehicle on ties.
fn append_remaining(routes: &mut [Vec<usize>], unassigned: &[usize], best: &[Vec<Insertion>]) {
    for (&stop, per_vehicle) in unassigned.iter().zip(best) {
        let vehicle = per_vehicle
            .iter()
            .enumerate()
            .min_by_key(|&(v, &(delta, _))| (delta, v))
            .map_or(0, |(v, _)| v);
        routes[vehicle].push(stop);
    }
}

/// Cost of inserting `stop` at `pos` in route.
pub(crate) fn insertion_cost(
    route: &[usize],
    pos: usize,
    stop: usize,
    depot: usize,
    arcs: &impl ArcCost,
) -> i64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() { depot } else { route[pos] };

    // Old: prev → next
    // New: prev → stop → next
    arcs.arc(prev, stop) + arcs.arc(stop, next) - arcs.arc(prev, next)
}
