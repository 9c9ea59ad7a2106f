//! Exchange operator: swap two stops served by different vehicles.
//!
//! # Algorithm
//!
//! Given `a` at `R1[i]` and `b` at `R2[j]`, produce `R1[i] = b` and
//! `R2[j] = a`. Each route replaces the two arcs around its position.
//!
//! # Complexity
//!
//! O(1) per candidate, O(n²) candidates per pass.

use crate::distance::ArcCost;

use super::profile::CostProfile;
use super::{RouteCosts, Slot};

/// New route costs after swapping the stops at `a` and `b`.
///
/// `a` and `b` must lie on different routes.
pub(crate) fn exchange_costs(
    routes: &[Vec<usize>],
    profiles: &[CostProfile],
    depot: usize,
    arcs: &impl ArcCost,
    a: Slot,
    b: Slot,
) -> RouteCosts {
    let stop_a = routes[a.route][a.pos];
    let stop_b = routes[b.route][b.pos];
    RouteCosts::two(
        a.route,
        profiles[a.route].total() + replacement_cost(&routes[a.route], a.pos, stop_b, depot, arcs),
        b.route,
        profiles[b.route].total() + replacement_cost(&routes[b.route], b.pos, stop_a, depot, arcs),
    )
}

/// Swaps the stops at `a` and `b`.
pub(crate) fn apply_exchange(routes: &mut [Vec<usize>], a: Slot, b: Slot) {
    let stop_a = routes[a.route][a.pos];
    routes[a.route][a.pos] = routes[b.route][b.pos];
    routes[b.route][b.pos] = stop_a;
}

/// Cost change of putting `stop` in place of `route[pos]`.
fn replacement_cost(
    route: &[usize],
    pos: usize,
    stop: usize,
    depot: usize,
    arcs: &impl ArcCost,
) -> i64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos + 1 == route.len() {
        depot
    } else {
        route[pos + 1]
    };
    let old = route[pos];
    arcs.arc(prev, stop) + arcs.arc(stop, next) - arcs.arc(prev, old) - arcs.arc(old, next)
}
