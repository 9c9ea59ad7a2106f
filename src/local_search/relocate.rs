//! Relocate operator: move one stop to another position.
//!
//! # Algorithm
//!
//! The stop at `from` is removed, closing the gap `prev → next`, and inserted
//! at `to`, which indexes the destination route as it looks after the
//! removal. Source and destination may be the same vehicle.
//!
//! # Complexity
//!
//! O(1) per candidate.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::constructive::insertion_cost;
use crate::distance::ArcCost;

use super::profile::CostProfile;
use super::{RouteCosts, Slot};

/// New route costs after relocating `from` to `to`.
pub(crate) fn relocate_costs(
    routes: &[Vec<usize>],
    profiles: &[CostProfile],
    depot: usize,
    arcs: &impl ArcCost,
    from: Slot,
    to: Slot,
) -> RouteCosts {
    let source = &routes[from.route];
    let stop = source[from.pos];
    let removal = removal_cost(source, from.pos, depot, arcs);

    if from.route != to.route {
        let insertion = insertion_cost(&routes[to.route], to.pos, stop, depot, arcs);
        return RouteCosts::two(
            from.route,
            profiles[from.route].total() + removal,
            to.route,
            profiles[to.route].total() + insertion,
        );
    }

    // Same route: neighbours of the gap in the shortened route
    let at = |k: usize| source[if k < from.pos { k } else { k + 1 }];
    let prev = if to.pos == 0 { depot } else { at(to.pos - 1) };
    let next = if to.pos == source.len() - 1 {
        depot
    } else {
        at(to.pos)
    };
    let insertion = arcs.arc(prev, stop) + arcs.arc(stop, next) - arcs.arc(prev, next);
    RouteCosts::one(
        from.route,
        profiles[from.route].total() + removal + insertion,
    )
}

/// Moves the stop at `from` to `to`.
pub(crate) fn apply_relocate(routes: &mut [Vec<usize>], from: Slot, to: Slot) {
    let stop = routes[from.route].remove(from.pos);
    routes[to.route].insert(to.pos, stop);
}

/// Cost of removing the stop at `pos` from route.
fn removal_cost(route: &[usize], pos: usize, depot: usize, arcs: &impl ArcCost) -> i64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        depot
    } else {
        route[pos + 1]
    };
    let stop = route[pos];

    // Old: prev → stop → next
    // New: prev → next
    arcs.arc(prev, next) - arcs.arc(prev, stop) - arcs.arc(stop, next)
}
