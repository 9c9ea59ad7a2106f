//! Local search for improving routing solutions.
//!
//! - [`relocate`] — Move one stop to another position or vehicle
//! - [`exchange`] — Swap two stops between vehicles
//! - [`two_opt`] — Intra-route segment reversal
//! - [`cross`] — Inter-route tail exchange (2-opt*)
//! - [`GuidedLocalSearch`] — Penalty-guided descent over all four neighbourhoods
//!
//! Moves are priced incrementally from per-route prefix sums; no move
//! evaluation walks a whole route.
//!
//! [`relocate`]: Move::Relocate
//! [`exchange`]: Move::Exchange
//! [`two_opt`]: Move::TwoOpt
//! [`cross`]: Move::Cross

mod cross;
mod exchange;
mod guided;
mod penalty;
mod profile;
mod relocate;
mod two_opt;

pub use guided::{GuidedLocalSearch, SearchOutcome, SearchStats};

use crate::distance::ArcCost;

use profile::CostProfile;

/// A position inside a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Route (vehicle) index.
    pub route: usize,
    /// Position within the route.
    pub pos: usize,
}

impl Slot {
    /// Creates a slot.
    pub fn new(route: usize, pos: usize) -> Self {
        Self { route, pos }
    }
}

/// A neighbourhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Remove the stop at `from` and insert it at `to` (indexed after removal).
    Relocate {
        /// Current position of the stop.
        from: Slot,
        /// Insertion point in the destination route.
        to: Slot,
    },
    /// Swap the stops at `a` and `b` on different routes.
    Exchange {
        /// First stop.
        a: Slot,
        /// Second stop.
        b: Slot,
    },
    /// Reverse `start..=end` within one route.
    TwoOpt {
        /// Route index.
        route: usize,
        /// First reversed position.
        start: usize,
        /// Last reversed position.
        end: usize,
    },
    /// Swap the tails beginning at `a` and `b` on different routes.
    Cross {
        /// First cut.
        a: Slot,
        /// Second cut.
        b: Slot,
    },
}

impl Move {
    /// New costs of the routes this move touches.
    pub(crate) fn costs(
        &self,
        routes: &[Vec<usize>],
        profiles: &[CostProfile],
        depot: usize,
        arcs: &impl ArcCost,
    ) -> RouteCosts {
        match *self {
            Move::Relocate { from, to } => {
                relocate::relocate_costs(routes, profiles, depot, arcs, from, to)
            }
            Move::Exchange { a, b } => exchange::exchange_costs(routes, profiles, depot, arcs, a, b),
            Move::TwoOpt { route, start, end } => {
                two_opt::two_opt_costs(routes, profiles, depot, arcs, route, start, end)
            }
            Move::Cross { a, b } => cross::cross_costs(routes, profiles, depot, arcs, a, b),
        }
    }

    /// Applies the move to the route sequences.
    pub fn apply(&self, routes: &mut [Vec<usize>]) {
        match *self {
            Move::Relocate { from, to } => relocate::apply_relocate(routes, from, to),
            Move::Exchange { a, b } => exchange::apply_exchange(routes, a, b),
            Move::TwoOpt { route, start, end } => two_opt::apply_two_opt(routes, route, start, end),
            Move::Cross { a, b } => cross::apply_cross(routes, a, b),
        }
    }

    /// Routes modified by this move.
    pub fn routes(&self) -> RoutePair {
        match *self {
            Move::Relocate { from, to } => RoutePair::new(from.route, to.route),
            Move::Exchange { a, b } | Move::Cross { a, b } => RoutePair::new(a.route, b.route),
            Move::TwoOpt { route, .. } => RoutePair::new(route, route),
        }
    }
}

/// One or two distinct route indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePair {
    first: usize,
    second: Option<usize>,
}

impl RoutePair {
    fn new(a: usize, b: usize) -> Self {
        Self {
            first: a,
            second: (a != b).then_some(b),
        }
    }

    /// Iterates the distinct routes.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        std::iter::once(self.first).chain(self.second)
    }
}

/// New costs of the (at most two) routes a move touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RouteCosts {
    first: (usize, i64),
    second: Option<(usize, i64)>,
}

impl RouteCosts {
    pub(crate) fn one(route: usize, cost: i64) -> Self {
        Self {
            first: (route, cost),
            second: None,
        }
    }

    pub(crate) fn two(a: usize, cost_a: i64, b: usize, cost_b: i64) -> Self {
        Self {
            first: (a, cost_a),
            second: Some((b, cost_b)),
        }
    }

    /// `(route, new cost)` pairs.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, i64)> {
        std::iter::once(self.first).chain(self.second)
    }

    /// New cost of `route` if this move touches it.
    pub(crate) fn get(&self, route: usize) -> Option<i64> {
        self.iter().find(|&(r, _)| r == route).map(|(_, c)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_pair_dedups() {
        let same = Move::TwoOpt {
            route: 2,
            start: 0,
            end: 1,
        };
        assert_eq!(same.routes().iter().collect::<Vec<_>>(), vec![2]);
        let across = Move::Relocate {
            from: Slot::new(0, 0),
            to: Slot::new(1, 0),
        };
        assert_eq!(across.routes().iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_route_costs_lookup() {
        let costs = RouteCosts::two(1, 10, 3, 20);
        assert_eq!(costs.get(3), Some(20));
        assert_eq!(costs.get(0), None);
        assert_eq!(RouteCosts::one(0, 5).iter().count(), 1);
    }

    #[test]
    fn test_apply_dispatch() {
        let mut routes = vec![vec![1, 2, 3], vec![4]];
        Move::Exchange {
            a: Slot::new(0, 0),
            b: Slot::new(1, 0),
        }
        .apply(&mut routes);
        assert_eq!(routes, vec![vec![4, 2, 3], vec![1]]);
        Move::TwoOpt {
            route: 0,
            start: 0,
            end: 2,
        }
        .apply(&mut routes);
        assert_eq!(routes[0], vec![3, 2, 4]);
    }
}
