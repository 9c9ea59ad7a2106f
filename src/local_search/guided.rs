//! Guided local search engine.
//!
//! # Algorithm
//!
//! 1. Descend: visit every stop in a shuffled order, find the move involving
//!    it with the largest decrease of the penalized cost, and apply it.
//! 2. A pass that applies nothing is a local optimum. Arcs of the current
//!    solution with maximal utility `d / (1 + p)` get their penalty raised,
//!    which makes previously rejected moves attractive, and descent resumes.
//! 3. The best feasible solution by true cost is recorded whenever the
//!    working solution improves on it.
//!
//! The penalized cost of a solution is
//!
//! ```text
//! Σ augmented route cost + span_coefficient × (max route − min route)
//!   + ceiling_penalty × Σ max(0, route − ceiling)
//! ```
//!
//! The search stops at the deadline, if any, or after `max_idle_scans`
//! consecutive local optima without a new best.

use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::SolverConfig;
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::evaluation::RouteEvaluator;
use crate::models::Vehicle;

use super::penalty::{route_arcs, AugmentedCost, Penalties};
use super::profile::CostProfile;
use super::{Move, RoutePair, Slot};

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Full passes over the stops.
    pub passes: usize,
    /// Improving moves applied to the working solution.
    pub moves_applied: usize,
    /// Passes that ended without an applied move.
    pub local_optima: usize,
    /// True cost of every new best feasible solution, in discovery order.
    pub best_costs: Vec<i64>,
    /// Whether the search was cut short by the deadline.
    pub deadline_reached: bool,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// Best feasible routes found by [`GuidedLocalSearch::run`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// One stop sequence per vehicle.
    pub routes: Vec<Vec<usize>>,
    /// True cost: total distance plus the weighted span.
    pub cost: i64,
    /// Search counters.
    pub stats: SearchStats,
}

/// The solution being modified, with cached route costs.
struct Working {
    routes: Vec<Vec<usize>>,
    plain: Vec<CostProfile>,
    augmented: Vec<CostProfile>,
    slots: Vec<Option<Slot>>,
    distance: i64,
    cost: i64,
    span_cost: i64,
    excess: i64,
}

/// Penalty-guided local search over relocate, exchange, 2-opt and cross
/// moves.
///
/// Holds the distance matrix by reference for the lifetime of one solve.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use delivery_routing::config::SolverConfig;
/// use delivery_routing::distance::{ArcCost, DistanceMatrix};
/// use delivery_routing::local_search::GuidedLocalSearch;
/// use delivery_routing::models::{Coordinate, Vehicle};
///
/// let dm = DistanceMatrix::from_coordinates(&[
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.001, 0.001),
///     Coordinate::new(0.002, 0.0),
///     Coordinate::new(0.001, -0.001),
/// ]);
/// let fleet = Vehicle::fleet(1, 0, 300_000);
/// let config = SolverConfig::default();
/// let deadline = Instant::now().checked_add(Duration::from_secs(1));
///
/// let outcome = GuidedLocalSearch::new(&dm, &fleet, &config, deadline)
///     .run(vec![vec![1, 3, 2]])
///     .unwrap();
/// assert!(outcome.cost < dm.route_cost(&[1, 3, 2], 0));
/// ```
pub struct GuidedLocalSearch<'a> {
    distances: &'a DistanceMatrix,
    evaluator: RouteEvaluator<'a>,
    depot: usize,
    ceiling_penalty: i64,
    lambda_coefficient: f64,
    max_idle_scans: usize,
    deadline: Option<Instant>,
    rng: StdRng,
}

impl<'a> GuidedLocalSearch<'a> {
    /// Creates an engine for one solve.
    ///
    /// Without a `deadline` only the idle limit ends the search.
    pub fn new(
        distances: &'a DistanceMatrix,
        fleet: &'a [Vehicle],
        config: &SolverConfig,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            distances,
            evaluator: RouteEvaluator::new(distances, fleet, config.span_coefficient),
            depot: config.depot,
            ceiling_penalty: config.ceiling_penalty,
            lambda_coefficient: config.lambda_coefficient,
            max_idle_scans: config.max_idle_scans,
            deadline,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Improves `initial` (one stop sequence per vehicle) until the deadline
    /// or the idle limit.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NoFeasibleSolution`] if no solution within
    /// every vehicle's ceiling was seen.
    pub fn run(mut self, initial: Vec<Vec<usize>>) -> Result<SearchOutcome, RoutingError> {
        let started = Instant::now();
        let mut stats = SearchStats::default();
        let mut penalties = Penalties::new(self.distances.size(), self.distances.is_symmetric());
        let mut lambda = 0;

        let mut work = {
            let aug = AugmentedCost::new(self.distances, &penalties, lambda);
            self.working(initial, &aug)
        };
        let mut best: Option<(Vec<Vec<usize>>, i64)> = None;
        self.record_best(&work, &mut best, &mut stats);

        let mut order: Vec<usize> = work.routes.iter().flatten().copied().collect();
        let mut idle = 0;
        let mut improved = false;

        'search: while !order.is_empty() {
            stats.passes += 1;
            order.shuffle(&mut self.rng);

            let mut applied = false;
            for &stop in &order {
                if self.deadline.is_some_and(|d| Instant::now() >= d) {
                    stats.deadline_reached = true;
                    break 'search;
                }
                let aug = AugmentedCost::new(self.distances, &penalties, lambda);
                let Some(slot) = work.slots[stop] else {
                    continue;
                };
                if let Some((mv, delta)) = self.best_move(&work, &aug, slot) {
                    trace!("applying {mv:?}, penalized delta {delta}");
                    mv.apply(&mut work.routes);
                    self.refresh(&mut work, mv.routes(), &aug);
                    stats.moves_applied += 1;
                    applied = true;
                    improved |= self.record_best(&work, &mut best, &mut stats);
                }
            }
            if applied {
                continue;
            }

            stats.local_optima += 1;
            if improved {
                idle = 0;
                improved = false;
            } else {
                idle += 1;
            }
            if idle >= self.max_idle_scans {
                debug!("stopping after {idle} local optima without improvement");
                break;
            }

            if lambda == 0 {
                lambda = self.initial_lambda(&work);
                debug!("guided local search lambda = {lambda}");
            }
            let arcs = route_arcs(&work.routes, self.depot);
            let penalized = penalties.penalize_max_utility(self.distances, &arcs);
            trace!("local optimum {}: penalized {penalized} arcs", stats.local_optima);

            let aug = AugmentedCost::new(self.distances, &penalties, lambda);
            work.augmented = work
                .routes
                .iter()
                .map(|r| CostProfile::build(r, self.depot, &aug))
                .collect();
        }

        stats.elapsed = started.elapsed();
        match best {
            Some((routes, cost)) => {
                info!(
                    "search finished: cost {cost}, {} passes, {} moves, {} local optima in {:?}",
                    stats.passes, stats.moves_applied, stats.local_optima, stats.elapsed
                );
                Ok(SearchOutcome {
                    routes,
                    cost,
                    stats,
                })
            }
            None => {
                warn!(
                    "no feasible solution after {} passes in {:?}",
                    stats.passes, stats.elapsed
                );
                Err(RoutingError::NoFeasibleSolution)
            }
        }
    }

    fn working(&self, routes: Vec<Vec<usize>>, aug: &AugmentedCost<'_>) -> Working {
        let plain = routes
            .iter()
            .map(|r| CostProfile::build(r, self.depot, self.distances))
            .collect();
        let augmented = routes
            .iter()
            .map(|r| CostProfile::build(r, self.depot, aug))
            .collect();
        let mut work = Working {
            slots: vec![None; self.distances.size()],
            routes,
            plain,
            augmented,
            distance: 0,
            cost: 0,
            span_cost: 0,
            excess: 0,
        };
        for r in 0..work.routes.len() {
            index_slots(&mut work, r);
        }
        self.update_totals(&mut work);
        work
    }

    /// Rebuilds cached costs of the routes a move touched.
    fn refresh(&self, work: &mut Working, touched: RoutePair, aug: &AugmentedCost<'_>) {
        for r in touched.iter() {
            work.plain[r] = CostProfile::build(&work.routes[r], self.depot, self.distances);
            work.augmented[r] = CostProfile::build(&work.routes[r], self.depot, aug);
            index_slots(work, r);
        }
        self.update_totals(work);
    }

    fn update_totals(&self, work: &mut Working) {
        let totals: Vec<i64> = work.plain.iter().map(CostProfile::total).collect();
        work.distance = totals.iter().sum();
        work.cost = self.evaluator.objective(&totals);
        work.span_cost = self.evaluator.span_cost(totals.iter().copied());
        work.excess = self.evaluator.total_excess(&totals);
    }

    /// Records the working solution as best if it is feasible and cheaper.
    fn record_best(
        &self,
        work: &Working,
        best: &mut Option<(Vec<Vec<usize>>, i64)>,
        stats: &mut SearchStats,
    ) -> bool {
        if work.excess > 0 {
            return false;
        }
        let cost = work.cost;
        if best.as_ref().is_some_and(|(_, b)| cost >= *b) {
            return false;
        }
        debug!("new best cost {cost}");
        *best = Some((work.routes.clone(), cost));
        stats.best_costs.push(cost);
        true
    }

    /// `λ = max(1, round(coefficient × distance / arcs))` at the first local
    /// optimum.
    fn initial_lambda(&self, work: &Working) -> i64 {
        let arcs: usize = work
            .routes
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.len() + 1)
            .sum();
        if arcs == 0 {
            return 1;
        }
        let lambda = self.lambda_coefficient * work.distance as f64 / arcs as f64;
        (lambda.round() as i64).max(1)
    }

    /// Change of the penalized cost if `mv` were applied.
    fn score(&self, work: &Working, aug: &AugmentedCost<'_>, mv: Move) -> i64 {
        let plain = mv.costs(&work.routes, &work.plain, self.depot, self.distances);
        let augmented = mv.costs(&work.routes, &work.augmented, self.depot, aug);

        let aug_delta: i64 = augmented
            .iter()
            .map(|(r, c)| c - work.augmented[r].total())
            .sum();
        let excess_delta: i64 = plain
            .iter()
            .map(|(r, c)| {
                self.evaluator.excess(r, c) - self.evaluator.excess(r, work.plain[r].total())
            })
            .sum();

        let span_cost = self.evaluator.span_cost(
            work.plain
                .iter()
                .enumerate()
                .map(|(r, profile)| plain.get(r).unwrap_or_else(|| profile.total())),
        );

        aug_delta + (span_cost - work.span_cost) + self.ceiling_penalty * excess_delta
    }

    /// Cheapest improving move that involves the stop at `slot`.
    fn best_move(
        &self,
        work: &Working,
        aug: &AugmentedCost<'_>,
        slot: Slot,
    ) -> Option<(Move, i64)> {
        let mut best: Option<(Move, i64)> = None;
        let mut consider = |mv: Move| {
            let delta = self.score(work, aug, mv);
            if delta < 0 && best.is_none_or(|(_, b)| delta < b) {
                best = Some((mv, delta));
            }
        };

        let (r, i) = (slot.route, slot.pos);
        let len_r = work.routes[r].len();
        for t in 0..work.routes.len() {
            if t == r {
                for j in (0..len_r).filter(|&j| j != i) {
                    consider(Move::Relocate {
                        from: slot,
                        to: Slot::new(r, j),
                    });
                    consider(Move::TwoOpt {
                        route: r,
                        start: i.min(j),
                        end: i.max(j),
                    });
                }
                continue;
            }

            let len_t = work.routes[t].len();
            for j in 0..=len_t {
                consider(Move::Relocate {
                    from: slot,
                    to: Slot::new(t, j),
                });
                if j < len_t {
                    consider(Move::Exchange {
                        a: slot,
                        b: Slot::new(t, j),
                    });
                }
                for cut in [i, i + 1] {
                    if cut == len_r && j == len_t {
                        continue;
                    }
                    consider(Move::Cross {
                        a: Slot::new(r, cut),
                        b: Slot::new(t, j),
                    });
                }
            }
        }
        best
    }
}

fn index_slots(work: &mut Working, route: usize) {
    for (pos, &stop) in work.routes[route].iter().enumerate() {
        work.slots[stop] = Some(Slot::new(route, pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::ArcCost;
    use crate::models::Coordinate;

    fn engine<'a>(
        dm: &'a DistanceMatrix,
        fleet: &'a [Vehicle],
        config: &SolverConfig,
    ) -> GuidedLocalSearch<'a> {
        GuidedLocalSearch::new(dm, fleet, config, Instant::now().checked_add(Duration::from_secs(5)))
    }

    /// Depot in the middle, two stops east and two stops west.
    fn two_clusters() -> DistanceMatrix {
        DistanceMatrix::from_coordinates(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.001, 0.01),
            Coordinate::new(-0.001, -0.01),
            Coordinate::new(0.001, -0.01),
            Coordinate::new(-0.001, 0.01),
        ])
    }

    #[test]
    fn test_untangles_single_route() {
        let dm = DistanceMatrix::from_coordinates(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.001, 0.001),
            Coordinate::new(0.002, 0.0),
            Coordinate::new(0.001, -0.001),
        ]);
        let fleet = Vehicle::fleet(1, 0, 300_000);
        let outcome = engine(&dm, &fleet, &SolverConfig::default())
            .run(vec![vec![1, 3, 2]])
            .expect("feasible");
        let optimal = dm.route_cost(&[1, 2, 3], 0);
        assert_eq!(outcome.cost, optimal);
        assert_eq!(outcome.routes[0].len(), 3);
    }

    #[test]
    fn test_separates_clusters() {
        let dm = two_clusters();
        let fleet = Vehicle::fleet(2, 0, 300_000);
        let outcome = engine(&dm, &fleet, &SolverConfig::default())
            .run(vec![vec![1, 2], vec![3, 4]])
            .expect("feasible");
        let mut groups: Vec<Vec<usize>> = outcome
            .routes
            .iter()
            .map(|r| {
                let mut r = r.clone();
                r.sort_unstable();
                r
            })
            .collect();
        groups.sort();
        assert_eq!(groups, vec![vec![1, 4], vec![2, 3]]);
    }

    #[test]
    fn test_repairs_ceiling_violation() {
        let dm = two_clusters();
        // One cluster round trip is 2210, both together 4410
        let fleet = Vehicle::fleet(2, 0, 2_500);
        let initial = vec![vec![1, 4, 2, 3], vec![]];
        let outcome = engine(&dm, &fleet, &SolverConfig::default())
            .run(initial)
            .expect("feasible");
        for (vehicle, route) in fleet.iter().zip(&outcome.routes) {
            assert!(dm.route_cost(route, 0) <= vehicle.max_distance());
        }
        assert_eq!(outcome.routes.iter().map(Vec::len).sum::<usize>(), 4);
    }

    #[test]
    fn test_no_feasible_solution() {
        let dm = two_clusters();
        let fleet = Vehicle::fleet(2, 0, 100);
        let result = engine(&dm, &fleet, &SolverConfig::default().with_max_idle_scans(5))
            .run(vec![vec![1, 4], vec![2, 3]]);
        assert_eq!(result.err(), Some(RoutingError::NoFeasibleSolution));
    }

    #[test]
    fn test_best_costs_decrease() {
        let dm = two_clusters();
        let fleet = Vehicle::fleet(2, 0, 300_000);
        let outcome = engine(&dm, &fleet, &SolverConfig::default())
            .run(vec![vec![1, 2, 3, 4], vec![]])
            .expect("feasible");
        let costs = &outcome.stats.best_costs;
        assert!(!costs.is_empty());
        assert!(costs.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(costs.last(), Some(&outcome.cost));
    }

    #[test]
    fn test_expired_deadline_returns_initial() {
        let dm = two_clusters();
        let fleet = Vehicle::fleet(2, 0, 300_000);
        let initial = vec![vec![1, 2], vec![3, 4]];
        let outcome = GuidedLocalSearch::new(&dm, &fleet, &SolverConfig::default(), Some(Instant::now()))
            .run(initial.clone())
            .expect("initial solution is feasible");
        assert!(outcome.stats.deadline_reached);
        assert_eq!(outcome.routes, initial);
    }

    #[test]
    fn test_empty_routes() {
        let dm = DistanceMatrix::from_coordinates(&[Coordinate::new(0.0, 0.0)]);
        let fleet = Vehicle::fleet(3, 0, 300_000);
        let outcome = engine(&dm, &fleet, &SolverConfig::default())
            .run(vec![vec![], vec![], vec![]])
            .expect("trivially feasible");
        assert_eq!(outcome.cost, 0);
        assert_eq!(outcome.stats.passes, 0);
    }

    #[test]
    fn test_seed_makes_search_repeatable() {
        let dm = two_clusters();
        let fleet = Vehicle::fleet(2, 0, 300_000);
        let config = SolverConfig::default().with_seed(7).with_max_idle_scans(10);
        let a = engine(&dm, &fleet, &config)
            .run(vec![vec![1, 2, 3, 4], vec![]])
            .expect("feasible");
        let b = engine(&dm, &fleet, &config)
            .run(vec![vec![1, 2, 3, 4], vec![]])
            .expect("feasible");
        assert_eq!(a.routes, b.routes);
        assert_eq!(a.stats.best_costs, b.stats.best_costs);
    }

    #[test]
    fn test_runs_without_deadline() {
        let dm = two_clusters();
        let fleet = Vehicle::fleet(2, 0, 300_000);
        let config = SolverConfig::default().with_max_idle_scans(5);
        let outcome = GuidedLocalSearch::new(&dm, &fleet, &config, None)
            .run(vec![vec![1, 2, 3, 4], vec![]])
            .expect("feasible");
        assert!(!outcome.stats.deadline_reached);
        assert!(outcome.stats.local_optima >= 5);
    }

    #[test]
    fn test_cost_matches_evaluator() {
        let dm = two_clusters();
        let fleet = Vehicle::fleet(2, 0, 300_000);
        let config = SolverConfig::default().with_max_idle_scans(10);
        let outcome = engine(&dm, &fleet, &config)
            .run(vec![vec![1, 2, 3, 4], vec![]])
            .expect("feasible");
        let evaluator = RouteEvaluator::new(&dm, &fleet, config.span_coefficient);
        let solution = evaluator.build_solution(&outcome.routes);
        let (objective, violations) = evaluator.evaluate_solution(&solution);
        assert_eq!(outcome.cost, objective);
        assert!(violations.is_empty());
    }
}
