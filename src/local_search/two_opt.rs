//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! Reversing the segment `r[i..=j]` replaces the arcs `(prev_i, r[i])` and
//! `(r[j], next_j)`:
//!
//! ```text
//! delta = d(prev_i, r[j]) + d(r[i], next_j) - d(prev_i, r[i]) - d(r[j], next_j)
//!       + reversed(i, j) - forward(i, j)
//! ```
//!
//! The last line vanishes on symmetric costs; otherwise it is read from the
//! route's [`CostProfile`] so the delta stays O(1).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::ArcCost;

use super::profile::CostProfile;
use super::RouteCosts;

/// New cost of `route` after reversing `route[start..=end]`.
pub(crate) fn two_opt_costs(
    routes: &[Vec<usize>],
    profiles: &[CostProfile],
    depot: usize,
    arcs: &impl ArcCost,
    route: usize,
    start: usize,
    end: usize,
) -> RouteCosts {
    let r = &routes[route];
    let profile = &profiles[route];
    let prev = if start == 0 { depot } else { r[start - 1] };
    let next = if end + 1 == r.len() { depot } else { r[end + 1] };

    let old_cost = arcs.arc(prev, r[start]) + arcs.arc(r[end], next);
    let new_cost = arcs.arc(prev, r[end]) + arcs.arc(r[start], next);
    let inner = if arcs.is_symmetric() {
        0
    } else {
        profile.reversed_segment(start, end) - profile.segment(start, end)
    };

    RouteCosts::one(route, profile.total() + new_cost - old_cost + inner)
}

/// Reverses `route[start..=end]`.
pub(crate) fn apply_two_opt(routes: &mut [Vec<usize>], route: usize, start: usize, end: usize) {
    routes[route][start..=end].reverse();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Coordinate;

    fn cost_after(dm: &DistanceMatrix, route: Vec<usize>, start: usize, end: usize) -> (i64, i64) {
        let routes = vec![route];
        let profiles = vec![CostProfile::build(&routes[0], 0, dm)];
        let predicted = two_opt_costs(&routes, &profiles, 0, dm, 0, start, end)
            .iter()
            .map(|(_, c)| c)
            .sum();
        let mut reversed = routes.clone();
        apply_two_opt(&mut reversed, 0, start, end);
        (predicted, dm.route_cost(&reversed[0], 0))
    }

    #[test]
    fn test_reverses_crossing() {
        // depot(0,0) → (1,1) → (1,-1) → (2,0) → depot crosses itself
        let dm = DistanceMatrix::from_coordinates(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.001, 0.001),
            Coordinate::new(0.002, 0.0),
            Coordinate::new(0.001, -0.001),
        ]);
        let before = dm.route_cost(&[1, 3, 2], 0);
        let (predicted, actual) = cost_after(&dm, vec![1, 3, 2], 1, 2);
        assert_eq!(predicted, actual);
        assert!(actual < before);
    }

    #[test]
    fn test_asymmetric_inner_arcs() {
        // Forward along the index order is cheap, backward is expensive
        let n = 4;
        let mut data = vec![0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    data[i * n + j] = if i < j { 1 } else { 3 };
                }
            }
        }
        let dm = DistanceMatrix::from_data(n, data).expect("valid");
        for (start, end) in [(0, 1), (0, 2), (1, 2)] {
            let (predicted, actual) = cost_after(&dm, vec![1, 2, 3], start, end);
            assert_eq!(predicted, actual, "segment {start}..={end}");
        }
    }
}
