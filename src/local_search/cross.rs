//! Cross operator (2-opt*): swap route tails between two vehicles.
//!
//! # Algorithm
//!
//! Given routes R1 = [a₁, ..., aᵢ, aᵢ₊₁, ..., aₙ] and
//! R2 = [b₁, ..., bⱼ, bⱼ₊₁, ..., bₘ], produce:
//!
//! R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ]
//! R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ]
//!
//! Cuts range over `0..=len`, so a whole route can be handed to an empty
//! vehicle. Tails keep their direction, so each new route cost is
//! `head + link + tail` read from the [`CostProfile`]s.
//!
//! # Complexity
//!
//! O(1) per candidate.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use crate::distance::ArcCost;

use super::profile::CostProfile;
use super::{RouteCosts, Slot};

/// New route costs after exchanging the tails starting at cuts `a` and `b`.
///
/// `a` and `b` must lie on different routes; `pos` is the index of the first
/// tail stop and may equal the route length (empty tail).
pub(crate) fn cross_costs(
    routes: &[Vec<usize>],
    profiles: &[CostProfile],
    depot: usize,
    arcs: &impl ArcCost,
    a: Slot,
    b: Slot,
) -> RouteCosts {
    let r1 = &routes[a.route];
    let r2 = &routes[b.route];
    let p1 = &profiles[a.route];
    let p2 = &profiles[b.route];

    let last1 = if a.pos == 0 { depot } else { r1[a.pos - 1] };
    let last2 = if b.pos == 0 { depot } else { r2[b.pos - 1] };
    let first1 = r1.get(a.pos).copied().unwrap_or(depot);
    let first2 = r2.get(b.pos).copied().unwrap_or(depot);

    RouteCosts::two(
        a.route,
        p1.head(a.pos) + arcs.arc(last1, first2) + p2.tail(b.pos),
        b.route,
        p2.head(b.pos) + arcs.arc(last2, first1) + p1.tail(a.pos),
    )
}

/// Exchanges the tails starting at `a` and `b`.
pub(crate) fn apply_cross(routes: &mut [Vec<usize>], a: Slot, b: Slot) {
    let tail1 = routes[a.route].split_off(a.pos);
    let tail2 = routes[b.route].split_off(b.pos);
    routes[a.route].extend(tail2);
    routes[b.route].extend(tail1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Coordinate;

    fn clusters() -> DistanceMatrix {
        DistanceMatrix::from_coordinates(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.001, 0.005),   // east
            Coordinate::new(-0.001, -0.005), // west
            Coordinate::new(0.001, -0.005),  // west
            Coordinate::new(-0.001, 0.005),  // east
        ])
    }

    fn check(dm: &DistanceMatrix, routes: Vec<Vec<usize>>, a: Slot, b: Slot) -> Vec<Vec<usize>> {
        let profiles: Vec<CostProfile> =
            routes.iter().map(|r| CostProfile::build(r, 0, dm)).collect();
        let costs = cross_costs(&routes, &profiles, 0, dm, a, b);
        let mut crossed = routes.clone();
        apply_cross(&mut crossed, a, b);
        for (route, cost) in costs.iter() {
            assert_eq!(cost, dm.route_cost(&crossed[route], 0), "route {route}");
        }
        crossed
    }

    #[test]
    fn test_fixes_interleaved_routes() {
        let dm = clusters();
        let crossed = check(&dm, vec![vec![1, 2], vec![4, 3]], Slot::new(0, 1), Slot::new(1, 1));
        assert_eq!(crossed, vec![vec![1, 3], vec![4, 2]]);
    }

    #[test]
    fn test_every_cut_pair() {
        let dm = clusters();
        let routes = vec![vec![1, 2], vec![4, 3]];
        for i in 0..=2 {
            for j in 0..=2 {
                check(&dm, routes.clone(), Slot::new(0, i), Slot::new(1, j));
            }
        }
    }

    #[test]
    fn test_tail_into_empty_vehicle() {
        let dm = clusters();
        let crossed = check(&dm, vec![vec![1, 4, 2, 3], vec![]], Slot::new(0, 2), Slot::new(1, 0));
        assert_eq!(crossed, vec![vec![1, 4], vec![2, 3]]);
    }
}
