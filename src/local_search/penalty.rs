//! Guided local search arc penalties.
//!
//! Each arc carries a penalty count `p(i, j)`. The search minimizes the
//! augmented cost `d(i, j) + λ·p(i, j)` so that arcs which keep showing up in
//! local optima become progressively less attractive.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its application
//! to the traveling salesman problem", *European Journal of Operational
//! Research* 113(2), 469-499.

use crate::distance::{ArcCost, DistanceMatrix};

/// Penalty counts per arc.
///
/// On a symmetric matrix `(i, j)` and `(j, i)` share one counter so the
/// augmented cost stays symmetric.
#[derive(Debug, Clone)]
pub(crate) struct Penalties {
    counts: Vec<u32>,
    size: usize,
    symmetric: bool,
}

impl Penalties {
    pub(crate) fn new(size: usize, symmetric: bool) -> Self {
        Self {
            counts: vec![0; size * size],
            size,
            symmetric,
        }
    }

    fn index(&self, from: usize, to: usize) -> usize {
        if self.symmetric && from > to {
            to * self.size + from
        } else {
            from * self.size + to
        }
    }

    pub(crate) fn get(&self, from: usize, to: usize) -> u32 {
        self.counts[self.index(from, to)]
    }

    pub(crate) fn increment(&mut self, from: usize, to: usize) {
        let idx = self.index(from, to);
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    /// Penalizes the arcs of `arcs` with maximal utility `d / (1 + p)`.
    ///
    /// Returns how many arcs were penalized.
    pub(crate) fn penalize_max_utility(
        &mut self,
        distances: &DistanceMatrix,
        arcs: &[(usize, usize)],
    ) -> usize {
        // Compare d1 / (1 + p1) against d2 / (1 + p2) by cross-multiplying
        let utility = |&(i, j): &(usize, usize)| {
            (
                i128::from(distances.get(i, j)),
                i128::from(self.get(i, j)) + 1,
            )
        };
        let Some(best) = arcs.iter().map(utility).reduce(|a, b| {
            if b.0 * a.1 > a.0 * b.1 {
                b
            } else {
                a
            }
        }) else {
            return 0;
        };

        let chosen: Vec<(usize, usize)> = arcs
            .iter()
            .filter(|arc| {
                let u = utility(*arc);
                u.0 * best.1 == best.0 * u.1
            })
            .copied()
            .collect();
        for &(i, j) in &chosen {
            self.increment(i, j);
        }
        chosen.len()
    }
}

/// Arc cost with guided local search penalties folded in.
pub(crate) struct AugmentedCost<'a> {
    distances: &'a DistanceMatrix,
    penalties: &'a Penalties,
    lambda: i64,
}

impl<'a> AugmentedCost<'a> {
    pub(crate) fn new(distances: &'a DistanceMatrix, penalties: &'a Penalties, lambda: i64) -> Self {
        Self {
            distances,
            penalties,
            lambda,
        }
    }
}

impl ArcCost for AugmentedCost<'_> {
    fn arc(&self, from: usize, to: usize) -> i64 {
        self.distances.get(from, to) + self.lambda * i64::from(self.penalties.get(from, to))
    }

    fn is_symmetric(&self) -> bool {
        self.distances.is_symmetric()
    }
}

/// Every arc traversed by the routes, depot legs included.
pub(crate) fn route_arcs(routes: &[Vec<usize>], depot: usize) -> Vec<(usize, usize)> {
    let mut arcs = Vec::new();
    for route in routes.iter().filter(|r| !r.is_empty()) {
        let mut prev = depot;
        for &stop in route {
            arcs.push((prev, stop));
            prev = stop;
        }
        arcs.push((prev, depot));
    }
    arcs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DistanceMatrix {
        DistanceMatrix::from_data(
            3,
            vec![
                0, 10, 40, //
                10, 0, 20, //
                40, 20, 0,
            ],
        )
        .expect("valid")
    }

    #[test]
    fn test_symmetric_share_counter() {
        let mut p = Penalties::new(3, true);
        p.increment(2, 1);
        assert_eq!(p.get(1, 2), 1);
        assert_eq!(p.get(2, 1), 1);
        let mut q = Penalties::new(3, false);
        q.increment(2, 1);
        assert_eq!(q.get(1, 2), 0);
    }

    #[test]
    fn test_augmented_cost() {
        let dm = square();
        let mut p = Penalties::new(3, true);
        p.increment(0, 2);
        p.increment(0, 2);
        let aug = AugmentedCost::new(&dm, &p, 5);
        assert_eq!(aug.arc(2, 0), 50);
        assert_eq!(aug.arc(0, 1), 10);
    }

    #[test]
    fn test_penalize_longest_arc_first() {
        let dm = square();
        let mut p = Penalties::new(3, true);
        let arcs = route_arcs(&[vec![1, 2]], 0);
        assert_eq!(arcs, vec![(0, 1), (1, 2), (2, 0)]);

        assert_eq!(p.penalize_max_utility(&dm, &arcs), 1);
        assert_eq!(p.get(2, 0), 1);
        // Utilities now 10, 20, 20: both remaining maxima are penalized
        assert_eq!(p.penalize_max_utility(&dm, &arcs), 2);
        assert_eq!(p.get(1, 2), 1);
        assert_eq!(p.get(0, 2), 2);
    }

    #[test]
    fn test_penalize_nothing() {
        let dm = square();
        let mut p = Penalties::new(3, true);
        assert_eq!(p.penalize_max_utility(&dm, &[]), 0);
        assert!(route_arcs(&[vec![], vec![]], 0).is_empty());
    }
}
