//! Cumulative arc costs along a route.
//!
//! A [`CostProfile`] lets move evaluation price any contiguous piece of a
//! route, traversed forwards or backwards, in O(1).

use crate::distance::ArcCost;

/// Prefix sums of arc costs along one route under one cost function.
///
/// For a route `r[0..n]` starting and ending at the depot:
///
/// - `forward[k]` is the cost of `depot → r[0] → … → r[k-1]`
/// - `backward[k]` is the cost of `r[k-1] → … → r[0]`
/// - `total` adds the final `r[n-1] → depot` leg
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CostProfile {
    forward: Vec<i64>,
    backward: Vec<i64>,
    total: i64,
}

impl CostProfile {
    /// Computes the profile of `route` in O(n).
    pub(crate) fn build(route: &[usize], depot: usize, arcs: &impl ArcCost) -> Self {
        let n = route.len();
        let mut forward = Vec::with_capacity(n + 1);
        let mut backward = Vec::with_capacity(n + 1);
        forward.push(0);
        backward.push(0);

        let mut prev = depot;
        for (k, &stop) in route.iter().enumerate() {
            forward.push(forward[k] + arcs.arc(prev, stop));
            let back = if k == 0 { 0 } else { arcs.arc(stop, prev) };
            backward.push(backward[k] + back);
            prev = stop;
        }

        let total = forward[n] + if n == 0 { 0 } else { arcs.arc(prev, depot) };
        Self {
            forward,
            backward,
            total,
        }
    }

    /// Cost of the complete route.
    pub(crate) fn total(&self) -> i64 {
        self.total
    }

    /// Cost from the depot up to and including the first `k` stops.
    pub(crate) fn head(&self, k: usize) -> i64 {
        self.forward[k]
    }

    /// Cost from stop `k` through the end of the route back to the depot.
    ///
    /// Zero when `k` equals the route length.
    pub(crate) fn tail(&self, k: usize) -> i64 {
        if k + 1 >= self.forward.len() {
            0
        } else {
            self.total - self.forward[k + 1]
        }
    }

    /// Cost of `r[i] → … → r[j]` for `i <= j`.
    pub(crate) fn segment(&self, i: usize, j: usize) -> i64 {
        self.forward[j + 1] - self.forward[i + 1]
    }

    /// Cost of `r[j] → … → r[i]` for `i <= j`.
    pub(crate) fn reversed_segment(&self, i: usize, j: usize) -> i64 {
        self.backward[j + 1] - self.backward[i + 1]
    }
}
