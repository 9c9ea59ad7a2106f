//! Distance matrices and arc costs.
//!
//! Provides the dense integer [`DistanceMatrix`] and the [`ArcCost`] trait
//! the search uses to price arcs, either plainly or with penalties added.

mod matrix;

pub use matrix::{DistanceMatrix, COORDINATE_SCALE};

/// Cost of travelling directly between two locations.
pub trait ArcCost {
    /// Cost of the arc `from → to`.
    fn arc(&self, from: usize, to: usize) -> i64;

    /// Returns `true` if `arc(i, j) == arc(j, i)` for every pair.
    fn is_symmetric(&self) -> bool;

    /// Cost of `depot → route[0] → … → route[n-1] → depot`.
    fn route_cost(&self, route: &[usize], depot: usize) -> i64 {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return 0;
        };
        let inner: i64 = route.windows(2).map(|w| self.arc(w[0], w[1])).sum();
        self.arc(depot, first) + inner + self.arc(last, depot)
    }
}
