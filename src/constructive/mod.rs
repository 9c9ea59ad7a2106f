//! Constructive heuristics for building initial routes.
//!
//! - [`cheapest_insertion`] — Global cheapest insertion across all vehicles, O(n² · V) plus cache re-scans

mod cheapest_insertion;

pub use cheapest_insertion::{cheapest_insertion, cheapest_insertion_until};
pub(crate) use cheapest_insertion::insertion_cost;
