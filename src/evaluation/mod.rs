//! Route distance, balancing cost and ceiling checks.

mod evaluator;

pub use evaluator::{span_cost, RouteEvaluator};
