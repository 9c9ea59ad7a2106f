//! Domain model types for delivery routing.
//!
//! Stops are coordinates addressed by index, vehicles carry a distance
//! ceiling, and a solution holds one ordered route per vehicle.

mod coordinate;
mod route;
mod solution;
mod vehicle;

pub use coordinate::Coordinate;
pub use route::Route;
pub use solution::{Solution, Violation};
pub use vehicle::Vehicle;
