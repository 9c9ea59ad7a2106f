//! # delivery-routing
//!
//! Delivery route optimization: assigns stops to a fleet of vehicles and
//! orders each route, minimizing total distance under a per-vehicle distance
//! ceiling while keeping route lengths balanced. One vehicle gives a TSP tour.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Coordinate, Vehicle, Route, Solution)
//! - [`distance`] — Integer distance matrix and the arc cost trait
//! - [`evaluation`] — Route distance, span cost and ceiling violations
//! - [`constructive`] — Cheapest-insertion construction
//! - [`local_search`] — Move operators and guided local search
//! - [`solver`] — `optimize` and `recalculate` entry points
//! - [`config`] — Per-solve parameters
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use delivery_routing::{optimize, Coordinate, SolverConfig};
//!
//! let stops = [
//!     Coordinate::new(37.5665, 126.9780),
//!     Coordinate::new(37.5700, 126.9820),
//!     Coordinate::new(37.5600, 126.9750),
//!     Coordinate::new(37.5650, 126.9900),
//! ];
//! let config = SolverConfig::default().with_time_limit(Duration::from_secs(1));
//! let solved = optimize(&stops, 2, &config).unwrap();
//!
//! assert_eq!(solved.solution.served_stops(), vec![1, 2, 3]);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod solver;

pub use config::SolverConfig;
pub use error::{ConfigurationError, RoutingError};
pub use models::{Coordinate, Route, Solution};
pub use solver::{optimize, optimize_matrix, recalculate, Solved};
