//! Error types returned by the routing entry points.

use thiserror::Error;

/// A problem with the solve inputs detected before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The fleet is empty.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// No coordinates were supplied.
    #[error("at least one stop is required")]
    NoStops,
    /// The depot index does not refer to a supplied stop.
    #[error("depot index {depot} is out of range for {len} stops")]
    DepotOutOfRange {
        /// Requested depot index.
        depot: usize,
        /// Number of stops supplied.
        len: usize,
    },
    /// The time budget is zero.
    #[error("time limit must be greater than zero")]
    ZeroTimeLimit,
    /// A weight or ceiling that must be non-negative is below zero.
    #[error("{name} must not be negative, got {value}")]
    NegativeParameter {
        /// Configuration field name.
        name: &'static str,
        /// Rejected value.
        value: i64,
    },
    /// A caller-supplied distance matrix is malformed.
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),
}

/// Errors returned by [`optimize`](crate::solver::optimize) and
/// [`recalculate`](crate::solver::recalculate).
///
/// # Examples
///
/// ```
/// use delivery_routing::error::{ConfigurationError, RoutingError};
///
/// let err = RoutingError::from(ConfigurationError::NoVehicles);
/// assert_eq!(err.to_string(), "invalid configuration: at least one vehicle is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Inputs were rejected; no search was attempted.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// No assignment satisfying every distance ceiling was found in time.
    #[error("no feasible solution found")]
    NoFeasibleSolution,
}

impl RoutingError {
    /// Returns `true` if the caller supplied invalid inputs.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RoutingError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depot_message() {
        let err = ConfigurationError::DepotOutOfRange { depot: 4, len: 2 };
        assert_eq!(err.to_string(), "depot index 4 is out of range for 2 stops");
    }

    #[test]
    fn test_negative_parameter_message() {
        let err = ConfigurationError::NegativeParameter {
            name: "ceiling_penalty",
            value: -3,
        };
        assert_eq!(err.to_string(), "ceiling_penalty must not be negative, got -3");
    }

    #[test]
    fn test_is_configuration() {
        assert!(RoutingError::from(ConfigurationError::NoStops).is_configuration());
        assert!(!RoutingError::NoFeasibleSolution.is_configuration());
    }
}
