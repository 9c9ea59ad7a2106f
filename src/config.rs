//! Solver parameters.
//!
//! A [`SolverConfig`] is an immutable value passed into each solve. Two solves
//! running side by side never share or mutate parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Default per-vehicle route distance ceiling, in matrix units.
pub const DEFAULT_MAX_DISTANCE: i64 = 300_000;

/// Default weight of the longest-minus-shortest route term.
pub const DEFAULT_SPAN_COEFFICIENT: i64 = 100;

/// Parameters for one solve.
///
/// Deserializes from a partial document; missing fields take their defaults.
/// The time limit is expressed in whole seconds on the wire.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use delivery_routing::config::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_max_distance(50_000)
///     .with_time_limit(Duration::from_secs(2));
/// assert_eq!(config.depot, 0);
/// assert_eq!(config.span_coefficient, 100);
/// assert_eq!(config.max_distance_per_vehicle, 50_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Index of the depot among the supplied stops.
    pub depot: usize,
    /// Maximum cumulative route distance of every vehicle.
    pub max_distance_per_vehicle: i64,
    /// Weight applied to `max route distance - min route distance`.
    pub span_coefficient: i64,
    /// Wall-clock budget for the whole solve.
    #[serde(with = "duration_secs", rename = "time_limit_seconds")]
    pub time_limit: Duration,
    /// Scales the guided local search penalty weight λ.
    pub lambda_coefficient: f64,
    /// Cost per unit of distance above a vehicle's ceiling.
    pub ceiling_penalty: i64,
    /// Consecutive local optima without a new best before the search stops.
    pub max_idle_scans: usize,
    /// Seed for the stop visiting order of each pass.
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            depot: 0,
            max_distance_per_vehicle: DEFAULT_MAX_DISTANCE,
            span_coefficient: DEFAULT_SPAN_COEFFICIENT,
            time_limit: Duration::from_secs(30),
            lambda_coefficient: 0.1,
            ceiling_penalty: 1_000,
            max_idle_scans: 100,
            seed: 42,
        }
    }
}

impl SolverConfig {
    /// Sets the depot index.
    pub fn with_depot(mut self, depot: usize) -> Self {
        self.depot = depot;
        self
    }

    /// Sets the per-vehicle distance ceiling.
    pub fn with_max_distance(mut self, max: i64) -> Self {
        self.max_distance_per_vehicle = max;
        self
    }

    /// Sets the global span coefficient.
    pub fn with_span_coefficient(mut self, coefficient: i64) -> Self {
        self.span_coefficient = coefficient;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the idle local optima limit.
    pub fn with_max_idle_scans(mut self, scans: usize) -> Self {
        self.max_idle_scans = scans;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks parameters that do not depend on the stop set.
    ///
    /// Rejects a zero time limit and a negative ceiling, span coefficient or
    /// ceiling penalty.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.time_limit.is_zero() {
            return Err(ConfigurationError::ZeroTimeLimit);
        }
        let non_negative = [
            ("max_distance_per_vehicle", self.max_distance_per_vehicle),
            ("span_coefficient", self.span_coefficient),
            ("ceiling_penalty", self.ceiling_penalty),
        ];
        if let Some(&(name, value)) = non_negative.iter().find(|(_, v)| *v < 0) {
            return Err(ConfigurationError::NegativeParameter { name, value });
        }
        Ok(())
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.depot, 0);
        assert_eq!(config.max_distance_per_vehicle, 300_000);
        assert_eq!(config.span_coefficient, 100);
        assert_eq!(config.time_limit, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_time_limit_rejected() {
        let config = SolverConfig::default().with_time_limit(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroTimeLimit));
    }

    #[test]
    fn test_negative_weights_rejected() {
        let mut config = SolverConfig::default();
        config.ceiling_penalty = -1;
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::NegativeParameter {
                name: "ceiling_penalty",
                value: -1,
            })
        );

        let config = SolverConfig::default().with_span_coefficient(-5);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::NegativeParameter {
                name: "span_coefficient",
                ..
            })
        ));

        let config = SolverConfig::default().with_max_distance(-1);
        assert!(config.validate().is_err());
        assert!(SolverConfig::default().with_span_coefficient(0).validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"time_limit_seconds": 5, "span_coefficient": 0}"#)
                .expect("valid config");
        assert_eq!(config.time_limit, Duration::from_secs(5));
        assert_eq!(config.span_coefficient, 0);
        assert_eq!(config.max_distance_per_vehicle, DEFAULT_MAX_DISTANCE);
    }

    #[test]
    fn test_json_roundtrip_uses_seconds() {
        let config = SolverConfig::default().with_time_limit(Duration::from_secs(7));
        let value = serde_json::to_value(&config).expect("serializable");
        assert_eq!(value["time_limit_seconds"], 7);
    }
}
