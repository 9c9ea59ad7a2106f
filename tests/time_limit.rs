//! Wall-clock behaviour of the solve entry points on large inputs.

use std::time::{Duration, Instant};

use delivery_routing::{optimize, Coordinate, RoutingError, SolverConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_stops(count: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Coordinate::new(rng.random_range(-0.05..0.05), rng.random_range(-0.05..0.05)))
        .collect()
}

#[test]
fn large_input_returns_near_time_limit() {
    let stops = random_stops(2_000, 7);
    let limit = Duration::from_secs(1);
    let config = SolverConfig::default()
        .with_time_limit(limit)
        .with_max_distance(100_000_000);

    let started = Instant::now();
    let result = optimize(&stops, 1, &config);
    let elapsed = started.elapsed();

    assert!(elapsed < limit * 8, "solve took {elapsed:?} for a {limit:?} limit");
    match result {
        Ok(solved) => assert_eq!(solved.solution.num_served(), stops.len() - 1),
        Err(err) => assert_eq!(err, RoutingError::NoFeasibleSolution),
    }
}

#[test]
fn large_fleet_covers_every_stop_under_deadline() {
    let stops = random_stops(600, 11);
    let config = SolverConfig::default()
        .with_time_limit(Duration::from_millis(500))
        .with_max_distance(100_000_000);

    let solved = optimize(&stops, 4, &config).expect("ceiling is generous");
    assert_eq!(solved.solution.num_routes(), 4);
    assert_eq!(
        solved.solution.served_stops(),
        (1..stops.len()).collect::<Vec<_>>()
    );
}
