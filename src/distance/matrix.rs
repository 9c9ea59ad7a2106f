//! Dense integer distance matrix.

use crate::error::ConfigurationError;
use crate::models::Coordinate;

use super::ArcCost;

/// Multiplier applied to coordinate distances in degrees before rounding.
///
/// Keeps about five decimal digits of geographic precision in integer units.
pub const COORDINATE_SCALE: f64 = 100_000.0;

/// A dense n×n integer distance matrix stored in row-major order.
///
/// Entries are non-negative and the diagonal is zero. Symmetry is detected
/// once at construction so the search can use cheaper move deltas.
///
/// # Examples
///
/// ```
/// use delivery_routing::models::Coordinate;
/// use delivery_routing::distance::DistanceMatrix;
///
/// let stops = vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(1.0, 0.0),
///     Coordinate::new(0.0, 0.5),
/// ];
/// let dm = DistanceMatrix::from_coordinates(&stops);
/// assert_eq!(dm.get(0, 1), 100_000);
/// assert_eq!(dm.get(0, 2), 50_000);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
    symmetric: bool,
}

impl DistanceMatrix {
    /// Computes the scaled straight-line matrix from coordinates.
    ///
    /// Entry (i, j) is `round(euclidean(i, j) * COORDINATE_SCALE)`.
    pub fn from_coordinates(stops: &[Coordinate]) -> Self {
        let n = stops.len();
        let mut data = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = scaled(stops[i].distance_to(&stops[j]));
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self {
            data,
            size: n,
            symmetric: true,
        }
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Rejects a length other than `size * size`, negative entries and a
    /// non-zero diagonal.
    pub fn from_data(size: usize, data: Vec<i64>) -> Result<Self, ConfigurationError> {
        if data.len() != size * size {
            return Err(ConfigurationError::InvalidMatrix(format!(
                "expected {} entries, got {}",
                size * size,
                data.len()
            )));
        }
        if let Some(pos) = data.iter().position(|&d| d < 0) {
            return Err(ConfigurationError::InvalidMatrix(format!(
                "negative entry at ({}, {})",
                pos / size,
                pos % size
            )));
        }
        if let Some(i) = (0..size).find(|&i| data[i * size + i] != 0) {
            return Err(ConfigurationError::InvalidMatrix(format!(
                "non-zero diagonal at {i}"
            )));
        }
        let symmetric =
            (0..size).all(|i| ((i + 1)..size).all(|j| data[i * size + j] == data[j * size + i]));
        Ok(Self {
            data,
            size,
            symmetric,
        })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Distance of the trip `depot → stop → depot`.
    pub fn round_trip(&self, depot: usize, stop: usize) -> i64 {
        self.get(depot, stop) + self.get(stop, depot)
    }
}

impl ArcCost for DistanceMatrix {
    fn arc(&self, from: usize, to: usize) -> i64 {
        self.get(from, to)
    }

    fn is_symmetric(&self) -> bool {
        self.symmetric
    }
}

fn scaled(degrees: f64) -> i64 {
    (degrees * COORDINATE_SCALE).round() as i64
}
