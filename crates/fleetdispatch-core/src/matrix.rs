//! Pairwise location distance matrix.

use crate::domain::Location;

/// Square matrix of Manhattan distances between all location pairs.
///
/// Built once at `WorldState` construction and immutable afterwards;
/// locations and their coordinates never change after load. Entries are
/// non-negative and symmetric by construction.
///
/// # Example
///
/// ```
/// use fleetdispatch_core::{DistanceMatrix, Location, LocationKind};
///
/// let locations = vec![
///     Location { name: "QC01".into(), x: 0, y: 0, kind: LocationKind::QuayCrane, capacity: 1 },
///     Location { name: "ST01".into(), x: 30, y: 40, kind: LocationKind::Stack, capacity: 2 },
/// ];
/// let matrix = DistanceMatrix::from_locations(&locations);
/// assert_eq!(matrix.get(0, 1), 70);
/// assert_eq!(matrix.get(1, 0), 70);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<u64>,
}

impl DistanceMatrix {
    /// Computes the full pairwise matrix from location coordinates.
    pub fn from_locations(locations: &[Location]) -> Self {
        let size = locations.len();
        let mut values = vec![0u64; size * size];
        for (i, a) in locations.iter().enumerate() {
            for (j, b) in locations.iter().enumerate() {
                values[i * size + j] = manhattan(a.x, a.y, b.x, b.y);
            }
        }
        Self { size, values }
    }

    /// Returns the distance between locations at indices `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds; index resolution from names is
    /// the caller's responsibility (`WorldState::distance` does the checked
    /// name lookup).
    pub fn get(&self, i: usize, j: usize) -> u64 {
        assert!(i < self.size && j < self.size, "location index out of bounds");
        self.values[i * self.size + j]
    }

    /// Number of locations covered by the matrix.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the matrix covers no locations.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

fn manhattan(x1: i64, y1: i64, x2: i64, y2: i64) -> u64 {
    x1.abs_diff(x2) + y1.abs_diff(y2)
}
