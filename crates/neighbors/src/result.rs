//! Output type for conditioning-set searches.

use ndarray::{Array1, Array2};

/// Conditioning sets for the points `start_at..n`.
///
/// Entry `i - start_at` of each collection belongs to point `i`. Neighbor
/// lists are sorted by ascending distance to their owner, and the distance
/// row of a point is index-aligned with its neighbor list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditioningSets {
    start_at: usize,
    requested_k: usize,
    k: usize,
    neighbors: Vec<Vec<usize>>,
    obs_distances: Vec<Array1<f64>>,
    between_distances: Vec<Array2<f64>>,
}

impl ConditioningSets {
    pub(crate) fn new(
        start_at: usize,
        requested_k: usize,
        k: usize,
        neighbors: Vec<Vec<usize>>,
        obs_distances: Vec<Array1<f64>>,
        between_distances: Vec<Array2<f64>>,
    ) -> Self {
        debug_assert_eq!(neighbors.len(), obs_distances.len());
        debug_assert_eq!(neighbors.len(), between_distances.len());
        Self {
            start_at,
            requested_k,
            k,
            neighbors,
            obs_distances,
            between_distances,
        }
    }

    /// First point index covered.
    pub fn start_at(&self) -> usize {
        self.start_at
    }

    /// Number of covered points (`n - start_at`).
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns true if no point is covered.
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbor count asked for.
    pub fn requested_k(&self) -> usize {
        self.requested_k
    }

    /// Neighbor count actually used after clipping to the candidate range.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns true if the requested k exceeded the number of candidates.
    pub fn is_clipped(&self) -> bool {
        self.k < self.requested_k
    }

    /// Neighbor lists, one per covered point.
    pub fn neighbors(&self) -> &[Vec<usize>] {
        &self.neighbors
    }

    /// Owner-to-neighbor distance rows, one per covered point.
    pub fn obs_distances(&self) -> &[Array1<f64>] {
        &self.obs_distances
    }

    /// Neighbor-to-neighbor distance matrices, one per covered point.
    pub fn between_distances(&self) -> &[Array2<f64>] {
        &self.between_distances
    }

    /// Neighbor list of point `i`, or `None` if `i` is not covered.
    pub fn neighbors_of(&self, i: usize) -> Option<&[usize]> {
        let pos = i.checked_sub(self.start_at)?;
        self.neighbors.get(pos).map(Vec::as_slice)
    }

    /// Owner-to-neighbor distances of point `i`, or `None` if `i` is not covered.
    pub fn obs_distances_of(&self, i: usize) -> Option<&Array1<f64>> {
        let pos = i.checked_sub(self.start_at)?;
        self.obs_distances.get(pos)
    }

    /// Neighbor-to-neighbor distances of point `i`, or `None` if `i` is not covered.
    pub fn between_distances_of(&self, i: usize) -> Option<&Array2<f64>> {
        let pos = i.checked_sub(self.start_at)?;
        self.between_distances.get(pos)
    }

    /// Splits into `(neighbors, obs_distances, between_distances)`.
    pub fn into_parts(self) -> (Vec<Vec<usize>>, Vec<Array1<f64>>, Vec<Array2<f64>>) {
        (self.neighbors, self.obs_distances, self.between_distances)
    }
}
