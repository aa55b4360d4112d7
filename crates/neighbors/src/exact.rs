//! Brute-force conditioning sets from a full distance matrix.

use ndarray::ArrayView2;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::assemble::{between_unchecked, observation_unchecked};
use crate::buffer::BoundedSortedBuffer;
use crate::config::{ResolvedSearch, SearchConfig};
use crate::distance::{pairwise_distances, validate_coordinates};
use crate::error::NeighborError;
use crate::result::ConditioningSets;

/// Finds the exact `k` nearest prior points of every point.
///
/// `distance_matrix` must be the `n × n` Euclidean distance matrix of the
/// points. Set `i` holds every `j < i` when `i <= k`, otherwise the `k`
/// indices `j < i` with the smallest `distance_matrix[[i, j]]`. Sets are
/// sorted by ascending distance; equal distances keep the lower index first.
///
/// A `k` of `n` or more is clipped to `n - 1` with a single warning, as in
/// [`crate::approximate_neighbors`].
///
/// The output does not depend on the rayon pool size.
///
/// # Errors
///
/// Returns [`NeighborError`] if the matrix is not square, has no rows,
/// contains non-finite values, or `k == 0`.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use vecchia_neighbors::{exact_neighbors, pairwise_distances};
///
/// let coords = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
/// let dist = pairwise_distances(coords.view());
/// let sets = exact_neighbors(dist.view(), 2).unwrap();
/// assert_eq!(sets[4], vec![3, 2]);
/// ```
#[tracing::instrument(skip(distance_matrix), fields(n = distance_matrix.nrows()))]
pub fn exact_neighbors(
    distance_matrix: ArrayView2<'_, f64>,
    k: usize,
) -> Result<Vec<Vec<usize>>, NeighborError> {
    let (rows, cols) = distance_matrix.dim();
    if rows != cols {
        return Err(NeighborError::NonSquareDistanceMatrix { rows, cols });
    }
    if rows == 0 {
        return Err(NeighborError::EmptyCoordinates);
    }
    if k == 0 {
        return Err(NeighborError::InvalidK { k });
    }
    if distance_matrix.iter().any(|v| !v.is_finite()) {
        return Err(NeighborError::NonFiniteInput {
            input: "distance_matrix",
        });
    }

    let search = ResolvedSearch {
        k: k.min(rows - 1),
        requested_k: k,
        start_at: 0,
        n_candidates: rows - 1,
    };
    if search.is_clipped() {
        warn!(
            requested = k,
            n_candidates = search.n_candidates,
            k = search.k,
            "number of neighbors exceeds the number of candidates; clipped"
        );
    }
    let sets = scan(distance_matrix, &search);
    debug!(n = rows, k = search.k, "exact neighbor search done");
    Ok(sets)
}

/// Brute-force counterpart of [`crate::approximate_neighbors`].
///
/// Builds the full distance matrix, finds exact neighbor sets for
/// `start_at..n` restricted to the configured search ceiling, then assembles
/// both distance structures. k is clipped exactly like the approximate
/// finder. Costs O(n²) time and memory.
///
/// # Errors
///
/// Returns [`NeighborError`] on invalid coordinates or configuration.
#[tracing::instrument(skip(coords, config), fields(n = coords.nrows(), k = config.k()))]
pub fn exact_conditioning_sets(
    coords: ArrayView2<'_, f64>,
    config: &SearchConfig,
) -> Result<ConditioningSets, NeighborError> {
    let n = validate_coordinates(coords)?;
    let search = config.resolve(n)?;
    if search.is_clipped() {
        warn!(
            requested = search.requested_k,
            n_candidates = search.n_candidates,
            k = search.k,
            "number of neighbors exceeds the number of candidates; clipped"
        );
    }

    let dist = pairwise_distances(coords);
    let neighbors = scan(dist.view(), &search);
    let obs = observation_unchecked(coords, search.start_at, &neighbors);
    let between = between_unchecked(coords, &neighbors);
    debug!(n, k = search.k, "exact conditioning sets assembled");

    Ok(ConditioningSets::new(
        search.start_at,
        search.requested_k,
        search.k,
        neighbors,
        obs,
        between,
    ))
}

/// Scans every eligible `j` for each point in `start_at..n`.
///
/// Per-point cost grows with `i`; rayon's work stealing evens out the
/// triangular load.
fn scan(dist: ArrayView2<'_, f64>, search: &ResolvedSearch) -> Vec<Vec<usize>> {
    let n = dist.nrows();
    (search.start_at..n)
        .into_par_iter()
        .map(|i| {
            if search.k == 0 {
                return Vec::new();
            }
            let mut buf = BoundedSortedBuffer::new(search.k);
            for j in 0..i.min(search.n_candidates) {
                buf.insert(dist[[i, j]], j);
            }
            buf.indices().collect()
        })
        .collect()
}
