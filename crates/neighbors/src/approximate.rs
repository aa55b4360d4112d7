//! Projection-pruned nearest-neighbor search.
//!
//! Points are ordered by the sum of their coordinates. For each point the
//! search walks outward from its rank in that order, alternating one step
//! down and one step up, and offers every eligible candidate to a bounded
//! buffer of squared distances.
//!
//! A direction stops once an eligible candidate satisfies
//!
//! ```text
//! (sum_c − sum_i)² > d · r²
//! ```
//!
//! where `r²` is the current k-th smallest squared distance. By
//! Cauchy–Schwarz, `(sum_c − sum_i)² ≤ d · ‖c − i‖²`, and sums only move
//! further away along a direction, so no later candidate in that direction
//! can enter the buffer. Ties in distance are resolved by discovery order,
//! which makes the chosen neighbor among equidistant candidates depend on
//! the walk rather than on the index.

use ndarray::{Array1, ArrayView2};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::assemble::between_unchecked;
use crate::buffer::BoundedSortedBuffer;
use crate::config::{ResolvedSearch, SearchConfig};
use crate::distance::{sq_euclidean, validate_coordinates};
use crate::error::NeighborError;
use crate::projection::Projection;
use crate::result::ConditioningSets;

/// Builds conditioning sets for the points `start_at..n` of `coords`.
///
/// Each point `i` is conditioned on at most `k` points `j < i` with
/// `j <= end_search_at`. While `i <= k` every prior point is used; beyond
/// that the nearest ones are found through the projection walk described in
/// the [module docs](self).
///
/// If `k` exceeds the number of candidates (`end_search_at + 1`) it is
/// clipped, a single warning is logged, and the result reports both values.
///
/// # Errors
///
/// Returns [`NeighborError`] if `coords` is empty, has no columns, contains
/// non-finite values, or the configuration is out of range for `n`.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use vecchia_neighbors::{SearchConfig, approximate_neighbors};
///
/// let coords = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
/// let sets = approximate_neighbors(coords.view(), &SearchConfig::new(2)).unwrap();
/// assert_eq!(sets.neighbors_of(4), Some(&[3, 2][..]));
/// assert_eq!(sets.obs_distances_of(4).unwrap().to_vec(), vec![1.0, 2.0]);
/// ```
#[tracing::instrument(
    skip(coords, config),
    fields(n = coords.nrows(), dim = coords.ncols(), k = config.k())
)]
pub fn approximate_neighbors(
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

    let projection = Projection::new(coords);
    debug!("projection order built");

    let (neighbors, obs): (Vec<Vec<usize>>, Vec<Array1<f64>>) = (search.start_at..n)
        .into_par_iter()
        .map(|i| {
            let buf = if i <= search.k {
                bootstrap(coords, &search, i)
            } else {
                walk(coords, &projection, &search, i)
            };
            let set: Vec<usize> = buf.indices().collect();
            let dists: Array1<f64> = buf.distances().map(f64::sqrt).collect();
            (set, dists)
        })
        .unzip();
    debug!(first_searched = search.k + 1, "neighbor search done");

    let between = between_unchecked(coords, &neighbors);
    debug!("neighbor distance matrices assembled");

    Ok(ConditioningSets::new(
        search.start_at,
        search.requested_k,
        search.k,
        neighbors,
        obs,
        between,
    ))
}

/// All prior points, ranked by squared distance. Used while `i <= k`.
fn bootstrap(
    coords: ArrayView2<'_, f64>,
    search: &ResolvedSearch,
    i: usize,
) -> BoundedSortedBuffer {
    let mut buf = BoundedSortedBuffer::new(search.k);
    let point = coords.row(i);
    for j in 0..i {
        buf.insert(sq_euclidean(coords.row(j), point), j);
    }
    buf
}

/// Expands outward from the rank of `i` until both directions are pruned or exhausted.
fn walk(
    coords: ArrayView2<'_, f64>,
    projection: &Projection,
    search: &ResolvedSearch,
    i: usize,
) -> BoundedSortedBuffer {
    let n = projection.len();
    let order = projection.order();
    let mut buf = BoundedSortedBuffer::new(search.k);

    let start = projection.rank()[i];
    let (mut down_at, mut up_at) = (start, start);
    let (mut down, mut up) = (true, true);

    while down || up {
        if down_at == 0 {
            down = false;
        }
        if up_at == n - 1 {
            up = false;
        }

        if down {
            down_at -= 1;
            down = visit(coords, projection, search, i, order[down_at], &mut buf);
        }
        if up {
            up_at += 1;
            up = visit(coords, projection, search, i, order[up_at], &mut buf);
        }
    }
    buf
}

/// Offers candidate `j` to the buffer of point `i`.
///
/// Returns false when the projection gap prunes the current direction.
#[inline]
fn visit(
    coords: ArrayView2<'_, f64>,
    projection: &Projection,
    search: &ResolvedSearch,
    i: usize,
    j: usize,
    buf: &mut BoundedSortedBuffer,
) -> bool {
    if !search.is_eligible(j, i) {
        return true;
    }
    let sums = projection.sums();
    let gap = sums[j] - sums[i];
    let dim = coords.ncols() as f64;
    if gap * gap > dim * buf.max() {
        return false;
    }
    buf.insert(sq_euclidean(coords.row(j), coords.row(i)), j);
    true
}
