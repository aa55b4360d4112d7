//! Euclidean distance kernels over coordinate rows.

use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::error::NeighborError;

/// Checks that `coords` is a non-empty, finite `n × d` matrix with `d >= 1`.
///
/// Returns `n`.
pub(crate) fn validate_coordinates(
    coords: ArrayView2<'_, f64>,
) -> Result<usize, NeighborError> {
    if coords.nrows() == 0 {
        return Err(NeighborError::EmptyCoordinates);
    }
    if coords.ncols() == 0 {
        return Err(NeighborError::ZeroDimensions);
    }
    if coords.iter().any(|v| !v.is_finite()) {
        return Err(NeighborError::NonFiniteInput {
            input: "coordinates",
        });
    }
    Ok(coords.nrows())
}

/// Squared Euclidean distance between two coordinate rows.
///
/// ```text
/// out = Σⱼ (a[j] − b[j])²
/// ```
///
/// Dispatches to specialised implementations for 1D and 2D rows.
///
/// # Panics
///
/// Debug-asserts that both rows have the same length.
#[inline]
pub(crate) fn sq_euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    match a.len() {
        1 => sq_dist_1d(a[0], b[0]),
        2 => sq_dist_2d(a[0], a[1], b[0], b[1]),
        _ => sq_dist_nd(a, b),
    }
}

/// Euclidean distance between rows `i` and `j` of `coords`.
#[inline]
pub(crate) fn euclidean(coords: ArrayView2<'_, f64>, i: usize, j: usize) -> f64 {
    sq_euclidean(coords.row(i), coords.row(j)).sqrt()
}

#[inline]
fn sq_dist_1d(a: f64, b: f64) -> f64 {
    let d = a - b;
    d * d
}

#[inline]
fn sq_dist_2d(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    let d0 = a0 - b0;
    let d1 = a1 - b1;
    d0 * d0 + d1 * d1
}

#[inline]
fn sq_dist_nd(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Dense pairwise Euclidean distance matrix for `coords` (one point per row).
///
/// The result is symmetric with an exact zero diagonal. Rows are filled in
/// parallel; each row only computes its strict upper part, the lower part is
/// mirrored afterwards.
pub fn pairwise_distances(coords: ArrayView2<'_, f64>) -> Array2<f64> {
    let n = coords.nrows();
    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| ((i + 1)..n).map(|j| euclidean(coords, i, j)).collect())
        .collect();

    let mut dist = Array2::zeros((n, n));
    for (i, row) in upper.iter().enumerate() {
        for (offset, &d) in row.iter().enumerate() {
            let j = i + 1 + offset;
            dist[[i, j]] = d;
            dist[[j, i]] = d;
        }
    }
    dist
}
