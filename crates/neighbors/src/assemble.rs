//! Distance rows and matrices for resolved neighbor sets.

use ndarray::{Array1, Array2, ArrayView2};
use rayon::prelude::*;

use crate::distance::{euclidean, validate_coordinates};
use crate::error::NeighborError;

/// Builds the neighbor-to-neighbor distance matrix of every set.
///
/// Each matrix is `m × m` for a set of `m` neighbors, symmetric, with a zero
/// diagonal; entry `(a, b)` is the Euclidean distance between the `a`-th and
/// `b`-th neighbor. Works for sets from either finder. Empty sets yield
/// `0 × 0` matrices.
///
/// # Errors
///
/// Returns [`NeighborError`] if `coords` is invalid or a set references a
/// point outside `0..n`.
pub fn neighbor_distances(
    coords: ArrayView2<'_, f64>,
    neighbor_sets: &[Vec<usize>],
) -> Result<Vec<Array2<f64>>, NeighborError> {
    let n = validate_coordinates(coords)?;
    check_indices(neighbor_sets, n)?;
    Ok(between_unchecked(coords, neighbor_sets))
}

/// Builds the owner-to-neighbor distance row of every set.
///
/// `neighbor_sets[p]` belongs to point `start_at + p` and must cover every
/// point in `start_at..n`. Rows are index-aligned with their sets.
///
/// # Errors
///
/// Returns [`NeighborError`] if `coords` is invalid, `start_at` is out of
/// range, the number of sets is not `n - start_at`, or a set references a
/// point outside `0..n`.
pub fn observation_distances(
    coords: ArrayView2<'_, f64>,
    start_at: usize,
    neighbor_sets: &[Vec<usize>],
) -> Result<Vec<Array1<f64>>, NeighborError> {
    let n = validate_coordinates(coords)?;
    if start_at >= n {
        return Err(NeighborError::StartOutOfRange { start_at, n });
    }
    if neighbor_sets.len() != n - start_at {
        return Err(NeighborError::SetCountMismatch {
            expected: n - start_at,
            got: neighbor_sets.len(),
        });
    }
    check_indices(neighbor_sets, n)?;
    Ok(observation_unchecked(coords, start_at, neighbor_sets))
}

fn check_indices(neighbor_sets: &[Vec<usize>], n: usize) -> Result<(), NeighborError> {
    for (owner, set) in neighbor_sets.iter().enumerate() {
        if let Some(&index) = set.iter().find(|&&j| j >= n) {
            return Err(NeighborError::NeighborIndexOutOfRange { owner, index, n });
        }
    }
    Ok(())
}

pub(crate) fn observation_unchecked(
    coords: ArrayView2<'_, f64>,
    start_at: usize,
    neighbor_sets: &[Vec<usize>],
) -> Vec<Array1<f64>> {
    neighbor_sets
        .par_iter()
        .enumerate()
        .map(|(pos, set)| {
            let i = start_at + pos;
            set.iter().map(|&j| euclidean(coords, i, j)).collect()
        })
        .collect()
}

pub(crate) fn between_unchecked(
    coords: ArrayView2<'_, f64>,
    neighbor_sets: &[Vec<usize>],
) -> Vec<Array2<f64>> {
    neighbor_sets
        .par_iter()
        .map(|set| {
            let m = set.len();
            let mut dist = Array2::zeros((m, m));
            for a in 0..m {
                for b in (a + 1)..m {
                    dist[[a, b]] = euclidean(coords, set[a], set[b]);
                }
            }
            for a in 0..m {
                for b in 0..a {
                    dist[[a, b]] = dist[[b, a]];
                }
            }
            dist
        })
        .collect()
}
