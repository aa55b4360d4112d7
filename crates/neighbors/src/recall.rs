//! Overlap between two collections of neighbor sets.

use std::collections::HashSet;

use crate::error::NeighborError;

/// Mean fraction of `reference` neighbors that also appear in `candidate`.
///
/// Sets are compared position by position; positions whose reference set is
/// empty are skipped. Returns 1.0 when nothing is comparable.
///
/// # Errors
///
/// Returns [`NeighborError::SetCountMismatch`] if the two collections do not
/// have the same number of sets.
///
/// ```
/// use vecchia_neighbors::neighbor_recall;
///
/// let exact = vec![vec![], vec![0], vec![1, 0]];
/// let fast = vec![vec![], vec![0], vec![1, 2]];
/// assert_eq!(neighbor_recall(&fast, &exact).unwrap(), Ok(0.75));
/// ```
pub fn neighbor_recall(
    candidate: &[Vec<usize>],
    reference: &[Vec<usize>],
) -> Result<f64, NeighborError> {
    if candidate.len() != reference.len() {
        return Err(NeighborError::SetCountMismatch {
            expected: reference.len(),
            got: candidate.len(),
        });
    }
    let mut total = 0.0;
    let mut counted = 0usize;
    for (got, want) in candidate.iter().zip(reference) {
        if want.is_empty() {
            continue;
        }
        let got: HashSet<usize> = got.iter().copied().collect();
        let hits = want.iter().filter(|&&j| got.contains(&j)).count();
        total += hits as f64 / want.len() as f64;
        counted += 1;
    }
    if counted == 0 {
        return Ok(1.0);
    }
    Ok(total / counted as f64)
}
