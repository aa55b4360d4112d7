//! Configuration for conditioning-set searches.

use crate::error::NeighborError;

/// Configuration for a conditioning-set search.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use vecchia_neighbors::SearchConfig;
///
/// let config = SearchConfig::new(20)
///     .with_start_at(100)
///     .with_end_search_at(Some(499));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Number of nearest neighbors per point.
    k: usize,
    /// First point index to produce a conditioning set for.
    start_at: usize,
    /// Highest point index eligible as a neighbor. `None` means `n - 2`.
    end_search_at: Option<usize>,
}

impl SearchConfig {
    /// Creates a new configuration with the given k.
    ///
    /// Defaults: `start_at = 0`, `end_search_at = None` (that is, `n - 2`).
    pub fn new(k: usize) -> Self {
        Self {
            k,
            start_at: 0,
            end_search_at: None,
        }
    }

    /// Sets the first point index to process.
    pub fn with_start_at(mut self, start_at: usize) -> Self {
        self.start_at = start_at;
        self
    }

    /// Sets the highest point index eligible as a neighbor.
    pub fn with_end_search_at(mut self, end_search_at: Option<usize>) -> Self {
        self.end_search_at = end_search_at;
        self
    }

    /// Returns the requested number of neighbors.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the first point index to process.
    pub fn start_at(&self) -> usize {
        self.start_at
    }

    /// Returns the configured search ceiling, if any.
    pub fn end_search_at(&self) -> Option<usize> {
        self.end_search_at
    }

    /// Validates the parts of this configuration that do not depend on `n`.
    ///
    /// Returns an error if k < 1.
    pub fn validate(&self) -> Result<(), NeighborError> {
        if self.k < 1 {
            return Err(NeighborError::InvalidK { k: self.k });
        }
        Ok(())
    }

    /// Checks this configuration against `n` points and clips k to the
    /// number of feasible candidates.
    ///
    /// Callers must have rejected `n == 0` already.
    pub(crate) fn resolve(&self, n: usize) -> Result<ResolvedSearch, NeighborError> {
        debug_assert!(n > 0);
        self.validate()?;

        if self.start_at >= n {
            return Err(NeighborError::StartOutOfRange {
                start_at: self.start_at,
                n,
            });
        }

        let n_candidates = match self.end_search_at {
            Some(end) => {
                if n < 2 || end > n - 2 {
                    return Err(NeighborError::SearchCeilingOutOfRange {
                        end_search_at: end,
                        n,
                    });
                }
                end + 1
            }
            None => n - 1,
        };

        Ok(ResolvedSearch {
            k: self.k.min(n_candidates),
            requested_k: self.k,
            start_at: self.start_at,
            n_candidates,
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Search parameters after validation against a concrete point count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedSearch {
    /// Effective neighbor count, `min(requested_k, n_candidates)`.
    pub(crate) k: usize,
    /// Neighbor count as requested.
    pub(crate) requested_k: usize,
    /// First point index to process.
    pub(crate) start_at: usize,
    /// Candidates are the indices `0..n_candidates` (`end_search_at + 1`).
    pub(crate) n_candidates: usize,
}

impl ResolvedSearch {
    /// Returns true if k had to be reduced.
    pub(crate) fn is_clipped(&self) -> bool {
        self.k < self.requested_k
    }

    /// Returns true if `j` may condition point `i`.
    #[inline]
    pub(crate) fn is_eligible(&self, j: usize, i: usize) -> bool {
        j < i && j < self.n_candidates
    }
}
