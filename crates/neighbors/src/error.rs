//! Error types for the vecchia-neighbors crate.

/// Error type for all fallible operations in the vecchia-neighbors crate.
///
/// Every variant describes a caller contract violation; none of them is
/// worth retrying with the same inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeighborError {
    /// Returned when the coordinate matrix has no rows.
    #[error("no coordinates provided")]
    EmptyCoordinates,

    /// Returned when the coordinate matrix has no columns.
    #[error("coordinates must have at least one dimension")]
    ZeroDimensions,

    /// Returned when the requested neighbor count is zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when a distance matrix is not square.
    #[error("distance matrix must be square, got {rows}x{cols}")]
    NonSquareDistanceMatrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when `start_at` is not a valid point index.
    #[error("start_at {start_at} is outside [0, {n})")]
    StartOutOfRange {
        /// The requested first index.
        start_at: usize,
        /// Number of points.
        n: usize,
    },

    /// Returned when the search ceiling is above `n - 2`.
    #[error("end_search_at {end_search_at} exceeds n - 2 for n = {n}")]
    SearchCeilingOutOfRange {
        /// The requested ceiling.
        end_search_at: usize,
        /// Number of points.
        n: usize,
    },

    /// Returned when a neighbor set references a point that does not exist.
    #[error("neighbor set {owner} references index {index}, but there are only {n} points")]
    NeighborIndexOutOfRange {
        /// Position of the offending set.
        owner: usize,
        /// The out-of-range index.
        index: usize,
        /// Number of points.
        n: usize,
    },

    /// Returned when the number of neighbor sets does not cover `start_at..n`.
    #[error("expected {expected} neighbor sets, got {got}")]
    SetCountMismatch {
        /// Required number of sets.
        expected: usize,
        /// Number of sets supplied.
        got: usize,
    },

    /// Returned when a required input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },
}
