//! Nearest-neighbor conditioning sets for Vecchia approximations.
//!
//! A Vecchia approximation conditions each observation of a Gaussian process
//! on a few previously-indexed observations instead of all of them. This
//! crate finds those conditioning sets and the distances the covariance
//! model needs:
//!
//! | Output | Shape per point `i` |
//! |--------|---------------------|
//! | Neighbor indices | up to `k` indices `j < i`, nearest first |
//! | Owner-to-neighbor distances | `[m]`, aligned with the indices |
//! | Neighbor-to-neighbor distances | `[m × m]`, symmetric, zero diagonal |
//!
//! Two finders are provided:
//!
//! - [`exact_neighbors`] / [`exact_conditioning_sets`]: brute force over a
//!   full distance matrix, O(n²).
//! - [`approximate_neighbors`]: walks a coordinate-sum ordering with a
//!   projection-gap pruning bound, O(n log n + n·k) on well-spread data.
//!
//! # Quick start
//!
//! ```
//! use ndarray::array;
//! use vecchia_neighbors::{SearchConfig, approximate_neighbors};
//!
//! let coords = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.5, 0.4]];
//! let sets = approximate_neighbors(coords.view(), &SearchConfig::new(2)).unwrap();
//!
//! assert_eq!(sets.neighbors_of(0), Some(&[][..]));
//! assert_eq!(sets.neighbors_of(1), Some(&[0][..]));
//! assert_eq!(sets.neighbors_of(4).unwrap().len(), 2);
//! ```
//!
//! # Architecture
//!
//! ```text
//! approximate_neighbors()
//!   ├─ validate inputs, clip k     (config.rs)
//!   ├─ Projection::new()           (projection.rs)
//!   ├─ bootstrap() / walk()        (approximate.rs, buffer.rs)
//!   └─ between_unchecked()         (assemble.rs)
//! ```
//!
//! Every stage runs in parallel over points with rayon and finishes before
//! the next one starts.

pub mod approximate;
pub mod assemble;
pub mod buffer;
pub mod config;
pub mod error;
pub mod exact;
pub mod projection;
pub mod recall;
pub mod result;

pub(crate) mod distance;

pub use approximate::approximate_neighbors;
pub use assemble::{neighbor_distances, observation_distances};
pub use buffer::BoundedSortedBuffer;
pub use config::SearchConfig;
pub use distance::pairwise_distances;
pub use error::NeighborError;
pub use exact::{exact_conditioning_sets, exact_neighbors};
pub use projection::Projection;
pub use recall::neighbor_recall;
pub use result::ConditioningSets;
