//! One-dimensional coordinate-sum projection.
//!
//! Each point is reduced to the sum of its coordinates. Points close in this
//! order are likely, not guaranteed, to be close in space, and the gap
//! between two sums bounds their distance from below (see
//! [`crate::approximate`]).

use ndarray::{Array1, ArrayView2, Axis};

/// Coordinate sums with their ascending order and its inverse.
#[derive(Debug, Clone)]
pub struct Projection {
    sums: Array1<f64>,
    order: Vec<usize>,
    rank: Vec<usize>,
}

impl Projection {
    /// Projects every row of `coords` onto the sum of its coordinates.
    ///
    /// Equal sums keep their original index order, so the result is fully
    /// deterministic.
    pub fn new(coords: ArrayView2<'_, f64>) -> Self {
        let sums = coords.sum_axis(Axis(1));

        let mut order: Vec<usize> = (0..sums.len()).collect();
        order.sort_by(|&a, &b| sums[a].total_cmp(&sums[b]));

        let mut rank = vec![0; order.len()];
        for (r, &idx) in order.iter().enumerate() {
            rank[idx] = r;
        }

        Self { sums, order, rank }
    }

    /// Number of projected points.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no points were projected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Coordinate sum of every point, by original index.
    pub fn sums(&self) -> &Array1<f64> {
        &self.sums
    }

    /// `order()[r]` is the original index of the point with rank `r`.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// `rank()[i]` is the position of point `i` in [`Self::order`].
    pub fn rank(&self) -> &[usize] {
        &self.rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_sums() {
        let coords = array![[1.0, 2.0], [-1.0, 0.5], [3.0, 3.0]];
        let proj = Projection::new(coords.view());
        assert_abs_diff_eq!(proj.sums()[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(proj.sums()[1], -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(proj.sums()[2], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_order_and_inverse() {
        let coords = array![[5.0], [1.0], [3.0], [0.0]];
        let proj = Projection::new(coords.view());
        assert_eq!(proj.order(), &[3, 1, 2, 0]);
        assert_eq!(proj.rank(), &[3, 1, 2, 0]);
        for (r, &idx) in proj.order().iter().enumerate() {
            assert_eq!(proj.rank()[idx], r);
        }
    }

    #[test]
    fn test_ties_keep_index_order() {
        let coords = array![[1.0, 1.0], [2.0, 0.0], [0.0, 0.0], [0.0, 2.0]];
        let proj = Projection::new(coords.view());
        assert_eq!(proj.order(), &[2, 0, 1, 3]);
    }

    #[test]
    fn test_empty() {
        let coords = ndarray::Array2::<f64>::zeros((0, 2));
        let proj = Projection::new(coords.view());
        assert!(proj.is_empty());
        assert_eq!(proj.len(), 0);
    }
}
