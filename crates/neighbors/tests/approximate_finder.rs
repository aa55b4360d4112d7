//! Integration tests for the projection-pruned finder.

use std::io;
use std::sync::{Arc, Mutex};

use approx::assert_abs_diff_eq;
use ndarray::{Array2, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vecchia_neighbors::{
    ConditioningSets, SearchConfig, approximate_neighbors, exact_conditioning_sets,
    neighbor_recall,
};

fn random_coords(n: usize, dim: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((n, dim), |_| rng.random::<f64>())
}

fn assert_symmetric_zero_diagonal(sets: &ConditioningSets) {
    for (pos, m) in sets.between_distances().iter().enumerate() {
        let size = sets.neighbors()[pos].len();
        assert_eq!(m.dim(), (size, size));
        for a in 0..size {
            assert_eq!(m[[a, a]], 0.0);
            for b in 0..size {
                assert_eq!(m[[a, b]], m[[b, a]]);
                assert!(m[[a, b]] >= 0.0);
            }
        }
    }
}

/// Collects everything a fmt subscriber writes.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn collinear_scenario() {
    let coords = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
    let sets = approximate_neighbors(coords.view(), &SearchConfig::new(2)).unwrap();

    assert_eq!(sets.neighbors_of(2), Some(&[1, 0][..]));
    assert_eq!(sets.neighbors_of(4), Some(&[3, 2][..]));
    for i in [2, 4] {
        let d = sets.obs_distances_of(i).unwrap();
        assert_abs_diff_eq!(d[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d[1], 2.0, epsilon = 1e-12);
    }
}

#[test]
fn first_two_points_independent_of_k_and_dim() {
    for dim in 1..=4 {
        for k in [1, 2, 5, 20] {
            let coords = random_coords(25, dim, (dim * 100 + k) as u64);
            let sets = approximate_neighbors(coords.view(), &SearchConfig::new(k)).unwrap();
            assert_eq!(sets.neighbors_of(0).unwrap().len(), 0);
            assert_eq!(sets.neighbors_of(1), Some(&[0][..]));
            assert_eq!(sets.obs_distances_of(0).unwrap().len(), 0);
        }
    }
}

#[test]
fn set_sizes_and_ordering() {
    let coords = random_coords(120, 2, 3);
    let k = 7;
    let sets = approximate_neighbors(coords.view(), &SearchConfig::new(k)).unwrap();
    assert_eq!(sets.len(), 120);
    for i in 0..120 {
        let nn = sets.neighbors_of(i).unwrap();
        let obs = sets.obs_distances_of(i).unwrap();
        assert_eq!(nn.len(), k.min(i), "point {i}");
        assert_eq!(obs.len(), nn.len());
        assert!(nn.iter().all(|&j| j < i));
        assert!(obs.iter().all(|&d| d >= 0.0));
        assert!(obs.to_vec().windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn distance_matrices_symmetric_for_both_finders() {
    let coords = random_coords(60, 3, 17);
    let config = SearchConfig::new(6);
    assert_symmetric_zero_diagonal(&approximate_neighbors(coords.view(), &config).unwrap());
    assert_symmetric_zero_diagonal(&exact_conditioning_sets(coords.view(), &config).unwrap());
}

#[test]
fn recall_against_exact() {
    let coords = random_coords(50, 2, 42);
    let config = SearchConfig::new(5);
    let fast = approximate_neighbors(coords.view(), &config).unwrap();
    let exact = exact_conditioning_sets(coords.view(), &config).unwrap();
    let recall = neighbor_recall(fast.neighbors(), exact.neighbors()).unwrap();
    assert!(recall >= 0.9, "recall {recall}");
}

#[test]
fn recall_in_higher_dimensions() {
    for dim in [3, 5] {
        let coords = random_coords(200, dim, dim as u64);
        let config = SearchConfig::new(10);
        let fast = approximate_neighbors(coords.view(), &config).unwrap();
        let exact = exact_conditioning_sets(coords.view(), &config).unwrap();
        let recall = neighbor_recall(fast.neighbors(), exact.neighbors()).unwrap();
        assert!(recall >= 0.9, "dim {dim}: recall {recall}");
    }
}

#[test]
fn end_search_at_limits_candidates() {
    let coords = random_coords(40, 2, 9);
    let config = SearchConfig::new(4).with_end_search_at(Some(19));
    let sets = approximate_neighbors(coords.view(), &config).unwrap();
    for i in 0..40 {
        let nn = sets.neighbors_of(i).unwrap();
        assert!(nn.iter().all(|&j| j < i && j <= 19), "point {i}: {nn:?}");
        assert_eq!(nn.len(), 4.min(i));
    }
    let exact = exact_conditioning_sets(coords.view(), &config).unwrap();
    assert!(neighbor_recall(sets.neighbors(), exact.neighbors()).unwrap() >= 0.9);
}

#[test]
fn start_at_matches_full_run() {
    let coords = random_coords(50, 2, 21);
    let full = approximate_neighbors(coords.view(), &SearchConfig::new(5)).unwrap();
    let tail =
        approximate_neighbors(coords.view(), &SearchConfig::new(5).with_start_at(30)).unwrap();
    assert_eq!(tail.len(), 20);
    for i in 30..50 {
        assert_eq!(tail.neighbors_of(i), full.neighbors_of(i));
        assert_eq!(tail.obs_distances_of(i), full.obs_distances_of(i));
        assert_eq!(tail.between_distances_of(i), full.between_distances_of(i));
    }
}

#[test]
fn clipping_emits_one_diagnostic() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let coords = random_coords(12, 2, 1);
    let config = SearchConfig::new(9).with_end_search_at(Some(4));
    let sets = tracing::subscriber::with_default(subscriber, || {
        approximate_neighbors(coords.view(), &config)
    })
    .unwrap();

    assert_eq!(sets.requested_k(), 9);
    assert_eq!(sets.k(), 5);
    assert!(sets.is_clipped());
    for i in 5..12 {
        assert_eq!(sets.neighbors_of(i).unwrap().len(), 5);
    }

    let logs = captured.text();
    assert_eq!(logs.matches("clipped").count(), 1, "logs: {logs}");
}

#[test]
fn no_diagnostic_without_clipping() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let coords = random_coords(12, 2, 1);
    let sets = tracing::subscriber::with_default(subscriber, || {
        approximate_neighbors(coords.view(), &SearchConfig::new(3))
    })
    .unwrap();

    assert!(!sets.is_clipped());
    assert!(captured.text().is_empty());
}

#[test]
fn duplicate_points() {
    // Every point sits on one of two locations; all distances are 0 or 1.
    let coords =
        Array2::from_shape_fn((20, 2), |(i, c)| if c == 0 { (i % 2) as f64 } else { 0.0 });
    let sets = approximate_neighbors(coords.view(), &SearchConfig::new(3)).unwrap();
    for i in 6..20 {
        let nn = sets.neighbors_of(i).unwrap();
        assert_eq!(nn.len(), 3);
        // from i = 6 on, at least three prior points share the location of i
        assert!(nn.iter().all(|&j| j % 2 == i % 2), "point {i}: {nn:?}");
        assert!(sets.obs_distances_of(i).unwrap().iter().all(|&d| d == 0.0));
    }
}

#[test]
fn walk_ties_go_to_first_discovered() {
    // Points 0 and 1 are both at distance 1 from point 2. The walk steps down
    // first and meets 1; the brute-force scan keeps the lower index.
    let coords = array![[2.0], [0.0], [1.0]];
    let config = SearchConfig::new(1);
    let fast = approximate_neighbors(coords.view(), &config).unwrap();
    let exact = exact_conditioning_sets(coords.view(), &config).unwrap();
    assert_eq!(fast.neighbors_of(2), Some(&[1][..]));
    assert_eq!(exact.neighbors_of(2), Some(&[0][..]));
    assert_eq!(fast.obs_distances_of(2), exact.obs_distances_of(2));
}

#[test]
fn overflowing_distances_keep_set_sizes() {
    let coords = array![[0.0, 0.0], [1e200, 1e200], [-1e200, 1e200], [2e200, -1e200]];
    let config = SearchConfig::new(2);
    for sets in [
        approximate_neighbors(coords.view(), &config).unwrap(),
        exact_conditioning_sets(coords.view(), &config).unwrap(),
    ] {
        for i in 0..4 {
            assert_eq!(sets.neighbors_of(i).unwrap().len(), 2.min(i), "point {i}");
        }
        assert_symmetric_zero_diagonal(&sets);
    }
}
