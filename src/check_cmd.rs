//! Check command: approximate finder versus brute force on synthetic points.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, info_span};

use vecchia_neighbors::{approximate_neighbors, exact_conditioning_sets, neighbor_recall};

use crate::cli::CheckArgs;
use crate::config::VecchiaConfig;

/// Summary written by `check --output`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub n_points: usize,
    pub dim: usize,
    pub requested_k: usize,
    pub k: usize,
    pub start_at: usize,
    pub seed: u64,
    pub recall: f64,
    pub approximate_ms: f64,
    pub exact_ms: f64,
}

/// Run the check pipeline.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();

    // 1. Load config, apply CLI overrides
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => VecchiaConfig::default(),
    };
    if let Some(k) = args.k {
        config.search.k = k;
    }
    if let Some(n) = args.n_points {
        config.synthetic.n_points = n;
    }
    if let Some(dim) = args.dim {
        config.synthetic.dim = dim;
    }
    let seed = args.seed.or(config.seed).unwrap_or(0);
    let search = config.search.to_search_config();

    // 2. Draw synthetic coordinates
    let (n, dim) = (config.synthetic.n_points, config.synthetic.dim);
    if n == 0 || dim == 0 {
        bail!("synthetic point cloud needs n_points >= 1 and dim >= 1, got {n} x {dim}");
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let coords = Array2::from_shape_fn((n, dim), |_| rng.random::<f64>());
    info!(n, dim, seed, "synthetic coordinates drawn");

    // 3. Run both finders
    let started = Instant::now();
    let fast = approximate_neighbors(coords.view(), &search)
        .context("approximate neighbor search failed")?;
    let approximate_ms = started.elapsed().as_secs_f64() * 1e3;

    let started = Instant::now();
    let exact = exact_conditioning_sets(coords.view(), &search)
        .context("exact neighbor search failed")?;
    let exact_ms = started.elapsed().as_secs_f64() * 1e3;

    // 4. Compare
    let recall = neighbor_recall(fast.neighbors(), exact.neighbors())
        .context("recall comparison failed")?;
    info!(
        k = fast.k(),
        recall,
        approximate_ms,
        exact_ms,
        "approximate finder compared against brute force"
    );

    // 5. Optional report
    if let Some(path) = &args.output {
        let report = CheckReport {
            n_points: n,
            dim,
            requested_k: fast.requested_k(),
            k: fast.k(),
            start_at: fast.start_at(),
            seed,
            recall,
            approximate_ms,
            exact_ms,
        };
        write_report(path, &report)?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<VecchiaConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

fn write_report(path: &Path, report: &CheckReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialise report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report: {}", path.display()))
}
