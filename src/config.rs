use serde::Deserialize;

use vecchia_neighbors::SearchConfig;

/// Top-level configuration file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct VecchiaConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Neighbor search settings.
    #[serde(default)]
    pub search: SearchToml,

    /// Synthetic point cloud settings.
    #[serde(default)]
    pub synthetic: SyntheticToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub start_at: usize,
    #[serde(default)]
    pub end_search_at: Option<usize>,
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            start_at: 0,
            end_search_at: None,
        }
    }
}

impl SearchToml {
    /// Builds the library search configuration.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig::new(self.k)
            .with_start_at(self.start_at)
            .with_end_search_at(self.end_search_at)
    }
}

fn default_k() -> usize {
    20
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyntheticToml {
    #[serde(default = "default_n_points")]
    pub n_points: usize,
    #[serde(default = "default_dim")]
    pub dim: usize,
}

impl Default for SyntheticToml {
    fn default() -> Self {
        Self {
            n_points: default_n_points(),
            dim: default_dim(),
        }
    }
}

fn default_n_points() -> usize {
    2000
}
fn default_dim() -> usize {
    2
}
