use serde::{Deserialize, Serialize};
use schemars::JsonSchema;

/// Tuning knobs for palette clustering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PaletteOptions {
    /// Images whose longer side exceeds this are downsampled before clustering
    pub max_dimension: u32,
    /// Iteration cap for a single k-means run
    pub max_iterations: usize,
    /// Centroid movement (sRGB, 0-1 scale) below which a run is considered converged
    pub convergence: f32,
    /// Number of seeded runs; the lowest-score run wins
    pub runs: u32,
    /// Seed of the first run, later runs use `seed + n`
    pub seed: u64,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            max_dimension: 512,
            max_iterations: 20,
            convergence: 0.0025,
            runs: 3,
            seed: 42,
        }
    }
}
