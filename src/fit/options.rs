use serde::{Deserialize, Serialize};

/// Tolerances for the hybrid line/Bézier fitter. Distances are in input units
/// (pixels for traced rasters, user units for parsed paths).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitOptions {
    /// Maximum point distance for accepting a straight line.
    pub line_epsilon: f64,
    /// Maximum point distance for accepting a cubic Bézier.
    pub bezier_epsilon: f64,
    /// How many times a run may be halved at its worst point before falling
    /// back to a polyline.
    pub max_split_depth: usize,
    /// Newton reparameterization passes after the first least-squares solve.
    pub reparam_iterations: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            line_epsilon: 0.5,
            bezier_epsilon: 1.0,
            max_split_depth: 4,
            reparam_iterations: 2,
        }
    }
}
