use serde::{Deserialize, Serialize};

/// Options for splitting a point sequence at its features.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CornerOptions {
    /// Window-averaged turning angle (degrees) above which a point is a corner.
    pub angle_threshold_deg: f64,
    /// Look-back/look-ahead window in steps. Shrinks to `n / 8` (at least 1)
    /// on short sequences.
    pub window: usize,
    /// Minimum number of points in each sub-run, shared end points included.
    pub min_run_points: usize,
    /// Turning below this many degrees counts as straight.
    pub straight_tolerance_deg: f64,
    /// Straight runs with at least this many points get corners at both ends.
    pub min_straight_run: usize,
}

impl Default for CornerOptions {
    fn default() -> Self {
        Self {
            angle_threshold_deg: 60.0,
            window: 3,
            min_run_points: 2,
            straight_tolerance_deg: 4.0,
            min_straight_run: 6,
        }
    }
}
