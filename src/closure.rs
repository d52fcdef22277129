//! Endpoint closure of point sequences and fitted curves.
//!
//! A sequence whose end lies within `tolerance` of its start is closed by
//! moving the last point onto the first (first-point policy). A larger gap
//! makes the structure unclosable; the caller decides whether that is fatal.
use crate::error::{ExtractError, Result};
use crate::geometry::{dedup_consecutive, open_ring, signed_area, BoundaryCurve};
use crate::types::SourceId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Distance below which two points are the same point.
pub(crate) const SAME_POINT_EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClosureOptions {
    /// Largest endpoint gap treated as already closed. Also used to merge
    /// curve end points during wire chaining.
    pub tolerance: f64,
}

impl Default for ClosureOptions {
    fn default() -> Self {
        Self { tolerance: 5.0 }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ContourCloser {
    options: ClosureOptions,
}

impl ContourCloser {
    pub fn new(options: ClosureOptions) -> Self {
        Self { options }
    }

    pub fn tolerance(&self) -> f64 {
        self.options.tolerance
    }

    /// Closes a raw sequence.
    ///
    /// Returns the deduplicated points with the last point equal to the first.
    /// Fails with `MalformedInput` for fewer than two distinct points or a
    /// closed shape without area, and `UnclosableContour` when the gap is at
    /// least the tolerance.
    pub fn close(&self, id: SourceId, points: &[Point]) -> Result<Vec<Point>> {
        if let Some(bad) = points.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(ExtractError::malformed(id, format!("non-finite point {bad:?}")));
        }
        let mut pts = dedup_consecutive(points, SAME_POINT_EPS);
        if pts.len() < 2 {
            return Err(ExtractError::malformed(id, "fewer than 2 distinct points"));
        }
        let first = pts[0];
        let gap = first.distance(pts[pts.len() - 1]);
        if gap >= self.options.tolerance {
            return Err(ExtractError::UnclosableContour {
                id,
                gap,
                tolerance: self.options.tolerance,
            });
        }
        let last = pts.len() - 1;
        pts[last] = first;
        let mut pts = dedup_consecutive(&pts, SAME_POINT_EPS);
        if pts.len() == 1 || pts[pts.len() - 1] != first {
            pts.push(first);
        }
        let ring = open_ring(&pts);
        if ring.len() < 3 {
            return Err(ExtractError::malformed(
                id,
                format!("closed shape has {} distinct points", ring.len()),
            ));
        }
        if signed_area(ring).abs() <= SAME_POINT_EPS {
            return Err(ExtractError::malformed(id, "closed shape has no area"));
        }
        Ok(pts)
    }

    /// Checks an assembled curve, snapping its end onto its start.
    pub fn verify_curve(&self, curve: &BoundaryCurve) -> Result<BoundaryCurve> {
        if curve.is_closed() {
            return Ok(curve.clone());
        }
        let gap = curve.gap();
        if gap >= self.options.tolerance {
            return Err(ExtractError::UnclosableContour {
                id: curve.id,
                gap,
                tolerance: self.options.tolerance,
            });
        }
        Ok(curve.snapped(curve.start(), curve.start()))
    }
}
