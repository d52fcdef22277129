use super::{BoundaryCurve, FittedSegment, Outline};
use crate::error::{ExtractError, Result};
use crate::types::{Category, SourceId};
use kurbo::{BezPath, Rect, Shape};
use serde::{Deserialize, Serialize};

/// Closed, oriented cycle of boundary curves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub category: Category,
    curves: Vec<BoundaryCurve>,
}

impl Wire {
    /// Builds a wire, checking that the curves chain head to tail and close.
    pub fn new(category: Category, curves: Vec<BoundaryCurve>) -> Result<Self> {
        let Some(first) = curves.first() else {
            return Err(ExtractError::EmptyWire { category });
        };
        for pair in curves.windows(2) {
            if pair[0].end() != pair[1].start() {
                return Err(ExtractError::malformed(
                    pair[1].id,
                    format!("curve does not continue from {}", pair[0].id),
                ));
            }
        }
        let last = &curves[curves.len() - 1];
        if last.end() != first.start() {
            return Err(ExtractError::UnclosableContour {
                id: last.id,
                gap: last.end().distance(first.start()),
                tolerance: 0.0,
            });
        }
        Ok(Self { category, curves })
    }

    /// Wraps a single closed curve.
    pub fn single(curve: BoundaryCurve) -> Result<Self> {
        Self::new(curve.category, vec![curve])
    }

    pub fn curves(&self) -> &[BoundaryCurve] {
        &self.curves
    }

    pub fn segments(&self) -> impl Iterator<Item = &FittedSegment> {
        self.curves.iter().flat_map(|c| c.segments().iter())
    }

    pub fn segment_count(&self) -> usize {
        self.curves.iter().map(|c| c.segments().len()).sum()
    }

    /// Sources of the curves in chain order.
    pub fn sources(&self) -> Vec<SourceId> {
        self.curves.iter().map(|c| c.id).collect()
    }

    /// Positive for counter-clockwise loops (y up).
    pub fn signed_area(&self) -> f64 {
        self.curves.iter().map(BoundaryCurve::signed_area).sum()
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn reversed(&self) -> Self {
        Self {
            category: self.category,
            curves: self.curves.iter().rev().map(|c| c.reversed()).collect(),
        }
    }

    /// Returns the wire oriented with positive (`true`) or negative area.
    pub fn oriented(self, positive: bool) -> Self {
        if (self.signed_area() > 0.0) == positive {
            self
        } else {
            self.reversed()
        }
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.curves[0].start());
        for curve in &self.curves {
            curve.append_to(&mut path);
        }
        path.close_path();
        path
    }

    pub fn bounds(&self) -> Rect {
        self.to_bez_path().bounding_box()
    }

    pub fn outline(&self) -> Outline {
        let samples = self
            .segments()
            .flat_map(|s| s.samples(Outline::SAMPLES_PER_CURVE))
            .collect();
        Outline::new(self.to_bez_path(), samples)
    }
}
