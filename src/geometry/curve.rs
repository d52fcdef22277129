use super::FittedSegment;
use crate::error::{ExtractError, Result};
use crate::types::{Category, SourceId};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Contiguous chain of fitted segments coming from one source path.
///
/// Consecutive segments share their end and start points exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCurve {
    pub id: SourceId,
    pub category: Category,
    segments: Vec<FittedSegment>,
}

impl BoundaryCurve {
    /// Builds a curve, rejecting empty or non-contiguous segment lists.
    pub fn new(id: SourceId, category: Category, segments: Vec<FittedSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(ExtractError::malformed(id, "curve has no segments"));
        }
        if let Some(i) = segments
            .windows(2)
            .position(|w| w[0].end() != w[1].start())
        {
            return Err(ExtractError::malformed(
                id,
                format!("segments {} and {} do not share an endpoint", i, i + 1),
            ));
        }
        Ok(Self {
            id,
            category,
            segments,
        })
    }

    pub fn segments(&self) -> &[FittedSegment] {
        &self.segments
    }

    pub fn start(&self) -> Point {
        self.segments[0].start()
    }

    pub fn end(&self) -> Point {
        self.segments[self.segments.len() - 1].end()
    }

    /// Distance between the two free ends.
    pub fn gap(&self) -> f64 {
        self.start().distance(self.end())
    }

    pub fn is_closed(&self) -> bool {
        self.start() == self.end()
    }

    pub fn reversed(&self) -> Self {
        Self {
            id: self.id,
            category: self.category,
            segments: self.segments.iter().rev().map(|s| s.reversed()).collect(),
        }
    }

    /// Returns a copy whose end points are moved onto `start` and `end`.
    pub fn snapped(&self, start: Point, end: Point) -> Self {
        let mut segments = self.segments.clone();
        let last = segments.len() - 1;
        if segments.len() == 1 {
            segments[0] = segments[0].with_start(start).with_end(end);
        } else {
            segments[0] = segments[0].with_start(start);
            segments[last] = segments[last].with_end(end);
        }
        Self {
            id: self.id,
            category: self.category,
            segments,
        }
    }

    /// Shoelace-style area contribution; meaningful for closed chains.
    pub fn signed_area(&self) -> f64 {
        self.segments.iter().map(FittedSegment::signed_area).sum()
    }

    pub fn line_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_line()).count()
    }

    pub(crate) fn append_to(&self, path: &mut BezPath) {
        for seg in &self.segments {
            match *seg {
                FittedSegment::Line { end, .. } => path.line_to(end),
                FittedSegment::Bezier { p1, p2, p3, .. } => path.curve_to(p1, p2, p3),
            }
        }
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start());
        self.append_to(&mut path);
        if self.is_closed() {
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a: (f64, f64), b: (f64, f64)) -> FittedSegment {
        FittedSegment::line(Point::new(a.0, a.1), Point::new(b.0, b.1))
    }

    #[test]
    fn rejects_gaps_between_segments() {
        let err = BoundaryCurve::new(
            SourceId(3),
            Category::Blue,
            vec![seg((0.0, 0.0), (1.0, 0.0)), seg((1.5, 0.0), (2.0, 0.0))],
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::MalformedInput { .. }));
    }

    #[test]
    fn reversal_negates_area() {
        let curve = BoundaryCurve::new(
            SourceId(1),
            Category::Green,
            vec![
                seg((0.0, 0.0), (2.0, 0.0)),
                seg((2.0, 0.0), (2.0, 2.0)),
                seg((2.0, 2.0), (0.0, 0.0)),
            ],
        )
        .unwrap();
        assert!(curve.is_closed());
        assert!((curve.signed_area() - 2.0).abs() < 1e-9);
        assert!((curve.reversed().signed_area() + 2.0).abs() < 1e-9);
    }

    #[test]
    fn snapping_single_segment_moves_both_ends() {
        let curve =
            BoundaryCurve::new(SourceId(0), Category::Red, vec![seg((0.0, 0.0), (4.0, 0.1))])
                .unwrap();
        let snapped = curve.snapped(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        assert_eq!(snapped.end(), Point::new(4.0, 0.0));
        assert_eq!(snapped.start(), Point::new(0.0, 0.0));
    }
}
