use kurbo::{CubicBez, Line, ParamCurve, ParamCurveArea, ParamCurveNearest, PathSeg, Point};
use serde::{Deserialize, Serialize};

/// Accuracy passed to kurbo's nearest-point solver.
const NEAREST_ACCURACY: f64 = 1e-6;

/// One fitted piece of a boundary curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FittedSegment {
    Line {
        start: Point,
        end: Point,
    },
    Bezier {
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
    },
}

impl FittedSegment {
    pub fn line(start: Point, end: Point) -> Self {
        Self::Line { start, end }
    }

    pub fn bezier(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self::Bezier { p0, p1, p2, p3 }
    }

    pub fn start(&self) -> Point {
        match *self {
            Self::Line { start, .. } => start,
            Self::Bezier { p0, .. } => p0,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Self::Line { end, .. } => end,
            Self::Bezier { p3, .. } => p3,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line { .. })
    }

    pub fn reversed(&self) -> Self {
        match *self {
            Self::Line { start, end } => Self::Line {
                start: end,
                end: start,
            },
            Self::Bezier { p0, p1, p2, p3 } => Self::Bezier {
                p0: p3,
                p1: p2,
                p2: p1,
                p3: p0,
            },
        }
    }

    /// Moves the start point, dragging the adjacent control point along so
    /// the tangent direction is kept.
    pub fn with_start(&self, p: Point) -> Self {
        match *self {
            Self::Line { end, .. } => Self::Line { start: p, end },
            Self::Bezier { p0, p1, p2, p3 } => Self::Bezier {
                p0: p,
                p1: p1 + (p - p0),
                p2,
                p3,
            },
        }
    }

    /// Moves the end point; see [`FittedSegment::with_start`].
    pub fn with_end(&self, p: Point) -> Self {
        self.reversed().with_start(p).reversed()
    }

    pub fn to_path_seg(&self) -> PathSeg {
        match *self {
            Self::Line { start, end } => PathSeg::Line(Line::new(start, end)),
            Self::Bezier { p0, p1, p2, p3 } => PathSeg::Cubic(CubicBez::new(p0, p1, p2, p3)),
        }
    }

    pub fn eval(&self, t: f64) -> Point {
        self.to_path_seg().eval(t)
    }

    /// Contribution of this segment to the signed area of a closed path.
    pub fn signed_area(&self) -> f64 {
        self.to_path_seg().signed_area()
    }

    /// Distance from `p` to the closest point of the segment.
    pub fn distance_to(&self, p: Point) -> f64 {
        self.to_path_seg()
            .nearest(p, NEAREST_ACCURACY)
            .distance_sq
            .sqrt()
    }

    /// Largest distance from any of `points` to the segment.
    pub fn max_deviation(&self, points: &[Point]) -> f64 {
        let seg = self.to_path_seg();
        points
            .iter()
            .map(|&p| seg.nearest(p, NEAREST_ACCURACY).distance_sq.sqrt())
            .fold(0.0, f64::max)
    }

    /// Points along the segment, excluding the end point.
    pub fn samples(&self, per_curve: usize) -> Vec<Point> {
        match self {
            Self::Line { start, .. } => vec![*start],
            Self::Bezier { .. } => {
                let n = per_curve.max(2);
                (0..n).map(|i| self.eval(i as f64 / n as f64)).collect()
            }
        }
    }
}
