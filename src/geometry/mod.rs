//! Planar geometry shared by the fitting and assembly stages.
//!
//! Points are `kurbo::Point` in f64. Polygons are plain point slices that may
//! or may not repeat their first point at the end; the helpers here treat both
//! forms the same way.
//!
//! Orientation: a positive signed area means counter-clockwise with y up.
//! Outer boundaries carry positive area, holes negative.

mod curve;
mod segment;
mod wire;

pub use curve::BoundaryCurve;
pub use segment::FittedSegment;
pub use wire::Wire;

use kurbo::{BezPath, ParamCurveNearest, Point, Rect, Shape};

/// Shoelace signed area of a polygon ring.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        acc += a.x * b.y - b.x * a.y;
    }
    acc * 0.5
}

/// Area-weighted centroid, falling back to the vertex average for
/// degenerate (zero-area) rings.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let area = signed_area(points);
    if area.abs() > 1e-12 {
        let (mut cx, mut cy) = (0.0, 0.0);
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            let cross = a.x * b.y - b.x * a.y;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        return Some(Point::new(cx / (6.0 * area), cy / (6.0 * area)));
    }
    let ring = open_ring(points);
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Drops consecutive points closer than `eps` to their predecessor.
pub fn dedup_consecutive(points: &[Point], eps: f64) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        match out.last() {
            Some(&last) if last.distance(p) <= eps => {}
            _ => out.push(p),
        }
    }
    out
}

/// Ring view without a repeated closing point.
pub fn open_ring(points: &[Point]) -> &[Point] {
    match points {
        [first, .., last] if first == last => &points[..points.len() - 1],
        _ => points,
    }
}

/// Largest distance between any two points.
pub fn diameter(points: &[Point]) -> f64 {
    let mut best = 0.0f64;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            best = best.max(a.distance(*b));
        }
    }
    best
}

pub fn perimeter(points: &[Point], closed: bool) -> f64 {
    let open: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    match (closed, points.first(), points.last()) {
        (true, Some(first), Some(last)) => open + last.distance(*first),
        _ => open,
    }
}

pub fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Closed region used for containment queries.
#[derive(Clone, Debug)]
pub struct Outline {
    path: BezPath,
    samples: Vec<Point>,
    bounds: Rect,
}

impl Outline {
    /// Sample count per Bézier segment when testing containment.
    pub const SAMPLES_PER_CURVE: usize = 8;

    pub fn new(path: BezPath, samples: Vec<Point>) -> Self {
        let bounds = path.bounding_box();
        Self {
            path,
            samples,
            bounds,
        }
    }

    pub fn from_polygon(points: &[Point]) -> Self {
        let ring = open_ring(points);
        let mut path = BezPath::new();
        if let Some((&first, rest)) = ring.split_first() {
            path.move_to(first);
            for &p in rest {
                path.line_to(p);
            }
            path.close_path();
        }
        Self::new(path, ring.to_vec())
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    fn boundary_distance(&self, p: Point) -> f64 {
        self.path
            .segments()
            .map(|seg| seg.nearest(p, 1e-6).distance_sq)
            .fold(f64::INFINITY, f64::min)
            .sqrt()
    }

    /// Inside, or on the boundary within `tolerance`.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        if !self.bounds.inflate(tolerance, tolerance).contains(p) {
            return false;
        }
        self.path.contains(p) || self.boundary_distance(p) <= tolerance
    }

    /// True when every sample of `other` lies inside this outline.
    ///
    /// Identical outlines contain each other; callers break that tie by order.
    pub fn contains(&self, other: &Outline, tolerance: f64) -> bool {
        let grown = self.bounds.inflate(tolerance, tolerance);
        if other.bounds.x0 < grown.x0
            || other.bounds.y0 < grown.y0
            || other.bounds.x1 > grown.x1
            || other.bounds.y1 > grown.y1
        {
            return false;
        }
        !other.samples.is_empty()
            && other
                .samples
                .iter()
                .all(|&p| self.contains_point(p, tolerance))
    }
}
