//! Point markers: small compact closed shapes reported as a single location.
use crate::geometry::{centroid, diameter, open_ring, signed_area, Wire};
use crate::types::{Contour, PointMarker};
use serde::{Deserialize, Serialize};

/// Size limits for a closed shape to count as a point. Both must hold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointOptions {
    pub max_area: f64,
    /// Largest distance between two vertices.
    pub max_diameter: f64,
}

impl Default for PointOptions {
    fn default() -> Self {
        Self {
            max_area: 100.0,
            max_diameter: 12.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PointDetector {
    options: PointOptions,
}

impl PointDetector {
    pub fn new(options: PointOptions) -> Self {
        Self { options }
    }

    /// Area first; the diameter is quadratic in the point count and only
    /// computed for shapes already below the area limit.
    fn is_small(&self, area: f64, diameter: impl FnOnce() -> f64) -> bool {
        area <= self.options.max_area && diameter() <= self.options.max_diameter
    }

    /// Marker for a contour below both size limits.
    pub fn detect(&self, contour: &Contour) -> Option<PointMarker> {
        let ring = contour.ring();
        if !self.is_small(contour.area, || diameter(ring)) {
            return None;
        }
        Some(PointMarker {
            id: contour.id,
            category: contour.category,
            centroid: centroid(ring)?,
            area: contour.area,
        })
    }

    /// Marker for an assembled wire, measured on its sampled outline.
    pub fn detect_wire(&self, wire: &Wire) -> Option<PointMarker> {
        let samples: Vec<_> = wire
            .segments()
            .flat_map(|s| s.samples(8))
            .collect();
        let ring = open_ring(&samples);
        let area = signed_area(ring).abs();
        if !self.is_small(area, || diameter(ring)) {
            return None;
        }
        Some(PointMarker {
            id: wire.curves().first()?.id,
            category: wire.category,
            centroid: centroid(ring)?,
            area,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundaryCurve, FittedSegment};
    use crate::types::{Category, SourceId};
    use kurbo::Point;
    use std::f64::consts::PI;

    fn blob(cx: f64, cy: f64, r: f64, n: usize) -> Contour {
        let mut points: Vec<Point> = (0..n)
            .map(|k| {
                let a = 2.0 * PI * k as f64 / n as f64;
                Point::new(cx + r * a.cos(), cy + r * a.sin())
            })
            .collect();
        points.push(points[0]);
        let area = signed_area(&points).abs();
        Contour {
            id: SourceId(3),
            category: Category::Red,
            points,
            area,
            depth: None,
        }
    }

    #[test]
    fn small_blob_is_a_point_at_its_centroid() {
        let marker = PointDetector::default().detect(&blob(40.0, 25.0, 3.0, 6)).unwrap();
        assert_eq!(marker.category, Category::Red);
        assert!(marker.centroid.distance(Point::new(40.0, 25.0)) < 1e-9);
    }

    #[test]
    fn thin_long_shape_is_not_a_point() {
        let sliver = Contour {
            id: SourceId(0),
            category: Category::Blue,
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(40.0, 0.0),
                Point::new(40.0, 1.0),
                Point::new(0.0, 1.0),
                Point::new(0.0, 0.0),
            ],
            area: 40.0,
            depth: None,
        };
        assert!(PointDetector::default().detect(&sliver).is_none());
        assert!(PointDetector::default().detect(&blob(0.0, 0.0, 20.0, 16)).is_none());
    }

    #[test]
    fn area_limit_is_checked_before_diameter() {
        let detector = PointDetector::default();
        assert!(!detector.is_small(500.0, || panic!("diameter evaluated")));
        let big = blob(0.0, 0.0, 2_000.0, 20_000);
        assert!(detector.detect(&big).is_none());
    }

    #[test]
    fn small_wire_is_a_point() {
        let pts = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)];
        let segs = pts
            .windows(2)
            .map(|w| FittedSegment::line(Point::new(w[0].0, w[0].1), Point::new(w[1].0, w[1].1)))
            .collect();
        let curve = BoundaryCurve::new(SourceId(2), Category::Red, segs).unwrap();
        let wire = Wire::single(curve).unwrap();
        let marker = PointDetector::default().detect_wire(&wire).unwrap();
        assert_eq!(marker.id, SourceId(2));
        assert!((marker.area - 16.0).abs() < 1e-9);
        assert!(marker.centroid.distance(Point::new(2.0, 2.0)) < 1e-9);
    }
}
