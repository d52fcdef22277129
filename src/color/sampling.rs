//! Dominant stroke color of a traced contour.
//!
//! The tracer hands over contour points in pixel coordinates; the stroke that
//! produced them lies along the contour, not inside it. Pixels within
//! `stroke_radius` of the contour polyline are classified individually and the
//! most frequent non-background category wins.
use super::{ColorClassifier, ColorSample};
use crate::types::Category;
use image::RgbImage;
use kurbo::Point;
use std::collections::HashSet;

/// Majority category of the pixels along `points`, `Ignore` if none match.
///
/// Ties resolve in the order blue, red, green.
pub fn dominant_category(
    image: &RgbImage,
    points: &[Point],
    classifier: &ColorClassifier,
    stroke_radius: f64,
) -> Category {
    let pixels = stroke_pixels(image, points, stroke_radius);
    let order = [Category::Blue, Category::Red, Category::Green];
    let mut counts = [0usize; 3];
    for (x, y) in pixels {
        let color = ColorSample::from(*image.get_pixel(x, y));
        let category = classifier.classify_quiet(color);
        if let Some(i) = order.iter().position(|&c| c == category) {
            counts[i] += 1;
        }
    }
    let mut best = Category::Ignore;
    let mut best_count = 0;
    for (category, count) in order.into_iter().zip(counts) {
        if count > best_count {
            best = category;
            best_count = count;
        }
    }
    best
}

/// Unique in-bounds pixels within `radius` of the closed polyline.
fn stroke_pixels(image: &RgbImage, points: &[Point], radius: f64) -> HashSet<(u32, u32)> {
    let (w, h) = image.dimensions();
    let r = radius.max(0.0);
    let reach = r.ceil() as i64;
    let mut out = HashSet::new();
    let mut visit = |c: Point| {
        let (cx, cy) = (c.x.round() as i64, c.y.round() as i64);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if ((dx * dx + dy * dy) as f64) > r * r {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                    out.insert((x as u32, y as u32));
                }
            }
        }
    };
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let steps = (a.distance(b) * 2.0).ceil().max(1.0) as usize;
        for s in 0..steps {
            visit(a.lerp(b, s as f64 / steps as f64));
        }
    }
    out
}
