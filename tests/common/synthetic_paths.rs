use kurbo::Point;
use sketch_topology::{ColorSample, TracedPath};
use std::f64::consts::PI;

pub const RED: ColorSample = ColorSample::rgb(255, 0, 0);
pub const GREEN: ColorSample = ColorSample::rgb(0, 255, 0);
pub const BLUE: ColorSample = ColorSample::rgb(0, 0, 255);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Axis-aligned square, counter-clockwise with y up, closing point repeated.
pub fn square(x: f64, y: f64, side: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + side, y),
        Point::new(x + side, y + side),
        Point::new(x, y + side),
        Point::new(x, y),
    ]
}

/// Regular polygon approximating a circle, closing point repeated.
pub fn polygon(cx: f64, cy: f64, r: f64, n: usize) -> Vec<Point> {
    let mut points: Vec<Point> = (0..n)
        .map(|k| {
            let a = 2.0 * PI * k as f64 / n as f64;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect();
    points.push(points[0]);
    points
}

/// Small hexagonal blob standing in for a drawn dot.
pub fn blob(cx: f64, cy: f64, r: f64) -> Vec<Point> {
    polygon(cx, cy, r, 6)
}

pub fn path(id: u32, points: Vec<Point>, color: ColorSample) -> TracedPath {
    TracedPath::new(id, points, color)
}

pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
