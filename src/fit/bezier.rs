//! Least-squares cubic Bézier with fixed end points.
//!
//! Parameters start from chord length and are refined with Newton steps on
//! `(B(t) - Q) · B'(t) = 0`. The two interior control points solve a 2x2
//! normal system per coordinate.
use crate::geometry::FittedSegment;
use kurbo::{Point, Vec2};
use nalgebra::{Matrix2, Vector2};

/// Chord-length parameters in [0, 1]; uniform when the run has no length.
pub(crate) fn chord_length_params(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    let mut acc = Vec::with_capacity(n);
    let mut total = 0.0;
    acc.push(0.0);
    for w in points.windows(2) {
        total += w[0].distance(w[1]);
        acc.push(total);
    }
    if total <= 1e-12 {
        let last = (n.max(2) - 1) as f64;
        return (0..n).map(|i| i as f64 / last).collect();
    }
    acc.into_iter().map(|d| d / total).collect()
}

fn basis(t: f64) -> [f64; 4] {
    let mt = 1.0 - t;
    [mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t]
}

fn eval(c: &[Point; 4], t: f64) -> Point {
    let b = basis(t);
    let v = c[0].to_vec2() * b[0]
        + c[1].to_vec2() * b[1]
        + c[2].to_vec2() * b[2]
        + c[3].to_vec2() * b[3];
    v.to_point()
}

fn first_deriv(c: &[Point; 4], t: f64) -> Vec2 {
    let mt = 1.0 - t;
    (c[1] - c[0]) * (3.0 * mt * mt)
        + (c[2] - c[1]) * (6.0 * mt * t)
        + (c[3] - c[2]) * (3.0 * t * t)
}

fn second_deriv(c: &[Point; 4], t: f64) -> Vec2 {
    let a = c[2].to_vec2() - c[1].to_vec2() * 2.0 + c[0].to_vec2();
    let b = c[3].to_vec2() - c[2].to_vec2() * 2.0 + c[1].to_vec2();
    a * (6.0 * (1.0 - t)) + b * (6.0 * t)
}

/// Solves for the interior controls given parameters. `None` when the
/// normal matrix is singular.
fn solve_controls(points: &[Point], params: &[f64]) -> Option<[Point; 4]> {
    let p0 = points[0];
    let p3 = points[points.len() - 1];
    let mut m = Matrix2::<f64>::zeros();
    let mut rx = Vector2::<f64>::zeros();
    let mut ry = Vector2::<f64>::zeros();
    for (q, &t) in points.iter().zip(params) {
        let b = basis(t);
        let r = q.to_vec2() - p0.to_vec2() * b[0] - p3.to_vec2() * b[3];
        m[(0, 0)] += b[1] * b[1];
        m[(0, 1)] += b[1] * b[2];
        m[(1, 1)] += b[2] * b[2];
        rx += Vector2::new(b[1] * r.x, b[2] * r.x);
        ry += Vector2::new(b[1] * r.y, b[2] * r.y);
    }
    m[(1, 0)] = m[(0, 1)];
    if m.determinant().abs() < 1e-12 {
        return None;
    }
    let inv = m.try_inverse()?;
    let x = inv * rx;
    let y = inv * ry;
    let controls = [p0, Point::new(x[0], y[0]), Point::new(x[1], y[1]), p3];
    controls
        .iter()
        .all(|p| p.x.is_finite() && p.y.is_finite())
        .then_some(controls)
}

/// Closed form for runs too short for a regular system: both interior
/// controls at `(8M - P0 - P3) / 6`, so the curve passes through the middle
/// sample `M` at t = 0.5.
fn through_middle(points: &[Point]) -> [Point; 4] {
    let p0 = points[0];
    let p3 = points[points.len() - 1];
    let m = points[points.len() / 2];
    let q = ((m.to_vec2() * 8.0 - p0.to_vec2() - p3.to_vec2()) / 6.0).to_point();
    [p0, q, q, p3]
}

fn newton_step(c: &[Point; 4], q: Point, t: f64) -> f64 {
    let d = eval(c, t) - q;
    let d1 = first_deriv(c, t);
    let d2 = second_deriv(c, t);
    let num = d.dot(d1);
    let den = d1.dot(d1) + d.dot(d2);
    if den.abs() < 1e-12 {
        return t;
    }
    (t - num / den).clamp(0.0, 1.0)
}

/// Fits a cubic through `points` with its end points pinned to the first and
/// last sample. Returns the segment and its maximum deviation.
pub(crate) fn fit_cubic(
    points: &[Point],
    reparam_iterations: usize,
) -> Option<(FittedSegment, f64)> {
    if points.len() < 3 {
        return None;
    }
    let mut params = chord_length_params(points);
    let mut controls =
        solve_controls(points, &params).unwrap_or_else(|| through_middle(points));
    for _ in 0..reparam_iterations {
        for (t, &q) in params.iter_mut().zip(points).skip(1).take(points.len() - 2) {
            *t = newton_step(&controls, q, *t);
        }
        match solve_controls(points, &params) {
            Some(next) => controls = next,
            None => break,
        }
    }
    let [p0, p1, p2, p3] = controls;
    let seg = FittedSegment::bezier(p0, p1, p2, p3);
    let deviation = seg.max_deviation(&points[1..points.len() - 1]);
    Some((seg, deviation))
}
