//! Angle utilities used by corner detection.
use kurbo::Vec2;

/// Computes the unsigned angle between two 2D vectors in radians.
/// Returns a value in [0, π]. Zero if the vectors point the same way and
/// π if they are opposite. Degenerate vectors give zero.
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f64 {
    let na = a.hypot();
    let nb = b.hypot();
    if na < 1e-12 || nb < 1e-12 {
        return 0.0;
    }
    (a.dot(b) / (na * nb)).clamp(-1.0, 1.0).acos()
}

/// Unit vector in the direction of `v`, or zero for degenerate input.
#[inline]
pub fn unit_or_zero(v: Vec2) -> Vec2 {
    let n = v.hypot();
    if n < 1e-12 {
        Vec2::ZERO
    } else {
        v / n
    }
}
