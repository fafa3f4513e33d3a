//! Linear transform helpers.

use crate::foundation::core::Point;

#[inline]
/// Interpolate from `a` toward `b` by `t` (not clamped).
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
/// Linearly interpolate between two points with clamped parameter `t`.
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    let t = t.clamp(0.0, 1.0);
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}
