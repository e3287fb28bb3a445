//! Interpolation math
//!
//! Pure functions used to reconstruct a position at a past render time from
//! buffered samples.

use super::types::Point;

/// Linear interpolation. Callers clamp `t` to `[0, 1]`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Uniform Catmull-Rom spline through `p1` (t = 0) and `p2` (t = 1).
///
/// ```text
/// 0.5 · (2·p1 + (-p0 + p2)·t + (2·p0 - 5·p1 + 4·p2 - p3)·t² + (-p0 + 3·p1 - 3·p2 + p3)·t³)
/// ```
pub fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// [`lerp`] applied per axis
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// [`catmull_rom`] applied per axis
pub fn catmull_rom_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    Point::new(
        catmull_rom(p0.x, p1.x, p2.x, p3.x, t),
        catmull_rom(p0.y, p1.y, p2.y, p3.y, t),
    )
}

/// Fraction of the way `target` lies from `start` to `end`, clamped to
/// `[0, 1]`. `None` when the span is empty or inverted.
pub fn time_fraction(start_ms: i64, end_ms: i64, target_ms: i64) -> Option<f64> {
    let span = end_ms.saturating_sub(start_ms);
    if span <= 0 {
        return None;
    }
    Some((target_ms.saturating_sub(start_ms) as f64 / span as f64).clamp(0.0, 1.0))
}
