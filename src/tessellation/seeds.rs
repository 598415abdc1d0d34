//! Seed points around an impact, in the impact's tangent plane.

use crate::float_types::{Real, TAU};
use nalgebra::{Point2, Vector2};
use rand::Rng;

/// Scatter `count` seeds around `center` by polar sampling: a uniform radius in
/// `[0, radius]` and a uniform angle in `[0, 2π)`.
///
/// Seeds concentrate toward the centre, so fragments near the impact come out smaller.
pub fn scatter<R: Rng>(
    rng: &mut R,
    center: Point2<Real>,
    count: usize,
    radius: Real,
) -> Vec<Point2<Real>> {
    let radius = radius.abs();
    (0..count)
        .map(|_| {
            let r: Real = if radius > 0.0 { rng.gen_range(0.0..=radius) } else { 0.0 };
            let theta: Real = rng.gen_range(0.0..TAU);
            center + Vector2::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

/// Fixed 2×2 pattern: one seed in the middle of each quadrant of a square of
/// half-size `2 * size` around `center`.
pub fn quadrants(center: Point2<Real>, size: Real) -> [Point2<Real>; 4] {
    [
        center + Vector2::new(size, size),
        center + Vector2::new(-size, size),
        center + Vector2::new(-size, -size),
        center + Vector2::new(size, -size),
    ]
}
