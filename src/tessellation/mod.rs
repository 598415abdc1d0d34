//! Planar nearest-seed partition of a bounding square.
//!
//! A [`Tessellation`] turns seed points into one convex cell per seed. The
//! default [`BisectorTessellation`] clips the bounding square by the
//! perpendicular bisector between the cell's seed and every other seed.

use crate::float_types::Real;
use geo::{Coord, LineString, Polygon};
use nalgebra::{Point2, Vector2};

/// Seed scattering
pub mod seeds;

/// Axis-aligned square region to partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: Point2<Real>,
    pub max: Point2<Real>,
}

impl Bounds2 {
    /// Square of half-size `half` around `center`.
    pub fn square(center: Point2<Real>, half: Real) -> Self {
        let h = Vector2::new(half.abs(), half.abs());
        Bounds2 {
            min: center - h,
            max: center + h,
        }
    }

    /// Smallest square containing every point, grown by `margin` on each side.
    ///
    /// Returns `None` for an empty point set.
    pub fn covering<'a>(points: impl IntoIterator<Item = &'a Point2<Real>>, margin: Real) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));

        let center = Point2::from((min.coords + max.coords) * 0.5);
        let half = (max - min).max() * 0.5 + margin;
        Some(Self::square(center, half))
    }

    /// Corners counter-clockwise starting at `min`.
    pub fn corners(&self) -> Vec<Point2<Real>> {
        vec![
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }
}

/// Partition of [`Bounds2`] into one convex cell per seed.
///
/// Contract for implementors:
/// - exactly one cell per seed, in seed order
/// - every cell is convex
/// - every point of cell `i` is at least as close to seed `i` as to any other seed
pub trait Tessellation {
    fn tessellate(&self, seeds: &[Point2<Real>], bounds: &Bounds2) -> Vec<Polygon<Real>>;
}

/// Half-plane intersection per seed: `O(n²)` in the seed count, which stays small.
#[derive(Debug, Clone, Copy)]
pub struct BisectorTessellation {
    /// Seeds closer than this are treated as coincident
    pub epsilon: Real,
}

impl Default for BisectorTessellation {
    fn default() -> Self {
        BisectorTessellation {
            epsilon: crate::float_types::tolerance(),
        }
    }
}

impl Tessellation for BisectorTessellation {
    fn tessellate(&self, seeds: &[Point2<Real>], bounds: &Bounds2) -> Vec<Polygon<Real>> {
        seeds
            .iter()
            .enumerate()
            .map(|(i, site)| {
                let mut ring = bounds.corners();
                for (j, other) in seeds.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let normal = other - site;
                    if normal.norm() < self.epsilon {
                        // the earliest of a group of coincident seeds owns the cell
                        if j < i {
                            tracing::trace!(seed = i, shadowed_by = j, "tessellation: coincident seed");
                            ring.clear();
                            break;
                        }
                        continue;
                    }
                    let midpoint = Point2::from((site.coords + other.coords) * 0.5);
                    ring = clip_ring(&ring, &midpoint, &normal);
                    if ring.is_empty() {
                        break;
                    }
                }
                to_polygon(&ring)
            })
            .collect()
    }
}

/// Sutherland–Hodgman step: keep the part of `ring` where `(p − anchor) · normal ≤ 0`.
fn clip_ring(ring: &[Point2<Real>], anchor: &Point2<Real>, normal: &Vector2<Real>) -> Vec<Point2<Real>> {
    let side = |p: &Point2<Real>| (p - anchor).dot(normal);
    let mut out = Vec::with_capacity(ring.len() + 1);

    for (k, curr) in ring.iter().enumerate() {
        let next = &ring[(k + 1) % ring.len()];
        let (fc, fn_) = (side(curr), side(next));
        if fc <= 0.0 {
            out.push(*curr);
        }
        if (fc <= 0.0) != (fn_ <= 0.0) {
            let t = fc / (fc - fn_);
            out.push(curr + (next - curr) * t);
        }
    }
    out
}

fn to_polygon(ring: &[Point2<Real>]) -> Polygon<Real> {
    let coords: Vec<Coord<Real>> = ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    Polygon::new(LineString::new(coords), vec![])
}
