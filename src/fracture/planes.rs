//! Plane deriver: turns a 2D cell loop into the clip planes bounding its
//! extrusion along the impact direction.

use crate::float_types::{EPSILON, Real};
use crate::polyhedron::plane::Plane;
use geo::{Area, Polygon};
use nalgebra::{Point2, Point3, Vector3};

/// Orthonormal frame of the impact tangent plane, in body-local space.
///
/// `u × v = up`, so a loop that is counter-clockwise in `(u, v)` coordinates
/// is counter-clockwise seen from the tip of `up`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    pub origin: Point3<Real>,
    pub up: Vector3<Real>,
    pub u: Vector3<Real>,
    pub v: Vector3<Real>,
}

impl TangentFrame {
    /// Frame at `origin` with normal `up`. A zero `up` falls back to `+z`.
    pub fn new(origin: Point3<Real>, up: Vector3<Real>) -> Self {
        let up = up.try_normalize(EPSILON).unwrap_or_else(Vector3::z);
        // start from the world axis least aligned with `up`
        let axis = if up.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
        let u = (axis - up * up.dot(&axis)).normalize();
        let v = up.cross(&u);
        TangentFrame { origin, up, u, v }
    }

    /// 2D tangent-plane coordinates → body-local point.
    pub fn lift(&self, p: &Point2<Real>) -> Point3<Real> {
        self.origin + self.u * p.x + self.v * p.y
    }

    /// Body-local point → 2D tangent-plane coordinates (drops the `up` component).
    pub fn project(&self, p: &Point3<Real>) -> Point2<Real> {
        let d = p - self.origin;
        Point2::new(d.dot(&self.u), d.dot(&self.v))
    }
}

/// **Cell Loop to Clip Planes**
///
/// Each boundary edge `curr → next` yields the plane through `curr` with
/// normal `normalize(up × (next − curr))`. That normal points out of the cell
/// only when the loop runs clockwise seen from `up`, so counter-clockwise
/// cells are walked backwards. Zero-length edges are skipped.
///
/// Returns no planes for an empty or degenerate cell.
pub fn derive_planes(cell: &Polygon<Real>, frame: &TangentFrame) -> Vec<Plane> {
    // the ring is stored closed; drop the repeated first point
    let coords = &cell.exterior().0;
    let open = match coords.split_last() {
        Some((last, rest)) if rest.first() == Some(last) => rest,
        _ => coords.as_slice(),
    };
    if open.len() < 3 {
        return Vec::new();
    }

    let mut ring: Vec<Point3<Real>> = open
        .iter()
        .map(|c| frame.lift(&Point2::new(c.x, c.y)))
        .collect();
    if cell.signed_area() > 0.0 {
        ring.reverse();
    }

    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .filter_map(|(curr, next)| {
            let normal = frame.up.cross(&(next - curr));
            (normal.norm() > EPSILON).then(|| Plane::new(normal, *curr))
        })
        .collect()
}
