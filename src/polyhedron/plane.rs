//! Clip planes and point classification

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

// Plane classification constants.
// A plane's normal points away from the retained half-space, so BACK is "inside".
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane given by a unit normal and a point lying on it.
///
/// The half-space `{ x : normal · (x − point) < ε }` is the retained side
/// when the plane is used to clip a [`Polyhedron`](super::Polyhedron).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal vector, pointing toward the discarded side
    pub normal: Vector3<Real>,
    /// Any point on the plane
    pub point: Point3<Real>,
}

impl Plane {
    /// Create a plane from a normal (normalized here) and an anchor point.
    pub fn new(normal: Vector3<Real>, point: Point3<Real>) -> Self {
        Plane {
            normal: normal.normalize(),
            point,
        }
    }

    /// Plane of a polygon loop, oriented to agree with its winding.
    ///
    /// Uses Newell's method about the loop centroid. If the Newell vector
    /// vanishes, the largest triangle spanned by loop points gives the normal.
    /// Returns `None` for fewer than 3 points or a loop spanning no area.
    pub fn from_loop(points: &[Point3<Real>]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }

        let centroid = Point3::from(
            points
                .iter()
                .fold(Vector3::zeros(), |acc, p| acc + p.coords)
                / points.len() as Real,
        );
        let newell = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .fold(Vector3::zeros(), |acc, (curr, next)| {
                acc + (curr - centroid).cross(&(next - centroid))
            });

        let normal = if newell == Vector3::zeros() {
            largest_triangle_normal(points)
        } else {
            newell
        };
        normal.try_normalize(0.0).map(|normal| Plane {
            normal,
            point: centroid,
        })
    }

    /// Get the plane normal
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Get the offset (distance from origin along the normal)
    pub fn offset(&self) -> Real {
        self.normal.dot(&self.point.coords)
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            point: self.point,
        }
    }

    /// Signed distance `normal · (p − point)`. Negative on the retained side.
    #[inline]
    pub fn signed_distance(&self, p: &Point3<Real>) -> Real {
        self.normal.dot(&(p - self.point))
    }

    /// Classify a point relative to the plane with tolerance `epsilon`.
    ///
    /// Returns [`BACK`] (inside), [`FRONT`] (outside) or [`COPLANAR`].
    pub fn orient_point(&self, p: &Point3<Real>, epsilon: Real) -> i8 {
        let d = self.signed_distance(p);
        if d < epsilon {
            if d > -epsilon { COPLANAR } else { BACK }
        } else {
            FRONT
        }
    }
}

/// Normal of the largest-area triangle spanned by any three loop points.
fn largest_triangle_normal(points: &[Point3<Real>]) -> Vector3<Real> {
    let mut best = Vector3::zeros();
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            for k in j + 1..points.len() {
                let normal = (points[j] - points[i]).cross(&(points[k] - points[i]));
                if normal.norm_squared() > best.norm_squared() {
                    best = normal;
                }
            }
        }
    }
    best
}
