//! `Polyhedron` struct: a closed convex solid stored as indexed faces plus a
//! half-edge arena.

use crate::errors::ValidationError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

/// Half-edge arena and construction
pub mod half_edge;

/// Clip planes and point orientation
pub mod plane;

/// Per-vertex/edge/face classification against a clip plane
pub mod classify;

/// Half-space clipping
pub mod clip;

/// Shape generation functions
pub mod shapes;

/// Manifold topology validation
pub mod manifold;

use half_edge::{EdgeIdx, HalfEdge, HalfEdges};
use plane::Plane;

/// A planar convex face: an outward-wound loop of vertex indices.
#[derive(Debug, Clone)]
pub struct Face {
    /// Indices into the vertex array, counter-clockwise seen from outside
    pub indices: Vec<usize>,

    /// Half-edge slots walked by this face, parallel to `indices`
    pub edges: Vec<EdgeIdx>,

    /// The plane on which this face lies (normal points outward)
    pub plane: Plane,
}

impl Face {
    /// Return an iterator over paired indices each forming an edge of the face
    pub fn index_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indices
            .iter()
            .zip(self.indices.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Convex, closed, manifold solid.
///
/// A `Polyhedron` is never mutated in place: transforms and clips build a new
/// one, so a source can be clipped by many planes while it stays intact.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    vertices: Vec<Point3<Real>>,
    faces: Vec<Face>,
    edges: HalfEdges,

    /// Lazily calculated AABB that spans `vertices`.
    bounding_box: OnceLock<Aabb>,
}

impl Polyhedron {
    /// Build a polyhedron from raw vertices and outward-wound face loops.
    ///
    /// Builds the half-edge arena (each directed edge paired with its reverse)
    /// and each face's plane. Fails on out-of-range indices, faces with fewer
    /// than 3 vertices or no area, non-finite coordinates or an open/non-manifold surface.
    pub fn new(
        vertices: Vec<Point3<Real>>,
        faces: Vec<Vec<usize>>,
    ) -> Result<Polyhedron, ValidationError> {
        Self::with_planes(vertices, faces, Vec::new())
    }

    /// [`new`](Self::new) where `planes[i]`, when present, is taken as face
    /// `i`'s plane instead of being fitted to its loop.
    pub(crate) fn with_planes(
        vertices: Vec<Point3<Real>>,
        faces: Vec<Vec<usize>>,
        planes: Vec<Option<Plane>>,
    ) -> Result<Polyhedron, ValidationError> {
        if vertices.len() < 4 {
            return Err(ValidationError::TooFewVertices(vertices.len()));
        }
        if faces.len() < 4 {
            return Err(ValidationError::TooFewFaces(faces.len()));
        }
        if let Some(bad) = vertices.iter().find(|v| !v.coords.iter().all(|c| c.is_finite())) {
            return Err(ValidationError::InvalidCoordinate(*bad));
        }

        for (face_idx, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(ValidationError::DegenerateFace {
                    face: face_idx,
                    len: face.len(),
                });
            }
            for (k, &idx) in face.iter().enumerate() {
                if idx >= vertices.len() {
                    return Err(ValidationError::IndexOutOfRange {
                        face: face_idx,
                        index: idx,
                        vertex_count: vertices.len(),
                    });
                }
                if face[..k].contains(&idx) {
                    return Err(ValidationError::RepeatedIndex {
                        face: face_idx,
                        index: idx,
                    });
                }
            }
        }

        let (edges, loops) = HalfEdges::build(&faces)?;

        let faces = faces
            .into_iter()
            .zip(loops)
            .enumerate()
            .map(|(face_idx, (indices, edge_loop))| {
                let plane = match planes.get(face_idx).copied().flatten() {
                    Some(plane) => plane,
                    None => {
                        let points: Vec<Point3<Real>> = indices.iter().map(|&i| vertices[i]).collect();
                        Plane::from_loop(&points).ok_or(ValidationError::DegenerateFace {
                            face: face_idx,
                            len: indices.len(),
                        })?
                    },
                };
                Ok(Face {
                    plane,
                    indices,
                    edges: edge_loop,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(Polyhedron {
            vertices,
            faces,
            edges,
            bounding_box: OnceLock::new(),
        })
    }

    /// Build from `[x, y, z]` arrays and slice faces, as static shape tables are written.
    pub fn from_arrays(points: &[[Real; 3]], faces: &[&[usize]]) -> Result<Polyhedron, ValidationError> {
        Self::new(
            points.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect(),
            faces.iter().map(|f| f.to_vec()).collect(),
        )
    }

    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The half-edge arena.
    pub fn edges(&self) -> &[HalfEdge] {
        self.edges.as_slice()
    }

    pub fn edge(&self, idx: EdgeIdx) -> Option<&HalfEdge> {
        self.edges.get(idx)
    }

    /// Slot of the reverse of half-edge `idx`.
    pub fn reverse(&self, idx: EdgeIdx) -> Option<EdgeIdx> {
        self.edges.reverse(idx)
    }

    /// Slot of the directed edge `from → to`.
    pub fn find_edge(&self, from: usize, to: usize) -> Option<EdgeIdx> {
        self.edges.find(from, to)
    }

    pub(crate) const fn half_edges(&self) -> &HalfEdges {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Outward unit normal of face `idx`.
    pub fn face_normal(&self, idx: usize) -> Vector3<Real> {
        self.faces[idx].plane.normal
    }

    /// Face index loops, as used by the geometry interchange format.
    pub fn face_indices(&self) -> Vec<Vec<usize>> {
        self.faces.iter().map(|f| f.indices.clone()).collect()
    }

    /// **Signed-Tetrahedron Volume**
    ///
    /// Fans every face around its first vertex and sums the signed volumes of the
    /// tetrahedra spanned with the origin:
    /// ```text
    /// V = (1/6) Σ v0 · (v1 × v2)
    /// ```
    /// Positive for outward winding.
    pub fn volume(&self) -> Real {
        self.fan_triangles()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Volume-weighted centroid of the solid.
    pub fn centroid(&self) -> Point3<Real> {
        let mut weighted = Vector3::zeros();
        let mut total = 0.0;
        for [a, b, c] in self.fan_triangles() {
            let v = a.coords.dot(&b.coords.cross(&c.coords));
            weighted += (a.coords + b.coords + c.coords) * v;
            total += v;
        }

        if total.abs() < Real::EPSILON {
            return self.vertex_mean();
        }
        Point3::from(weighted / (4.0 * total))
    }

    /// Arithmetic mean of all vertices.
    pub fn vertex_mean(&self) -> Point3<Real> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / self.vertices.len() as Real)
    }

    fn fan_triangles(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        self.faces.iter().flat_map(move |face| {
            let first = self.vertices[face.indices[0]];
            face.indices
                .windows(2)
                .skip(1)
                .map(move |w| [first, self.vertices[w[0]], self.vertices[w[1]]])
        })
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`](crate::float_types::parry3d::bounding_volume::Aabb)
    /// indicating the 3D bounds of all `vertices`.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins = mins.inf(v);
                maxs = maxs.sup(v);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Largest distance from `center` to any vertex.
    pub fn bounding_radius(&self, center: &Point3<Real>) -> Real {
        self.vertices
            .iter()
            .map(|v| (v - center).norm())
            .fold(0.0, Real::max)
    }

    /// Check that every face's plane has every vertex on its inner side (within `epsilon`).
    pub fn is_convex(&self, epsilon: Real) -> bool {
        self.faces.iter().all(|face| {
            self.vertices
                .iter()
                .all(|v| face.plane.signed_distance(v) <= epsilon)
        })
    }

    /// Return a copy translated by `offset`.
    pub fn translated(&self, offset: Vector3<Real>) -> Polyhedron {
        let mut moved = self.clone();
        for v in &mut moved.vertices {
            *v += offset;
        }
        for face in &mut moved.faces {
            face.plane.point += offset;
        }
        moved.bounding_box = OnceLock::new();
        moved
    }

    /// Return a copy expressed relative to `center` (every vertex minus `center`).
    pub fn recentered(&self, center: &Point3<Real>) -> Polyhedron {
        self.translated(-center.coords)
    }
}
