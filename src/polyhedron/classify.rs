//! Plane classifier: sorts a polyhedron's vertices, half-edges and faces
//! against a clip plane and computes the edge crossings.

use super::Polyhedron;
use super::half_edge::EdgeIdx;
use super::plane::{BACK, COPLANAR, FRONT, Plane, SPANNING};
use crate::float_types::Real;
use hashbrown::HashMap;
use nalgebra::Point3;

/// Result of classifying a [`Polyhedron`] against a [`Plane`].
///
/// Classes use the bit constants from [`plane`](super::plane): a half-edge or
/// face class is the bitwise OR of its vertex classes, so [`SPANNING`] means
/// "has vertices strictly on both sides".
#[derive(Debug, Clone)]
pub struct Classification {
    /// Class of every vertex
    pub vertices: Vec<i8>,
    /// Class of every half-edge (a half-edge and its reverse always agree)
    pub edges: Vec<i8>,
    /// Class of every face, with the coplanar tie-break applied
    pub faces: Vec<i8>,
    /// Crossing points of spanning edges; they are appended after the
    /// polyhedron's own vertices, so crossing `k` has vertex index `vertex_count + k`
    pub intersections: Vec<Point3<Real>>,
    crossings: HashMap<EdgeIdx, usize>,
}

impl Classification {
    /// Vertex index of the crossing on half-edge `edge`, if it spans the plane.
    pub fn crossing(&self, edge: EdgeIdx) -> Option<usize> {
        self.crossings.get(&edge).copied()
    }

    /// Whether any vertex lies strictly on the retained side.
    pub fn has_inside(&self) -> bool {
        self.vertices.iter().any(|&c| c == BACK)
    }

    /// Whether every face survives unchanged.
    pub fn all_faces_kept(&self) -> bool {
        self.faces.iter().all(|&c| c == BACK || c == COPLANAR)
    }

    /// The part of half-edge `edge` that survives the clip, as `(from, to)`.
    ///
    /// A spanning edge has its outside endpoint rewritten to the crossing
    /// vertex; an outside edge yields `None`.
    pub fn surviving(&self, polyhedron: &Polyhedron, edge: EdgeIdx) -> Option<(usize, usize)> {
        let he = polyhedron.edge(edge)?;
        match self.edges[edge] {
            FRONT => None,
            SPANNING => {
                let x = self.crossing(edge)?;
                if self.vertices[he.from] == FRONT {
                    Some((x, he.to))
                } else {
                    Some((he.from, x))
                }
            },
            _ => Some((he.from, he.to)),
        }
    }
}

/// Classify `polyhedron` against `plane` with tolerance `epsilon`.
///
/// - vertex: `d < -ε` → [`BACK`], `|d| ≤ ε` → [`COPLANAR`], otherwise [`FRONT`]
/// - half-edge: OR of its endpoints; each undirected edge is visited once and
///   its class copied to the reverse. Spanning edges get one shared crossing vertex.
/// - face: OR of its vertices. A face lying entirely in the plane is kept as
///   [`COPLANAR`] only when its outward normal agrees with the plane normal,
///   otherwise it is forced to [`FRONT`].
pub fn classify(polyhedron: &Polyhedron, plane: &Plane, epsilon: Real) -> Classification {
    let vertices = polyhedron.vertices();
    let distances: Vec<Real> = vertices.iter().map(|v| plane.signed_distance(v)).collect();
    let vertex_classes: Vec<i8> = vertices
        .iter()
        .map(|v| plane.orient_point(v, epsilon))
        .collect();

    let half_edges = polyhedron.edges();
    let mut edge_classes = vec![COPLANAR; half_edges.len()];
    let mut intersections = Vec::new();
    let mut crossings = HashMap::new();

    for (idx, he) in polyhedron.half_edges().undirected() {
        let class = vertex_classes[he.from] | vertex_classes[he.to];
        edge_classes[idx] = class;
        edge_classes[he.reverse] = class;

        if class == SPANNING {
            let a = &vertices[he.from];
            let b = &vertices[he.to];
            // interpolate from the signed distances so both sides agree on the point
            let (da, db) = (distances[he.from], distances[he.to]);
            let t = da / (da - db);
            let point = a + (b - a) * t;

            let new_idx = vertices.len() + intersections.len();
            intersections.push(point);
            crossings.insert(idx, new_idx);
            crossings.insert(he.reverse, new_idx);
        }
    }

    let face_classes = polyhedron
        .faces()
        .iter()
        .map(|face| {
            let class = face
                .indices
                .iter()
                .fold(COPLANAR, |acc, &i| acc | vertex_classes[i]);
            if class == COPLANAR && face.plane.normal.dot(&plane.normal) <= 0.0 {
                FRONT
            } else {
                class
            }
        })
        .collect();

    Classification {
        vertices: vertex_classes,
        edges: edge_classes,
        faces: face_classes,
        intersections,
        crossings,
    }
}

impl Polyhedron {
    /// Classify this polyhedron against `plane` using the crate-wide tolerance.
    pub fn classify(&self, plane: &Plane) -> Classification {
        classify(self, plane, crate::float_types::tolerance())
    }
}
