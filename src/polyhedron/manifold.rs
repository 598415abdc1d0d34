//! Manifold validation and topology analysis for `Polyhedron`

use crate::polyhedron::Polyhedron;
use crate::polyhedron::half_edge::NO_FACE;
use hashbrown::{HashMap, HashSet};

/// **Manifold Properties Validated**
/// 1. **Edge Manifold**: each undirected edge borders exactly 2 faces
/// 2. **Orientation Consistency**: adjacent faces walk their shared edge in opposite directions
/// 3. **Reverse Pairing**: `reverse(reverse(e)) == e` and the reverse swaps the endpoints
/// 4. **Connectivity**: all faces form one connected component
#[derive(Debug, Clone)]
pub struct ManifoldAnalysis {
    /// Whether the polyhedron is a valid closed 2-manifold
    pub is_manifold: bool,
    /// Number of boundary edges (0 for closed manifolds)
    pub boundary_edges: usize,
    /// Number of non-manifold edges (shared by >2 faces)
    pub non_manifold_edges: usize,
    /// Number of vertices no face references
    pub isolated_vertices: usize,
    /// Number of connected components
    pub connected_components: usize,
    /// Whether all faces have consistent orientation
    pub consistent_orientation: bool,
    /// Whether every half-edge is paired with a matching reverse
    pub reverse_pairing: bool,
    /// Euler characteristic (V - E + F), 2 for a convex solid
    pub euler_characteristic: i64,
}

impl Polyhedron {
    /// **Topological Analysis**
    ///
    /// Works from the face loops rather than trusting the half-edge arena, then
    /// cross-checks the arena's reverse pairing.
    pub fn analyze_manifold(&self) -> ManifoldAnalysis {
        let mut edge_faces: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
        let mut referenced: HashSet<usize> = HashSet::new();

        for (face_idx, face) in self.faces().iter().enumerate() {
            for (a, b) in face.index_pairs() {
                let key = if a < b { (a, b) } else { (b, a) };
                edge_faces.entry(key).or_default().push(face_idx);
                *directed.entry((a, b)).or_default() += 1;
                referenced.insert(a);
            }
        }

        let mut boundary_edges = 0;
        let mut non_manifold_edges = 0;
        for faces in edge_faces.values() {
            match faces.len() {
                1 => boundary_edges += 1,
                2 => {},
                _ => non_manifold_edges += 1,
            }
        }

        // a directed edge walked twice means two neighbours share a winding direction
        let consistent_orientation = directed.values().all(|&n| n == 1);

        let reverse_pairing = self.edges().iter().enumerate().all(|(idx, he)| {
            self.reverse(he.reverse) == Some(idx)
                && self
                    .edge(he.reverse)
                    .is_some_and(|r| r.from == he.to && r.to == he.from)
                && he.face != NO_FACE
        });

        let isolated_vertices = self.vertex_count() - referenced.len();
        let connected_components = self.count_connected_components(&edge_faces);

        let euler_characteristic =
            self.vertex_count() as i64 - edge_faces.len() as i64 + self.face_count() as i64;

        let is_manifold = boundary_edges == 0
            && non_manifold_edges == 0
            && isolated_vertices == 0
            && consistent_orientation
            && reverse_pairing;

        ManifoldAnalysis {
            is_manifold,
            boundary_edges,
            non_manifold_edges,
            isolated_vertices,
            connected_components,
            consistent_orientation,
            reverse_pairing,
            euler_characteristic,
        }
    }

    /// Checks if the polyhedron is a closed, consistently oriented 2-manifold
    pub fn is_manifold(&self) -> bool {
        self.analyze_manifold().is_manifold
    }

    /// Count connected components with an iterative flood fill over face adjacency
    fn count_connected_components(&self, edge_faces: &HashMap<(usize, usize), Vec<usize>>) -> usize {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.face_count()];
        for faces in edge_faces.values() {
            if let [f1, f2] = faces.as_slice() {
                adjacency[*f1].push(*f2);
                adjacency[*f2].push(*f1);
            }
        }

        let mut visited = vec![false; self.face_count()];
        let mut components = 0;
        for start in 0..self.face_count() {
            if visited[start] {
                continue;
            }
            components += 1;
            let mut stack = vec![start];
            visited[start] = true;
            while let Some(face) = stack.pop() {
                for &n in &adjacency[face] {
                    if !visited[n] {
                        visited[n] = true;
                        stack.push(n);
                    }
                }
            }
        }
        components
    }
}
