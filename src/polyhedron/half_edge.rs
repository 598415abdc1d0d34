//! Index-based half-edge arena.
//!
//! Every directed edge `(a, b)` walked by a face lives in one arena slot and
//! stores the slot of its reverse `(b, a)`. Because the arena holds plain
//! indices, cloning a polyhedron deep-copies its whole edge graph.

use crate::errors::ValidationError;
use hashbrown::HashMap;

/// Index of a half-edge inside [`HalfEdges`].
pub type EdgeIdx = usize;

/// Marker for a half-edge whose face has not been assigned yet.
pub const NO_FACE: usize = usize::MAX;

/// A directed edge `from → to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Start vertex index
    pub from: usize,
    /// End vertex index
    pub to: usize,
    /// Arena slot of the `to → from` half-edge
    pub reverse: EdgeIdx,
    /// Face walking this half-edge in its winding
    pub face: usize,
}

/// Arena of half-edges plus the vertex-pair lookup used while building it.
#[derive(Debug, Clone, Default)]
pub struct HalfEdges {
    edges: Vec<HalfEdge>,
    lookup: HashMap<(usize, usize), EdgeIdx>,
}

impl HalfEdges {
    /// Build the arena from face index loops.
    ///
    /// Returns the arena and, for every face, its edge loop (same length as its
    /// vertex loop). Fails if a directed edge is walked twice or if an edge is
    /// left without a face on its reverse side.
    pub fn build(faces: &[Vec<usize>]) -> Result<(Self, Vec<Vec<EdgeIdx>>), ValidationError> {
        let mut arena = HalfEdges::default();
        let mut loops = Vec::with_capacity(faces.len());

        for (face_idx, indices) in faces.iter().enumerate() {
            let mut edge_loop = Vec::with_capacity(indices.len());
            for (&a, &b) in indices.iter().zip(indices.iter().cycle().skip(1)) {
                let idx = match arena.lookup.get(&(a, b)) {
                    Some(&idx) => idx,
                    None => arena.insert_pair(a, b),
                };
                let edge = &mut arena.edges[idx];
                if edge.face != NO_FACE {
                    return Err(ValidationError::DuplicateEdge { from: a, to: b });
                }
                edge.face = face_idx;
                edge_loop.push(idx);
            }
            loops.push(edge_loop);
        }

        if let Some(open) = arena.edges.iter().find(|e| e.face == NO_FACE) {
            return Err(ValidationError::OpenEdge {
                from: open.from,
                to: open.to,
            });
        }

        Ok((arena, loops))
    }

    /// Create `(a, b)` and its reverse `(b, a)`, returning the slot of `(a, b)`.
    fn insert_pair(&mut self, a: usize, b: usize) -> EdgeIdx {
        let forward = self.edges.len();
        let backward = forward + 1;
        self.edges.push(HalfEdge {
            from: a,
            to: b,
            reverse: backward,
            face: NO_FACE,
        });
        self.edges.push(HalfEdge {
            from: b,
            to: a,
            reverse: forward,
            face: NO_FACE,
        });
        self.lookup.insert((a, b), forward);
        self.lookup.insert((b, a), backward);
        forward
    }

    /// All half-edges in arena order.
    pub fn as_slice(&self) -> &[HalfEdge] {
        &self.edges
    }

    /// Number of half-edges (twice the number of undirected edges).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn get(&self, idx: EdgeIdx) -> Option<&HalfEdge> {
        self.edges.get(idx)
    }

    /// Slot of the reverse half-edge.
    pub fn reverse(&self, idx: EdgeIdx) -> Option<EdgeIdx> {
        self.edges.get(idx).map(|e| e.reverse)
    }

    /// Slot of the directed edge `from → to`, if present.
    pub fn find(&self, from: usize, to: usize) -> Option<EdgeIdx> {
        self.lookup.get(&(from, to)).copied()
    }

    /// Iterate over one representative per undirected edge.
    pub fn undirected(&self) -> impl Iterator<Item = (EdgeIdx, &HalfEdge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(idx, e)| *idx < e.reverse)
    }
}
