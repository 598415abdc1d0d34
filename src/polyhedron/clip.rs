//! Half-space clipping of a convex [`Polyhedron`].

use super::Polyhedron;
use super::classify::{Classification, classify};
use super::plane::{BACK, COPLANAR, FRONT, Plane, SPANNING};
use crate::errors::TopologyError;
use crate::float_types::{Real, tolerance};
use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;

impl Polyhedron {
    /// **Half-Space Clip**
    ///
    /// Keeps the part of the solid on the retained side of `plane`
    /// (`normal · (x − point) < ε`) and closes the cut with a single cap face.
    ///
    /// Returns `Ok(None)` when nothing of the solid survives as a closed solid
    /// (fewer than 4 faces). Returns an error only when the input breaks the
    /// convex/manifold invariants.
    ///
    /// ## Algorithm
    /// 1. Classify vertices, half-edges and faces against the plane.
    /// 2. Kept faces pass through; outside faces are dropped; spanning faces are
    ///    rebuilt from their surviving segments, walked from the entry crossing
    ///    to the exit crossing.
    /// 3. Every directed edge left without a reverse lies on the cut; the
    ///    reversed open edges are chained into the cap face.
    /// 4. Vertices are reindexed densely and the half-edge arena rebuilt. Faces
    ///    keep their source planes and the cap takes `plane` itself.
    pub fn clip(&self, plane: &Plane) -> Result<Option<Polyhedron>, TopologyError> {
        self.clip_with_tolerance(plane, tolerance())
    }

    /// [`clip`](Self::clip), then express the result relative to `center`.
    pub fn clip_recentered(
        &self,
        plane: &Plane,
        center: &Point3<Real>,
    ) -> Result<Option<Polyhedron>, TopologyError> {
        Ok(self.clip(plane)?.map(|p| p.recentered(center)))
    }

    /// [`clip`](Self::clip) with an explicit classification tolerance.
    pub fn clip_with_tolerance(
        &self,
        plane: &Plane,
        epsilon: Real,
    ) -> Result<Option<Polyhedron>, TopologyError> {
        let cls = classify(self, plane, epsilon);

        if cls.all_faces_kept() {
            return Ok(Some(self.clone()));
        }
        if !cls.has_inside() {
            tracing::trace!("clip: no vertex strictly inside, no result");
            return Ok(None);
        }

        // trimmed faces stay on their source plane and the cap lies on the cut,
        // so every plane is known exactly and never refitted to a small loop
        let mut faces: Vec<Vec<usize>> = Vec::with_capacity(self.face_count() + 1);
        let mut planes: Vec<Option<Plane>> = Vec::with_capacity(self.face_count() + 1);
        for (face_idx, face) in self.faces().iter().enumerate() {
            match cls.faces[face_idx] {
                BACK | COPLANAR => {
                    faces.push(face.indices.clone());
                    planes.push(Some(face.plane));
                },
                FRONT => {},
                SPANNING => {
                    let rebuilt = self.rebuild_face(face_idx, &cls)?;
                    if rebuilt.len() >= 3 {
                        faces.push(rebuilt);
                        planes.push(Some(face.plane));
                    }
                },
                _ => unreachable!("face class is a two-bit mask"),
            }
        }

        if let Some(cap) = cap_loop(&faces)? {
            faces.push(cap);
            planes.push(Some(*plane));
        }

        if faces.len() < 4 {
            tracing::debug!(faces = faces.len(), "clip: too few faces left, no result");
            return Ok(None);
        }

        let (vertices, faces) = reindex(self.vertices(), &cls.intersections, faces);
        let clipped = Polyhedron::with_planes(vertices, faces, planes)?;
        tracing::debug!(
            vertices = clipped.vertex_count(),
            faces = clipped.face_count(),
            "clip: rebuilt polyhedron"
        );
        Ok(Some(clipped))
    }

    /// Surviving loop of a spanning face: from the crossing where the loop
    /// re-enters the half-space to the crossing where it leaves. The implicit
    /// closing edge runs along the cut.
    fn rebuild_face(&self, face_idx: usize, cls: &Classification) -> Result<Vec<usize>, TopologyError> {
        let face = &self.faces()[face_idx];
        let segments: Vec<(usize, usize)> = face
            .edges
            .iter()
            .filter_map(|&e| cls.surviving(self, e))
            .collect();

        let mut occurrences: HashMap<usize, usize> = HashMap::new();
        for &(a, b) in &segments {
            *occurrences.entry(a).or_default() += 1;
            *occurrences.entry(b).or_default() += 1;
        }
        let found = occurrences.values().filter(|&&n| n == 1).count();
        let next: HashMap<usize, usize> = segments.iter().copied().collect();

        // the entry endpoint only ever starts a segment
        let entry = segments
            .iter()
            .map(|&(a, _)| a)
            .find(|a| occurrences.get(a) == Some(&1));

        let Some(entry) = entry.filter(|_| found == 2) else {
            tracing::error!(face = face_idx, found, "clip: cut face does not have two endpoints");
            return Err(TopologyError::CutEndpoints { face: face_idx, found });
        };

        let mut chain = vec![entry];
        let mut current = entry;
        while let Some(&to) = next.get(&current) {
            if chain.len() > segments.len() {
                return Err(TopologyError::CutEndpoints { face: face_idx, found });
            }
            chain.push(to);
            current = to;
        }
        Ok(chain)
    }
}

/// Chain the reverses of all open directed edges into one cap loop.
///
/// Returns `None` when the faces are already closed. Fewer than 3 open edges
/// cannot bound a face and are treated as an unclosed cap.
fn cap_loop(faces: &[Vec<usize>]) -> Result<Option<Vec<usize>>, TopologyError> {
    let directed: HashSet<(usize, usize)> = faces
        .iter()
        .flat_map(|f| f.iter().copied().zip(f.iter().copied().cycle().skip(1)))
        .collect();

    // cap edges in face order, so the loop start is deterministic
    let mut cap_edges: Vec<(usize, usize)> = Vec::new();
    for face in faces {
        for (a, b) in face.iter().copied().zip(face.iter().copied().cycle().skip(1)) {
            if !directed.contains(&(b, a)) {
                cap_edges.push((b, a));
            }
        }
    }

    if cap_edges.is_empty() {
        return Ok(None);
    }
    if cap_edges.len() < 3 {
        return Err(TopologyError::CapUnclosed {
            chained: 0,
            total: cap_edges.len(),
        });
    }

    let mut next: HashMap<usize, usize> = HashMap::with_capacity(cap_edges.len());
    for &(a, b) in &cap_edges {
        if next.insert(a, b).is_some() {
            tracing::error!(vertex = a, "clip: cap boundary branches");
            return Err(TopologyError::CapBranch { vertex: a });
        }
    }

    let start = cap_edges[0].0;
    let mut cap = vec![start];
    let mut current = next[&start];
    while current != start {
        if cap.len() >= cap_edges.len() {
            break;
        }
        cap.push(current);
        match next.get(&current) {
            Some(&to) => current = to,
            None => break,
        }
    }

    if current != start || cap.len() != cap_edges.len() {
        tracing::error!(chained = cap.len(), total = cap_edges.len(), "clip: cap boundary is not closed");
        return Err(TopologyError::CapUnclosed {
            chained: cap.len(),
            total: cap_edges.len(),
        });
    }
    Ok(Some(cap))
}

/// Drop unreferenced vertices and renumber the rest densely, preserving order.
fn reindex(
    original: &[Point3<Real>],
    appended: &[Point3<Real>],
    faces: Vec<Vec<usize>>,
) -> (Vec<Point3<Real>>, Vec<Vec<usize>>) {
    let total = original.len() + appended.len();
    let mut used = vec![false; total];
    for &i in faces.iter().flatten() {
        used[i] = true;
    }

    let mut remap = vec![usize::MAX; total];
    let mut vertices = Vec::new();
    for (old, point) in original.iter().chain(appended).enumerate() {
        if used[old] {
            remap[old] = vertices.len();
            vertices.push(*point);
        }
    }

    let faces = faces
        .into_iter()
        .map(|f| f.into_iter().map(|i| remap[i]).collect())
        .collect();
    (vertices, faces)
}
