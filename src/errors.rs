//! Validation, topology and physics errors

use crate::float_types::Real;
use nalgebra::Point3;
use std::fmt::Display;

/// All the possible issues we might encounter while building a [`Polyhedron`](crate::polyhedron::Polyhedron)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (TooFewVertices) A closed solid needs at least four vertices
    TooFewVertices(usize),
    /// (TooFewFaces) A closed solid needs at least four faces
    TooFewFaces(usize),
    /// (DegenerateFace) A face has fewer than three indices or spans no area
    DegenerateFace { face: usize, len: usize },
    /// (IndexOutOfRange) A face references a vertex that does not exist
    IndexOutOfRange { face: usize, index: usize, vertex_count: usize },
    /// (RepeatedIndex) A face visits the same vertex twice
    RepeatedIndex { face: usize, index: usize },
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    InvalidCoordinate(Point3<Real>),
    /// (DuplicateEdge) The directed edge is walked by two faces
    DuplicateEdge { from: usize, to: usize },
    /// (OpenEdge) The directed edge has no face on its reverse side
    OpenEdge { from: usize, to: usize },
    /// (FlatArray) A flat coordinate array is not made of xyz triples
    FlatArray(usize),
    /// (InvalidExtent) A shape dimension is zero, negative, NaN or infinite
    InvalidExtent(Real),
    /// In general, anything else
    Other(String, Option<Point3<Real>>),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TooFewVertices(n) => write!(f, "(TooFewVertices) A closed solid needs at least 4 vertices, got {}", n),
            ValidationError::TooFewFaces(n) => write!(f, "(TooFewFaces) A closed solid needs at least 4 faces, got {}", n),
            ValidationError::DegenerateFace { face, len } => write!(f, "(DegenerateFace) Face {} with {} indices does not span a plane", face, len),
            ValidationError::IndexOutOfRange { face, index, vertex_count } => write!(f, "(IndexOutOfRange) Face {} references vertex {} (vertex count = {})", face, index, vertex_count),
            ValidationError::RepeatedIndex { face, index } => write!(f, "(RepeatedIndex) Face {} visits vertex {} twice", face, index),
            ValidationError::InvalidCoordinate(opoint) => write!(f, "(InvalidCoordinate) The coordinate ({}) has a NaN or infinite", opoint),
            ValidationError::DuplicateEdge { from, to } => write!(f, "(DuplicateEdge) Edge {} -> {} is used by more than one face", from, to),
            ValidationError::OpenEdge { from, to } => write!(f, "(OpenEdge) Edge {} -> {} has no adjacent face", from, to),
            ValidationError::FlatArray(len) => write!(f, "(FlatArray) {} coordinates do not form xyz triples", len),
            ValidationError::InvalidExtent(extent) => write!(f, "(InvalidExtent) Shape extent {} must be finite and positive", extent),
            ValidationError::Other(str, opoint) => {
                if let Some(opoint) = opoint {
                    write!(f, "{} at: {}", str, opoint)
                } else {
                    write!(f, "{}", str)
                }
            },
        }
    }
}

/// Invariant violations found while clipping.
///
/// These point at a malformed (non-convex or non-manifold) input polyhedron
/// and abort the clip they were raised from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    /// The surviving part of a cut face must be a single open chain
    #[error("face {face}: expected 2 cut endpoints, found {found}")]
    CutEndpoints { face: usize, found: usize },
    /// Two cap edges leave the same vertex
    #[error("cap boundary branches at vertex {vertex}")]
    CapBranch { vertex: usize },
    /// The cap boundary does not close into a single loop
    #[error("cap boundary is not a single closed loop ({chained} of {total} edges chained)")]
    CapUnclosed { chained: usize, total: usize },
    /// A rebuilt polyhedron failed validation
    #[error("clip result is not a valid polyhedron: {0}")]
    Invalid(#[from] ValidationError),
}

/// Errors raised by the rigid-body world wrapper.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("no rigid body for handle {0:?}")]
    UnknownBody(crate::float_types::rapier3d::prelude::RigidBodyHandle),
    #[error("rigid body {0:?} has no registered polyhedron")]
    NotBreakable(crate::float_types::rapier3d::prelude::RigidBodyHandle),
    #[error("could not build a convex collider from {0} points")]
    Collider(usize),
}
