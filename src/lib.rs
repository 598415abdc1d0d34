//! Fragmentation of convex solids for rigid-body simulations.
//!
//! A convex [`Polyhedron`](polyhedron::Polyhedron) hit hard enough is cut
//! into smaller convex pieces: seeds are scattered around the impact, the
//! impact's tangent plane is partitioned into one cell per seed, every cell is
//! extruded into a set of clip planes, and the source is clipped by each set.
//! Mass and velocities are shared out by volume.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **serde-io**: `serde` derives and JSON load/save of shape assets
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod fracture;
pub mod io;
pub mod physics;
pub mod polyhedron;
pub mod tessellation;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{PhysicsError, TopologyError, ValidationError};
pub use fracture::{Fragment, FractureConfig, Impact, RigidBodyState, Shatter};
pub use physics::{ImpactEvent, PhysicsWorld};
pub use polyhedron::Polyhedron;
pub use polyhedron::plane::Plane;
