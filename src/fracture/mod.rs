//! Fragmentation pipeline: seeds → cells → clip planes → fragments.

use crate::float_types::Real;
use crate::polyhedron::Polyhedron;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Cell loops to clip planes
pub mod planes;

/// Per-cell clipping and mass redistribution
pub mod assembler;

/// Impact-driven fracture strategies
pub mod shatter;

pub use assembler::assemble;
pub use planes::{TangentFrame, derive_planes};
pub use shatter::{QuadrantShatter, Shatter, VoronoiShatter};

/// Tunables for one fracture strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-io", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-io", serde(default))]
pub struct FractureConfig {
    /// Seeds scattered per impact
    pub seed_count: usize,
    /// Scatter radius; `None` uses half the source's bounding-sphere radius
    pub seed_radius: Option<Real>,
    /// `mass × impact speed along the normal` needed to break a body
    pub momentum_threshold: Real,
    /// Padding around the projected source when building the tessellation square
    pub bounds_margin: Real,
    /// Seed of the scatter RNG
    pub rng_seed: u64,
    /// Fragments with a volume at or below this are dropped
    pub min_fragment_volume: Real,
}

impl Default for FractureConfig {
    fn default() -> Self {
        FractureConfig {
            seed_count: 4,
            seed_radius: None,
            momentum_threshold: 20.0,
            bounds_margin: 1.0,
            rng_seed: 0x5eed,
            min_fragment_volume: 0.0,
        }
    }
}

impl FractureConfig {
    pub const fn with_seed_count(mut self, seed_count: usize) -> Self {
        self.seed_count = seed_count;
        self
    }

    pub const fn with_seed_radius(mut self, radius: Real) -> Self {
        self.seed_radius = Some(radius);
        self
    }

    pub const fn with_momentum_threshold(mut self, threshold: Real) -> Self {
        self.momentum_threshold = threshold;
        self
    }

    pub const fn with_bounds_margin(mut self, margin: Real) -> Self {
        self.bounds_margin = margin;
        self
    }

    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    pub const fn with_min_fragment_volume(mut self, volume: Real) -> Self {
        self.min_fragment_volume = volume;
        self
    }

    /// Scatter radius for `source`, falling back to half its bounding-sphere radius.
    pub fn seed_radius_for(&self, source: &Polyhedron) -> Real {
        self.seed_radius
            .unwrap_or_else(|| source.bounding_radius(&source.centroid()) / 2.0)
    }
}

/// Physical state of a rigid body, as handed over by the physics world.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyState {
    /// World position of the body-local origin
    pub position: Point3<Real>,
    pub orientation: UnitQuaternion<Real>,
    pub mass: Real,
    pub linvel: Vector3<Real>,
    pub angvel: Vector3<Real>,
    /// Principal angular inertia
    pub inertia: Vector3<Real>,
    /// Accumulated user force
    pub force: Vector3<Real>,
}

impl Default for RigidBodyState {
    fn default() -> Self {
        RigidBodyState {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
            mass: 1.0,
            linvel: Vector3::zeros(),
            angvel: Vector3::zeros(),
            inertia: Vector3::new(1.0, 1.0, 1.0),
            force: Vector3::zeros(),
        }
    }
}

impl RigidBodyState {
    /// Body-local point → world space.
    pub fn to_world(&self, local: &Point3<Real>) -> Point3<Real> {
        self.position + self.orientation * local.coords
    }

    /// Copy with mass, linear and angular velocity scaled by `ratio`.
    ///
    /// Inertia and force are copied unchanged.
    pub fn scaled(&self, ratio: Real) -> Self {
        RigidBodyState {
            mass: self.mass * ratio,
            linvel: self.linvel * ratio,
            angvel: self.angvel * ratio,
            ..self.clone()
        }
    }
}

/// Where and how hard a body was hit, in the body's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Contact point relative to the body origin
    pub local_point: Point3<Real>,
    /// Direction the impact propagates into the body; cells are extruded along it
    pub direction: Vector3<Real>,
    /// `mass × impact speed along the contact normal`
    pub momentum: Real,
}

/// One piece of a broken body.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Geometry relative to the fragment's own origin (the seed)
    pub polyhedron: Polyhedron,
    /// World state: position at the seed, orientation of the source, scaled mass and velocities
    pub state: RigidBodyState,
    pub volume: Real,
    /// Seed position in the source's local frame
    pub seed: Point3<Real>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_state_keeps_inertia_and_force() {
        let state = RigidBodyState {
            mass: 10.0,
            linvel: Vector3::new(2.0, 0.0, 0.0),
            angvel: Vector3::new(0.0, 4.0, 0.0),
            force: Vector3::new(0.0, -98.0, 0.0),
            ..Default::default()
        };
        let quarter = state.scaled(0.25);
        assert_eq!(quarter.mass, 2.5);
        assert_eq!(quarter.linvel, Vector3::new(0.5, 0.0, 0.0));
        assert_eq!(quarter.angvel, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(quarter.inertia, state.inertia);
        assert_eq!(quarter.force, state.force);
    }

    #[test]
    fn default_radius_is_half_the_bounding_sphere() {
        let cube = Polyhedron::cube(1.0).unwrap();
        let radius = FractureConfig::default().seed_radius_for(&cube);
        assert!((radius - (3.0 as Real).sqrt() / 2.0).abs() < 1e-9);
        assert_eq!(FractureConfig::default().with_seed_radius(0.3).seed_radius_for(&cube), 0.3);
    }
}
