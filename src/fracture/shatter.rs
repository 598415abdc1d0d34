//! Fracture strategies
//!
//! A [`Shatter`] turns one impact into fragments. The physics world calls it
//! between steps for every body hit hard enough.

use super::assembler::assemble;
use super::planes::TangentFrame;
use super::{Fragment, FractureConfig, Impact, RigidBodyState};
use crate::float_types::Real;
use crate::polyhedron::Polyhedron;
use crate::tessellation::{BisectorTessellation, Bounds2, Tessellation, seeds};
use nalgebra::Point2;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Produce the fragments of `source` for one impact.
pub trait Shatter {
    /// Fragments replacing `source`. An empty list leaves the body intact.
    fn shatter(&mut self, source: &Polyhedron, state: &RigidBodyState, impact: &Impact) -> Vec<Fragment>;

    /// Momentum an impact must reach before [`shatter`](Self::shatter) is called.
    fn momentum_threshold(&self) -> Real;
}

/// Fragment `source` around caller-chosen seeds (tangent-plane coordinates
/// relative to the impact point).
pub fn shatter_at_seeds<T: Tessellation + ?Sized>(
    source: &Polyhedron,
    state: &RigidBodyState,
    impact: &Impact,
    seeds: &[Point2<Real>],
    tessellation: &T,
    config: &FractureConfig,
) -> Vec<Fragment> {
    let frame = TangentFrame::new(impact.local_point, impact.direction);
    let projected: Vec<Point2<Real>> = source.vertices().iter().map(|v| frame.project(v)).collect();

    let Some(bounds) = Bounds2::covering(projected.iter().chain(seeds), config.bounds_margin) else {
        return Vec::new();
    };
    let cells = tessellation.tessellate(seeds, &bounds);
    let fragments = assemble(source, state, &cells, seeds, &frame, config);

    tracing::debug!(
        seeds = seeds.len(),
        fragments = fragments.len(),
        momentum = impact.momentum,
        "shatter: impact fragmented"
    );
    fragments
}

/// Random seeds scattered around the impact, partitioned by a [`Tessellation`].
#[derive(Debug, Clone)]
pub struct VoronoiShatter<T: Tessellation = BisectorTessellation> {
    pub config: FractureConfig,
    pub tessellation: T,
    rng: StdRng,
}

impl VoronoiShatter<BisectorTessellation> {
    pub fn new(config: FractureConfig) -> Self {
        Self::with_tessellation(config, BisectorTessellation::default())
    }
}

impl<T: Tessellation> VoronoiShatter<T> {
    pub fn with_tessellation(config: FractureConfig, tessellation: T) -> Self {
        let rng = StdRng::seed_from_u64(config.rng_seed);
        VoronoiShatter {
            config,
            tessellation,
            rng,
        }
    }
}

impl Default for VoronoiShatter<BisectorTessellation> {
    fn default() -> Self {
        Self::new(FractureConfig::default())
    }
}

impl<T: Tessellation> Shatter for VoronoiShatter<T> {
    fn shatter(&mut self, source: &Polyhedron, state: &RigidBodyState, impact: &Impact) -> Vec<Fragment> {
        let radius = self.config.seed_radius_for(source);
        let seeds = seeds::scatter(&mut self.rng, Point2::origin(), self.config.seed_count, radius);
        shatter_at_seeds(source, state, impact, &seeds, &self.tessellation, &self.config)
    }

    fn momentum_threshold(&self) -> Real {
        self.config.momentum_threshold
    }
}

/// Four fixed seeds, one per quadrant around the impact.
#[derive(Debug, Clone, Default)]
pub struct QuadrantShatter {
    pub config: FractureConfig,
}

impl QuadrantShatter {
    pub const fn new(config: FractureConfig) -> Self {
        QuadrantShatter { config }
    }
}

impl Shatter for QuadrantShatter {
    fn shatter(&mut self, source: &Polyhedron, state: &RigidBodyState, impact: &Impact) -> Vec<Fragment> {
        let size = self.config.seed_radius_for(source);
        let seeds = seeds::quadrants(Point2::origin(), size);
        shatter_at_seeds(
            source,
            state,
            impact,
            &seeds,
            &BisectorTessellation::default(),
            &self.config,
        )
    }

    fn momentum_threshold(&self) -> Real {
        self.config.momentum_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn top_impact() -> Impact {
        Impact {
            local_point: Point3::new(0.0, 0.0, 1.0),
            direction: -Vector3::z(),
            momentum: 50.0,
        }
    }

    #[test]
    fn same_rng_seed_same_fragments() {
        let cube = Polyhedron::cube(1.0).unwrap();
        let state = RigidBodyState::default();
        let config = FractureConfig::default().with_seed_count(6).with_rng_seed(11);

        let a = VoronoiShatter::new(config.clone()).shatter(&cube, &state, &top_impact());
        let b = VoronoiShatter::new(config).shatter(&cube, &state, &top_impact());

        assert_eq!(a.len(), b.len());
        for (fa, fb) in a.iter().zip(&b) {
            assert_eq!(fa.seed, fb.seed);
            assert!((fa.volume - fb.volume).abs() < 1e-12);
        }
    }

    #[test]
    fn quadrants_split_the_cube_evenly() {
        let cube = Polyhedron::cube(1.0).unwrap();
        let mut shatter = QuadrantShatter::new(FractureConfig::default().with_seed_radius(0.5));
        let fragments = shatter.shatter(&cube, &RigidBodyState::default(), &top_impact());

        assert_eq!(fragments.len(), 4);
        for f in &fragments {
            assert!((f.volume - 2.0).abs() < 1e-9);
            assert!(f.polyhedron.is_manifold());
        }
    }
}
