//! Fragment assembler

use super::planes::{TangentFrame, derive_planes};
use super::{Fragment, FractureConfig, RigidBodyState};
use crate::float_types::Real;
use crate::polyhedron::Polyhedron;
use geo::Polygon;
use nalgebra::Point2;

/// **Fragment Assembly**
///
/// For every cell, in seed order, the source is clipped by each of the cell's
/// planes in turn. The last clip recentres the result on the cell's seed
/// (lifted into body space through `frame`).
///
/// A cell that clips the source down to nothing yields no fragment. A cell whose
/// clip hits a topology error is logged and skipped; the other cells go on.
///
/// Surviving fragments take the source orientation, sit at the seed's world
/// position, and get mass, linear and angular velocity scaled by
/// `fragment volume / source volume`.
pub fn assemble(
    source: &Polyhedron,
    state: &RigidBodyState,
    cells: &[Polygon<Real>],
    seeds: &[Point2<Real>],
    frame: &TangentFrame,
    config: &FractureConfig,
) -> Vec<Fragment> {
    let source_volume = source.volume();
    if source_volume <= 0.0 {
        tracing::warn!(volume = source_volume, "assemble: source has no volume");
        return Vec::new();
    }

    let mut fragments = Vec::with_capacity(cells.len());
    for (index, (cell, seed)) in cells.iter().zip(seeds).enumerate() {
        let seed = frame.lift(seed);
        let planes = derive_planes(cell, frame);
        if planes.is_empty() {
            tracing::trace!(cell = index, "assemble: empty cell");
            continue;
        }

        let mut working = source.clone();
        let mut survived = true;
        for (k, plane) in planes.iter().enumerate() {
            let step = if k + 1 == planes.len() {
                working.clip_recentered(plane, &seed)
            } else {
                working.clip(plane)
            };
            match step {
                Ok(Some(next)) => working = next,
                Ok(None) => {
                    tracing::trace!(cell = index, plane = k, "assemble: cell misses the source");
                    survived = false;
                    break;
                },
                Err(err) => {
                    tracing::error!(cell = index, plane = k, %err, "assemble: clip failed, skipping cell");
                    survived = false;
                    break;
                },
            }
        }
        if !survived {
            continue;
        }

        let volume = working.volume();
        if volume <= config.min_fragment_volume {
            tracing::trace!(cell = index, volume, "assemble: fragment below minimum volume");
            continue;
        }

        let fragment_state = RigidBodyState {
            position: state.to_world(&seed),
            ..state.scaled(volume / source_volume)
        };
        fragments.push(Fragment {
            polyhedron: working,
            state: fragment_state,
            volume,
            seed,
        });
    }

    tracing::debug!(
        cells = cells.len(),
        fragments = fragments.len(),
        "assemble: fragments produced"
    );
    fragments
}
