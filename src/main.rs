// main.rs
//
// Drop the plate asset on a table, break it on impact and report the pieces.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use polyfrag::float_types::FRAC_PI_2;
use polyfrag::fracture::{FractureConfig, VoronoiShatter};
use polyfrag::{PhysicsWorld, Polyhedron, RigidBodyState};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut world = PhysicsWorld::new();
    world.add_static_cuboid(Vector3::new(5.0, 0.25, 5.0), Point3::new(0.0, -0.25, 0.0));

    // the asset's thickness axis is z; stand it flat on the table
    let state = RigidBodyState {
        position: Point3::new(0.0, 3.0, 0.0),
        orientation: UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2),
        mass: 10.0,
        linvel: Vector3::new(0.0, -6.0, 0.0),
        ..Default::default()
    };
    let plate = Polyhedron::plate();
    println!(
        "plate: {} vertices, {} faces, volume {:.4}",
        plate.vertex_count(),
        plate.face_count(),
        plate.volume()
    );
    if let Err(err) = world.spawn(plate, &state) {
        eprintln!("could not spawn the plate: {err}");
        return;
    }

    let mut shatter = VoronoiShatter::new(FractureConfig::default().with_seed_count(6));
    for frame in 0..240 {
        let events = world.step();
        let spawned = world.break_bodies(&events, &mut shatter);
        if !spawned.is_empty() {
            println!("frame {frame}: {} fragments", spawned.len());
            for handle in &spawned {
                if let (Ok(state), Ok(poly)) = (world.body_state(*handle), world.polyhedron(*handle)) {
                    println!(
                        "  mass {:.3}  faces {:>2}  at ({:.2}, {:.2}, {:.2})",
                        state.mass,
                        poly.face_count(),
                        state.position.x,
                        state.position.y,
                        state.position.z
                    );
                }
            }
        }
        world.remove_below(-5.0);
    }
    println!("{} bodies left", world.body_count());
}
