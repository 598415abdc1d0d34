mod support;

use nalgebra::{UnitQuaternion, Vector3};
use polyfrag::float_types::{FRAC_PI_2, Real};
use polyfrag::fracture::{FractureConfig, QuadrantShatter, VoronoiShatter};
use polyfrag::{PhysicsWorld, Polyhedron, RigidBodyState};
use support::{approx_eq, p};

fn table(world: &mut PhysicsWorld) {
    world.add_static_cuboid(Vector3::new(5.0, 0.25, 5.0), p(0.0, -0.25, 0.0));
}

#[test]
fn dropped_plate_breaks_on_the_table() {
    let mut world = PhysicsWorld::new();
    table(&mut world);
    let state = RigidBodyState {
        position: p(0.0, 1.0, 0.0),
        orientation: UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2),
        mass: 10.0,
        linvel: Vector3::new(0.0, -8.0, 0.0),
        ..Default::default()
    };
    let plate = world.spawn(Polyhedron::plate(), &state).expect("convex plate");

    let mut shatter = VoronoiShatter::new(FractureConfig::default().with_seed_count(5));
    let mut spawned = Vec::new();
    for _ in 0..120 {
        let events = world.step();
        spawned = world.break_bodies(&events, &mut shatter);
        if !spawned.is_empty() {
            break;
        }
    }

    assert!(!spawned.is_empty(), "plate never broke");
    assert!(world.body_state(plate).is_err());
    assert_eq!(world.body_count(), spawned.len());
    let mass: Real = spawned
        .iter()
        .map(|&h| world.body_state(h).expect("fragment body").mass)
        .sum();
    assert!(mass <= 10.0 + 1e-6);
    for &h in &spawned {
        assert!(world.polyhedron(h).expect("breakable fragment").is_manifold());
    }
}

#[test]
fn slow_landing_leaves_the_body_whole() {
    let mut world = PhysicsWorld::new();
    table(&mut world);
    let state = RigidBodyState {
        position: p(0.0, 0.6, 0.0),
        mass: 1.0,
        ..Default::default()
    };
    let cube = world.spawn(Polyhedron::cube(0.5).unwrap(), &state).expect("cube hull");

    let mut shatter = QuadrantShatter::default();
    for _ in 0..90 {
        let events = world.step();
        assert!(world.break_bodies(&events, &mut shatter).is_empty());
    }
    assert_eq!(world.body_count(), 1);
    let rest = world.body_state(cube).expect("still there");
    assert!(approx_eq(rest.mass, 1.0, 1e-9));
    assert!(rest.position.y > 0.0);
}

#[test]
fn bodies_falling_off_the_table_are_removed() {
    let mut world = PhysicsWorld::new();
    table(&mut world);
    let state = RigidBodyState {
        position: p(20.0, 0.0, 0.0),
        ..Default::default()
    };
    world.spawn(Polyhedron::tetrahedron(), &state).expect("hull");

    let mut removed = 0;
    for _ in 0..240 {
        world.step();
        removed += world.remove_below(-5.0);
    }
    assert_eq!(removed, 1);
    assert_eq!(world.body_count(), 0);
}
