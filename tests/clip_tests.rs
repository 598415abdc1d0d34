mod support;

use nalgebra::Vector3;
use polyfrag::float_types::{Real, TAU};
use polyfrag::{Plane, Polyhedron, TopologyError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use support::{approx_eq, assert_valid_solid, bounding_box, notched_prism, p};

#[test]
fn cube_keeps_negative_x_half() {
    let cube = Polyhedron::cube(1.0).unwrap();
    let plane = Plane::new(Vector3::x(), p(0.0, 0.0, 0.0));

    let half = cube.clip(&plane).unwrap().expect("half of the cube survives");
    assert_valid_solid(&half);
    assert_eq!(half.face_count(), 6);
    assert!(approx_eq(half.volume(), 4.0, 1e-9));

    let [min_x, _, _, max_x, _, _] = bounding_box(&half);
    assert!(approx_eq(min_x, -1.0, 1e-12));
    assert!(approx_eq(max_x, 0.0, 1e-12));
}

#[test]
fn tetrahedron_beyond_plane_gives_no_result() {
    let tetra = Polyhedron::tetrahedron();
    // keeps x ≥ 5, nothing of the tetrahedron is there
    let plane = Plane::new(-Vector3::x(), p(5.0, 0.0, 0.0));
    assert!(tetra.clip(&plane).unwrap().is_none());
}

#[test]
fn plane_past_the_solid_keeps_topology() {
    let octa = Polyhedron::octahedron(1.0).unwrap();
    let plane = Plane::new(Vector3::new(1.0, 1.0, 1.0), p(2.0, 2.0, 2.0));

    let same = octa.clip(&plane).unwrap().expect("untouched");
    assert_eq!(same.face_count(), octa.face_count());
    assert_eq!(same.vertex_count(), octa.vertex_count());
    assert_eq!(same.edge_count(), octa.edge_count());
    assert!(approx_eq(same.volume(), octa.volume(), 1e-12));
}

#[test]
fn plane_through_octahedron_vertices() {
    let octa = Polyhedron::octahedron(1.0).unwrap();
    // z = 0 passes through the four equatorial vertices
    let plane = Plane::new(Vector3::z(), p(0.0, 0.0, 0.0));

    let pyramid = octa.clip(&plane).unwrap().expect("lower half survives");
    assert_valid_solid(&pyramid);
    assert_eq!(pyramid.vertex_count(), 5);
    assert_eq!(pyramid.face_count(), 5);
    assert!(approx_eq(pyramid.volume(), 2.0 / 3.0, 1e-12));
}

#[test]
fn clipping_twice_by_the_same_plane_is_stable() {
    let cube = Polyhedron::cube(1.0).unwrap();
    let plane = Plane::new(Vector3::new(0.2, -1.0, 0.4), p(0.1, 0.3, 0.0));

    let once = cube.clip(&plane).unwrap().expect("part survives");
    let twice = once.clip(&plane).unwrap().expect("still there");
    assert_eq!(once.face_count(), twice.face_count());
    assert_eq!(once.vertex_count(), twice.vertex_count());
    assert!(approx_eq(once.volume(), twice.volume(), 1e-12));
}

#[test]
fn clip_order_does_not_change_the_result() {
    let cube = Polyhedron::cube(1.0).unwrap();
    let a = Plane::new(Vector3::new(1.0, 0.3, 0.0), p(0.2, 0.0, 0.0));
    let b = Plane::new(Vector3::new(-0.4, 1.0, 0.5), p(0.0, -0.1, 0.0));

    let ab = cube.clip(&a).unwrap().unwrap().clip(&b).unwrap().unwrap();
    let ba = cube.clip(&b).unwrap().unwrap().clip(&a).unwrap().unwrap();
    assert_valid_solid(&ab);
    assert_valid_solid(&ba);
    assert_eq!(ab.face_count(), ba.face_count());
    assert!(approx_eq(ab.volume(), ba.volume(), 1e-9));
}

#[test]
fn opposite_half_spaces_add_up() {
    let octa = Polyhedron::octahedron(1.5).unwrap();
    let plane = Plane::new(Vector3::new(0.3, 0.8, -0.5), p(0.1, 0.2, 0.0));

    let keep = octa.clip(&plane).unwrap().expect("one side");
    let rest = octa.clip(&plane.flipped()).unwrap().expect("other side");
    assert!(approx_eq(keep.volume() + rest.volume(), octa.volume(), 1e-9));
}

#[test]
fn random_planes_give_valid_solids_or_nothing() {
    let mut rng = StdRng::seed_from_u64(2024);
    let solids = [
        Polyhedron::cube(1.0).unwrap(),
        Polyhedron::tetrahedron(),
        Polyhedron::octahedron(1.0).unwrap(),
        Polyhedron::cuboid(3.0, 0.5, 1.0).unwrap(),
    ];

    for solid in &solids {
        let source_volume = solid.volume();
        for _ in 0..64 {
            let theta: Real = rng.gen_range(0.0..TAU);
            let z: Real = rng.gen_range(-1.0..1.0);
            let r = (1.0 - z * z).sqrt();
            let normal = Vector3::new(r * theta.cos(), r * theta.sin(), z);
            let anchor = p(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );

            match solid.clip(&Plane::new(normal, anchor)).unwrap() {
                Some(piece) => {
                    assert_valid_solid(&piece);
                    assert!(piece.volume() <= source_volume + 1e-9);
                    for v in piece.vertices() {
                        assert!(Plane::new(normal, anchor).signed_distance(v) < 1e-5);
                    }
                },
                None => {
                    // nothing strictly inside: every vertex is within tolerance of the outside
                    assert!(
                        solid
                            .vertices()
                            .iter()
                            .all(|v| Plane::new(normal, anchor).signed_distance(v) > -1e-5)
                    );
                },
            }
        }
    }
}

#[test]
fn repeated_cuts_keep_indices_dense() {
    let mut solid = Polyhedron::cube(1.0).unwrap();
    let planes = [
        Plane::new(Vector3::new(1.0, 1.0, 0.0), p(0.5, 0.5, 0.0)),
        Plane::new(Vector3::new(-1.0, 0.2, 1.0), p(0.0, 0.0, 0.5)),
        Plane::new(Vector3::new(0.0, -1.0, -1.0), p(0.0, -0.4, -0.4)),
        Plane::new(Vector3::new(0.7, -0.7, 0.1), p(0.3, -0.3, 0.0)),
    ];
    for plane in &planes {
        solid = solid.clip(plane).unwrap().expect("piece survives");
        assert_valid_solid(&solid);
        // every vertex is used by some face
        let mut used = vec![false; solid.vertex_count()];
        for face in solid.faces() {
            for &i in &face.indices {
                used[i] = true;
            }
        }
        assert!(used.into_iter().all(|u| u));
    }
}

#[test]
fn recentered_clip_moves_vertices() {
    let cube = Polyhedron::cube(1.0).unwrap();
    let plane = Plane::new(-Vector3::z(), p(0.0, 0.0, 0.0));
    let center = p(0.0, 0.0, 0.5);

    let top = cube.clip_recentered(&plane, &center).unwrap().unwrap();
    let [_, _, min_z, _, _, max_z] = bounding_box(&top);
    assert!(approx_eq(min_z, -0.5, 1e-12));
    assert!(approx_eq(max_z, 0.5, 1e-12));
}

#[test]
fn concave_input_is_reported_not_clipped() {
    let prism = notched_prism();
    assert!(approx_eq(prism.volume(), 3.0, 1e-12));

    let plane = Plane::new(Vector3::x(), p(0.25, 0.0, 0.0));
    let err = prism.clip(&plane).unwrap_err();
    assert_eq!(err, TopologyError::CutEndpoints { face: 0, found: 4 });

    // a cut clear of the notch only meets convex parts of each face
    let plane = Plane::new(-Vector3::x(), p(1.5, 0.0, 0.0));
    let slab = prism.clip(&plane).unwrap().expect("right side survives");
    assert_valid_solid(&slab);
    assert!(approx_eq(slab.volume(), 1.0, 1e-12));
}
