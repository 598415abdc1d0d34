//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::Point3;
use polyfrag::{Polyhedron, float_types::Real};

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]` of a polyhedron.
pub fn bounding_box(poly: &Polyhedron) -> [Real; 6] {
    let aabb = poly.bounding_box();
    [
        aabb.mins.x,
        aabb.mins.y,
        aabb.mins.z,
        aabb.maxs.x,
        aabb.maxs.y,
        aabb.maxs.z,
    ]
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Assert every structural invariant of a closed convex solid:
/// at least 4 faces, closed manifold, involutive reverse pairing, dense
/// vertex indices, convexity and outward winding.
pub fn assert_valid_solid(poly: &Polyhedron) {
    assert!(poly.face_count() >= 4, "only {} faces", poly.face_count());

    let analysis = poly.analyze_manifold();
    assert!(analysis.is_manifold, "not manifold: {analysis:?}");
    assert_eq!(analysis.euler_characteristic, 2, "{analysis:?}");
    assert_eq!(analysis.isolated_vertices, 0);

    for (idx, edge) in poly.edges().iter().enumerate() {
        let rev = poly.reverse(idx).expect("every edge has a reverse");
        assert_eq!(poly.reverse(rev), Some(idx));
        let r = poly.edge(rev).expect("reverse in range");
        assert_eq!((r.from, r.to), (edge.to, edge.from));
    }

    assert!(poly.is_convex(2e-5), "not convex");
    assert!(poly.volume() > 0.0, "inward winding");
}

/// Shorthand point constructor.
pub fn p(x: Real, y: Real, z: Real) -> Point3<Real> {
    Point3::new(x, y, z)
}

/// Total face area, summed over fan triangles of each face loop.
pub fn surface_area(poly: &Polyhedron) -> Real {
    let vertices = poly.vertices();
    poly.faces()
        .iter()
        .map(|face| {
            let a = vertices[face.indices[0]];
            face.indices[1..]
                .windows(2)
                .map(|w| (vertices[w[0]] - a).cross(&(vertices[w[1]] - a)).norm() * 0.5)
                .sum::<Real>()
        })
        .sum()
}

/// A closed but non-convex solid: a unit-high prism over the notched outline
/// `(0,0) (2,0) (2,2) (0,2) (1,1)`. Its notch opens toward -x, so a cut at
/// `x = 0.25` meets the bottom and top faces in two separate pieces.
pub fn notched_prism() -> Polyhedron {
    let outline = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [1.0, 1.0]];
    let mut points: Vec<[Real; 3]> = outline.iter().map(|&[x, y]| [x, y, 0.0]).collect();
    points.extend(outline.iter().map(|&[x, y]| [x, y, 1.0]));

    let mut faces: Vec<Vec<usize>> = vec![vec![4, 3, 2, 1, 0], vec![5, 6, 7, 8, 9]];
    for i in 0..5 {
        let j = (i + 1) % 5;
        faces.push(vec![i, j, j + 5, i + 5]);
    }
    let faces: Vec<&[usize]> = faces.iter().map(|f| f.as_slice()).collect();
    Polyhedron::from_arrays(&points, &faces).expect("notched prism is a closed manifold")
}
