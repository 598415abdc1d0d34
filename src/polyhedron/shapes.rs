//! Convex solids as `Polyhedron`s

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::polyhedron::Polyhedron;
use nalgebra::Point3;

/// Vertices of the convex plate asset: an octagonal dish, `z` is its thickness axis.
const PLATE_VERTICES: [[Real; 3]; 26] = [
    [-1.024192, -1.024191, 0.190750],
    [0.000000, -1.448425, 0.190750],
    [0.000000, 0.000000, 0.190750],
    [0.000000, 1.448425, 0.190750],
    [-1.024190, 1.024192, 0.190750],
    [-1.000000, 0.000001, -0.051187],
    [-1.024190, 1.024192, 0.042470],
    [-0.707106, 0.707108, -0.051187],
    [0.707107, 0.707107, -0.051187],
    [1.448425, 0.000000, 0.042470],
    [1.000000, 0.000000, -0.051187],
    [1.024191, 1.024191, 0.190750],
    [0.707107, -0.707107, -0.051187],
    [0.000000, -1.448425, 0.042470],
    [0.000000, -1.000000, -0.051187],
    [1.024191, -1.024191, 0.190750],
    [-1.448425, 0.000001, 0.042470],
    [-1.448425, 0.000001, 0.190750],
    [1.448425, 0.000000, 0.190750],
    [1.024191, 1.024191, 0.042470],
    [1.024191, -1.024191, 0.042470],
    [-1.024192, -1.024191, 0.042470],
    [0.000000, 1.448425, 0.042470],
    [-0.707107, -0.707106, -0.051187],
    [0.000000, 1.000000, -0.051187],
    [0.000000, 0.000000, -0.051187],
];

/// Outward-wound triangles of the plate asset.
const PLATE_TRIANGLES: [[usize; 3]; 48] = [
    [0, 1, 2],
    [3, 4, 2],
    [5, 6, 7],
    [8, 9, 10],
    [11, 3, 2],
    [12, 13, 14],
    [1, 15, 2],
    [5, 16, 6],
    [17, 0, 2],
    [18, 19, 11],
    [15, 9, 18],
    [1, 20, 15],
    [0, 13, 1],
    [17, 21, 0],
    [4, 16, 17],
    [3, 6, 4],
    [11, 22, 3],
    [14, 21, 23],
    [18, 11, 2],
    [12, 9, 20],
    [7, 22, 24],
    [24, 8, 25],
    [4, 17, 2],
    [24, 19, 8],
    [23, 16, 5],
    [15, 18, 2],
    [8, 10, 25],
    [10, 12, 25],
    [12, 14, 25],
    [14, 23, 25],
    [23, 5, 25],
    [5, 7, 25],
    [7, 24, 25],
    [8, 19, 9],
    [12, 20, 13],
    [18, 9, 19],
    [15, 20, 9],
    [1, 13, 20],
    [0, 21, 13],
    [17, 16, 21],
    [4, 6, 16],
    [3, 22, 6],
    [11, 19, 22],
    [14, 13, 21],
    [12, 10, 9],
    [7, 6, 22],
    [24, 22, 19],
    [23, 21, 16],
];

impl Polyhedron {
    /// **Axis-Aligned Box**
    ///
    /// Box spanning `[-w/2, w/2] × [-h/2, h/2] × [-d/2, d/2]`, centred on the origin.
    ///
    /// ## **Vertex Layout**
    /// ```text
    ///     4-------5
    ///    /|      /|
    ///   0-------1 |
    ///   | |     | |
    ///   | 7-----|-6
    ///   |/      |/
    ///   3-------2
    /// ```
    /// Faces are wound counter-clockwise seen from outside:
    /// bottom `[0,3,2,1]`, top `[4,5,6,7]`, front `[0,1,5,4]`,
    /// back `[3,7,6,2]`, left `[0,4,7,3]`, right `[1,2,6,5]`.
    ///
    /// Every extent must be finite and positive, otherwise the faces would wind
    /// inward.
    pub fn cuboid(width: Real, height: Real, depth: Real) -> Result<Polyhedron, ValidationError> {
        check_extent(width)?;
        check_extent(height)?;
        check_extent(depth)?;
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
        let vertices = vec![
            Point3::new(-x, -y, -z),
            Point3::new(x, -y, -z),
            Point3::new(x, y, -z),
            Point3::new(-x, y, -z),
            Point3::new(-x, -y, z),
            Point3::new(x, -y, z),
            Point3::new(x, y, z),
            Point3::new(-x, y, z),
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![3, 7, 6, 2],
            vec![0, 4, 7, 3],
            vec![1, 2, 6, 5],
        ];
        Self::new(vertices, faces)
    }

    /// Cube with vertices at `(±h, ±h, ±h)`.
    pub fn cube(half_extent: Real) -> Result<Polyhedron, ValidationError> {
        let side = 2.0 * half_extent;
        Self::cuboid(side, side, side)
    }

    /// Corner tetrahedron `(0,0,0)`, `(1,0,0)`, `(0,1,0)`, `(0,0,1)`.
    pub fn tetrahedron() -> Polyhedron {
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let faces: [&[usize]; 4] = [&[0, 2, 1], &[0, 1, 3], &[0, 3, 2], &[1, 2, 3]];
        Self::from_arrays(&points, &faces).expect("tetrahedron table is a closed manifold")
    }

    /// Regular octahedron scaled by `radius`
    pub fn octahedron(radius: Real) -> Result<Polyhedron, ValidationError> {
        check_extent(radius)?;
        let pts = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        let faces: [&[usize]; 8] = [
            &[0, 2, 4],
            &[2, 1, 4],
            &[1, 3, 4],
            &[3, 0, 4],
            &[5, 2, 0],
            &[5, 1, 2],
            &[5, 3, 1],
            &[5, 0, 3],
        ];
        let scaled: Vec<[Real; 3]> = pts
            .iter()
            .map(|&[x, y, z]| [x * radius, y * radius, z * radius])
            .collect();
        Self::from_arrays(&scaled, &faces)
    }

    /// The convex dinner-plate asset (26 vertices, 48 triangles).
    pub fn plate() -> Polyhedron {
        let faces: Vec<&[usize]> = PLATE_TRIANGLES.iter().map(|t| t.as_slice()).collect();
        Self::from_arrays(&PLATE_VERTICES, &faces).expect("plate table is a closed manifold")
    }
}

fn check_extent(extent: Real) -> Result<(), ValidationError> {
    if extent.is_finite() && extent > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidExtent(extent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_are_closed_and_convex() {
        for (name, solid) in [
            ("cube", Polyhedron::cube(1.0).unwrap()),
            ("tetrahedron", Polyhedron::tetrahedron()),
            ("octahedron", Polyhedron::octahedron(2.0).unwrap()),
            ("plate", Polyhedron::plate()),
        ] {
            assert!(solid.volume() > 0.0, "{name} is wound inward");
            assert!(solid.is_convex(1e-5), "{name} is not convex");
            assert!(solid.is_manifold(), "{name} is not manifold");
        }
    }

    #[test]
    fn known_volumes() {
        assert!((Polyhedron::tetrahedron().volume() - 1.0 / 6.0).abs() < 1e-12);
        assert!((Polyhedron::octahedron(1.0).unwrap().volume() - 4.0 / 3.0).abs() < 1e-12);
        let slab = Polyhedron::cuboid(2.0, 4.0, 0.5).expect("valid box");
        assert!((slab.volume() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn plate_counts() {
        let plate = Polyhedron::plate();
        assert_eq!(plate.vertex_count(), 26);
        assert_eq!(plate.face_count(), 48);
        assert_eq!(plate.edge_count(), 72);
    }

    #[test]
    fn bad_extents_are_rejected() {
        assert!(matches!(
            Polyhedron::cube(Real::NAN),
            Err(ValidationError::InvalidExtent(_))
        ));
        assert!(matches!(
            Polyhedron::cuboid(1.0, -2.0, 1.0),
            Err(ValidationError::InvalidExtent(e)) if e == -2.0
        ));
        assert!(Polyhedron::cuboid(1.0, 1.0, 0.0).is_err());
        assert!(Polyhedron::cuboid(Real::INFINITY, 1.0, 1.0).is_err());
        assert!(Polyhedron::octahedron(-1.0).is_err());
    }
}
