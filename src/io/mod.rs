//! Geometry interchange: flat vertex coordinates plus face index loops.

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::polyhedron::Polyhedron;
use nalgebra::Point3;

/// Generic I/O and format-conversion errors.
///
/// The JSON variant only exists with the `serde-io` feature.
#[derive(Debug)]
pub enum IoError {
    Validation(ValidationError),

    MalformedInput(String),

    #[cfg(feature = "serde-io")]
    /// Error bubbled up from `serde_json` while reading or writing
    Json(serde_json::Error),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            Validation(error) => write!(f, "Invalid shape: {error}"),

            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),

            #[cfg(feature = "serde-io")]
            Json(error) => write!(f, "JSON error: {error}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<ValidationError> for IoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

#[cfg(feature = "serde-io")]
impl From<serde_json::Error> for IoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Static shape asset: a flat `[x0, y0, z0, x1, ...]` coordinate list and one
/// outward-wound index loop per face.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-io", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeData {
    pub vertices: Vec<Real>,
    pub faces: Vec<Vec<usize>>,
}

impl ShapeData {
    /// Accepts the flat triangle-list form (`[a0, b0, c0, a1, b1, c1, ...]`).
    pub fn from_flat_triangles(vertices: Vec<Real>, flat_faces: &[usize]) -> Result<Self, IoError> {
        if flat_faces.len() % 3 != 0 {
            return Err(IoError::MalformedInput(format!(
                "{} face indices do not form triangles",
                flat_faces.len()
            )));
        }
        Ok(ShapeData {
            vertices,
            faces: flat_faces.chunks_exact(3).map(<[usize]>::to_vec).collect(),
        })
    }

    /// Coordinates grouped into points.
    pub fn points(&self) -> Result<Vec<Point3<Real>>, ValidationError> {
        if self.vertices.len() % 3 != 0 {
            return Err(ValidationError::FlatArray(self.vertices.len()));
        }
        Ok(self
            .vertices
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect())
    }

    #[cfg(feature = "serde-io")]
    pub fn from_json_str(json: &str) -> Result<Self, IoError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "serde-io")]
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, IoError> {
        Ok(serde_json::from_reader(reader)?)
    }

    #[cfg(feature = "serde-io")]
    pub fn to_json_string(&self) -> Result<String, IoError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Polyhedron {
    /// Build a polyhedron from an interchange asset.
    pub fn from_shape_data(data: &ShapeData) -> Result<Polyhedron, ValidationError> {
        Polyhedron::new(data.points()?, data.faces.clone())
    }

    /// Export vertices and faces in the interchange layout.
    pub fn to_shape_data(&self) -> ShapeData {
        ShapeData {
            vertices: self
                .vertices()
                .iter()
                .flat_map(|p| [p.x, p.y, p.z])
                .collect(),
            faces: self.face_indices(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_triangles_build_a_tetrahedron() {
        let data = ShapeData::from_flat_triangles(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            &[0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3],
        )
        .expect("whole triangles");
        let tetra = Polyhedron::from_shape_data(&data).expect("closed tetrahedron");
        assert_eq!(tetra.face_count(), 4);
        assert_eq!(tetra.to_shape_data(), data);
    }

    #[test]
    fn ragged_input_is_rejected() {
        assert!(matches!(
            ShapeData::from_flat_triangles(vec![], &[0, 1]),
            Err(IoError::MalformedInput(_))
        ));
        let data = ShapeData {
            vertices: vec![0.0; 10],
            faces: vec![],
        };
        assert_eq!(
            Polyhedron::from_shape_data(&data).unwrap_err(),
            ValidationError::FlatArray(10)
        );
    }

    #[cfg(feature = "serde-io")]
    #[test]
    fn json_asset() {
        let json = r#"{"vertices":[0,0,0, 1,0,0, 0,1,0, 0,0,1],"faces":[[0,2,1],[0,1,3],[0,3,2],[1,2,3]]}"#;
        let data = ShapeData::from_json_str(json).expect("valid json");
        let tetra = Polyhedron::from_shape_data(&data).expect("closed tetrahedron");
        assert!((tetra.volume() - 1.0 / 6.0).abs() < 1e-12);

        let back = ShapeData::from_json_str(&data.to_json_string().expect("serializable"))
            .expect("valid json");
        assert_eq!(back, data);
    }
}
