use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Minimum squared separation below which two edge endpoints count as
/// coincident.
const COINCIDENT_EPSILON_SQ: f64 = 1e-24;

/// Errors raised when constructing or rescaling polyhedron skeletons.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolyhedronError {
    /// A skeleton needs at least one vertex.
    #[error("Polyhedron '{0}' has no vertices")]
    NoVertices(String),

    /// Nominal sizes must stay positive so rescaling ratios are defined.
    #[error("Polyhedron size must be positive, got {0}")]
    InvalidSize(f64),

    /// An edge or face references a vertex that does not exist.
    #[error("{element} references vertex {index}, but there are only {vertex_count} vertices")]
    IndexOutOfRange {
        element: String,
        index: usize,
        vertex_count: usize,
    },

    /// An edge joins a vertex to itself or to a coincident vertex, so its
    /// direction is undefined.
    #[error("Edge {index} is degenerate: vertices {a} and {b} coincide")]
    DegenerateEdge { index: usize, a: usize, b: usize },

    /// No built-in polytope is registered under the given name.
    #[error("Unknown polyhedron '{0}'")]
    UnknownPolyhedron(String),
}

/// Errors raised when loading a skeleton from a TOML file.
#[derive(Debug, Error)]
pub enum PolyhedronLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid skeleton: {0}")]
    Invalid(#[from] PolyhedronError),
}

#[derive(Debug, Deserialize)]
struct RawPolyhedron {
    name: String,
    size: f64,
    coordination: usize,
    vertices: Vec<[f64; 3]>,
    edges: Vec<[usize; 2]>,
    #[serde(default)]
    faces: Vec<Vec<usize>>,
}

/// A polyhedron skeleton: vertices, edges, faces, a nominal size, and the
/// vertex coordination number. The scaffold a fragment is aligned onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    name: String,
    vertices: Vec<Point3<f64>>,
    edges: Vec<[usize; 2]>,
    faces: Vec<Vec<usize>>,
    size: f64,
    coordination: usize,
}

impl Polyhedron {
    /// Validates and builds a skeleton.
    ///
    /// # Errors
    ///
    /// Fails for an empty vertex set, a non-positive size, any edge/face
    /// index that does not reference a vertex, or an edge whose endpoints
    /// coincide.
    pub fn new(
        name: &str,
        vertices: Vec<Point3<f64>>,
        edges: Vec<[usize; 2]>,
        faces: Vec<Vec<usize>>,
        size: f64,
        coordination: usize,
    ) -> Result<Self, PolyhedronError> {
        if vertices.is_empty() {
            return Err(PolyhedronError::NoVertices(name.to_string()));
        }
        if size <= 0.0 {
            return Err(PolyhedronError::InvalidSize(size));
        }
        for (edge_index, &[a, b]) in edges.iter().enumerate() {
            for vertex_index in [a, b] {
                if vertex_index >= vertices.len() {
                    return Err(PolyhedronError::IndexOutOfRange {
                        element: format!("edge {}", edge_index),
                        index: vertex_index,
                        vertex_count: vertices.len(),
                    });
                }
            }
            // A self-loop or coincident endpoints leave the edge direction
            // undefined, which would turn into NaN coordinates downstream.
            if a == b || (vertices[b] - vertices[a]).norm_squared() < COINCIDENT_EPSILON_SQ {
                return Err(PolyhedronError::DegenerateEdge {
                    index: edge_index,
                    a,
                    b,
                });
            }
        }
        for (face_index, face) in faces.iter().enumerate() {
            for &vertex_index in face {
                if vertex_index >= vertices.len() {
                    return Err(PolyhedronError::IndexOutOfRange {
                        element: format!("face {}", face_index),
                        index: vertex_index,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            vertices,
            edges,
            faces,
            size,
            coordination,
        })
    }

    /// Returns a built-in skeleton by name: "triangle", "tetrahedron", "cube",
    /// or "octahedron", each with unit edge length and nominal size 1.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError::UnknownPolyhedron`] for unregistered names.
    pub fn builtin(name: &str) -> Result<Self, PolyhedronError> {
        let s3 = 3.0f64.sqrt();
        match name.to_ascii_lowercase().as_str() {
            "triangle" => Self::new(
                "triangle",
                vec![
                    Point3::origin(),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.5, s3 / 2.0, 0.0),
                ],
                vec![[0, 1], [1, 2], [0, 2]],
                vec![vec![0, 1, 2]],
                1.0,
                2,
            ),
            "tetrahedron" => Self::new(
                "tetrahedron",
                vec![
                    Point3::origin(),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.5, s3 / 2.0, 0.0),
                    Point3::new(0.5, s3 / 6.0, 6.0f64.sqrt() / 3.0),
                ],
                vec![[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]],
                vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 2, 3], vec![1, 2, 3]],
                1.0,
                3,
            ),
            "cube" => {
                // Vertex index encodes the corner: bit 0 = x, bit 1 = y, bit 2 = z.
                let vertices = (0..8)
                    .map(|i| {
                        Point3::new(
                            (i & 1) as f64,
                            ((i >> 1) & 1) as f64,
                            ((i >> 2) & 1) as f64,
                        )
                    })
                    .collect();
                Self::new(
                    "cube",
                    vertices,
                    vec![
                        [0, 1],
                        [0, 2],
                        [0, 4],
                        [1, 3],
                        [1, 5],
                        [2, 3],
                        [2, 6],
                        [3, 7],
                        [4, 5],
                        [4, 6],
                        [5, 7],
                        [6, 7],
                    ],
                    vec![
                        vec![0, 1, 3, 2],
                        vec![4, 5, 7, 6],
                        vec![0, 1, 5, 4],
                        vec![2, 3, 7, 6],
                        vec![0, 2, 6, 4],
                        vec![1, 3, 7, 5],
                    ],
                    1.0,
                    3,
                )
            }
            "octahedron" => {
                let s = 0.5f64.sqrt();
                Self::new(
                    "octahedron",
                    vec![
                        Point3::new(s, 0.0, 0.0),
                        Point3::new(-s, 0.0, 0.0),
                        Point3::new(0.0, s, 0.0),
                        Point3::new(0.0, -s, 0.0),
                        Point3::new(0.0, 0.0, s),
                        Point3::new(0.0, 0.0, -s),
                    ],
                    vec![
                        [0, 2],
                        [0, 3],
                        [0, 4],
                        [0, 5],
                        [1, 2],
                        [1, 3],
                        [1, 4],
                        [1, 5],
                        [2, 4],
                        [2, 5],
                        [3, 4],
                        [3, 5],
                    ],
                    vec![
                        vec![0, 2, 4],
                        vec![0, 2, 5],
                        vec![0, 3, 4],
                        vec![0, 3, 5],
                        vec![1, 2, 4],
                        vec![1, 2, 5],
                        vec![1, 3, 4],
                        vec![1, 3, 5],
                    ],
                    1.0,
                    4,
                )
            }
            other => Err(PolyhedronError::UnknownPolyhedron(other.to_string())),
        }
    }

    /// Loads a skeleton from a TOML file and validates it.
    pub fn load(path: &Path) -> Result<Self, PolyhedronLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| PolyhedronLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: RawPolyhedron =
            toml::from_str(&content).map_err(|e| PolyhedronLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        let vertices = raw
            .vertices
            .into_iter()
            .map(|[x, y, z]| Point3::new(x, y, z))
            .collect();
        Ok(Self::new(
            &raw.name,
            vertices,
            raw.edges,
            raw.faces,
            raw.size,
            raw.coordination,
        )?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Vertex coordination number (bonds per vertex in the assembled cage).
    pub fn coordination(&self) -> usize {
        self.coordination
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Rescales the skeleton so its nominal size becomes `new_size`; every
    /// vertex is multiplied by `new_size / size`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError::InvalidSize`] for a non-positive target.
    pub fn resize(&mut self, new_size: f64) -> Result<(), PolyhedronError> {
        if new_size <= 0.0 {
            return Err(PolyhedronError::InvalidSize(new_size));
        }
        let ratio = new_size / self.size;
        for vertex in &mut self.vertices {
            vertex.coords *= ratio;
        }
        self.size = new_size;
        Ok(())
    }

    /// Unit direction vector of every edge, in edge order.
    pub fn edge_directions(&self) -> Vec<Vector3<f64>> {
        self.edges
            .iter()
            .map(|&[a, b]| (self.vertices[b] - self.vertices[a]).normalize())
            .collect()
    }

    /// Midpoint of every edge, in edge order.
    pub fn edge_midpoints(&self) -> Vec<Point3<f64>> {
        self.edges
            .iter()
            .map(|&[a, b]| Point3::from((self.vertices[a].coords + self.vertices[b].coords) / 2.0))
            .collect()
    }
}
