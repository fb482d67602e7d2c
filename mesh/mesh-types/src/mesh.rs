//! Indexed polygon mesh with per-corner colors.

use crate::{Color, Face, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed polygon mesh.
///
/// This is the snapshot a host hands to the paint tools. Vertices and faces
/// are identified by their index; faces reference vertices through their
/// corners, and each corner owns its own color.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Vertex>` - Vertex positions
/// - `faces`: `Vec<Face>` - Polygons as ordered corner lists
///
/// # Example
///
/// ```
/// use mesh_types::{Color, Face, PolyMesh, Vertex};
///
/// let mut mesh = PolyMesh::new();
/// let a = mesh.add_vertex(Vertex::from_coords(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(Vertex::from_coords(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.add_face(Face::uniform(&[a, b, c], Color::RED));
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.corner_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Polygon faces.
    pub faces: Vec<Face>,
}

impl PolyMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Append a vertex and return its index.
    ///
    /// # Note
    ///
    /// Indices are `u32`; meshes with more than `u32::MAX` vertices are not
    /// supported.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u32
    }

    /// Append a face and return its index.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_face(&mut self, face: Face) -> u32 {
        self.faces.push(face);
        (self.faces.len() - 1) as u32
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Total number of corners across all faces.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(Face::len).sum()
    }

    /// Check if the mesh has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Get a face by index.
    #[inline]
    #[must_use]
    pub fn face(&self, index: u32) -> Option<&Face> {
        self.faces.get(index as usize)
    }

    /// Get a vertex by index.
    #[inline]
    #[must_use]
    pub fn vertex(&self, index: u32) -> Option<&Vertex> {
        self.vertices.get(index as usize)
    }

    /// Merge another mesh into this one.
    ///
    /// The other mesh's vertices and faces are appended, with corner vertex
    /// indices shifted accordingly.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &Self) {
        let vertex_offset = self.vertices.len() as u32;

        self.vertices.extend(other.vertices.iter().cloned());
        self.faces.extend(other.faces.iter().map(|face| {
            let mut face = face.clone();
            for corner in &mut face.corners {
                corner.vertex += vertex_offset;
            }
            face
        }));
    }
}

/// Create a planar grid of quads in the XY plane.
///
/// The grid has `columns * rows` faces and `(columns + 1) * (rows + 1)`
/// vertices. Face `row * columns + column` covers the unit square whose
/// lower-left corner is `(column, row)`. Every corner gets `color`.
///
/// # Example
///
/// ```
/// use mesh_types::{quad_grid, Color};
///
/// let grid = quad_grid(2, 2, Color::WHITE);
/// assert_eq!(grid.face_count(), 4);
/// assert_eq!(grid.vertex_count(), 9);
/// ```
///
/// # Panics
///
/// Panics if the grid needs more than `u32::MAX` vertices, since vertex
/// indices are `u32`.
#[must_use]
pub fn quad_grid(columns: u32, rows: u32, color: Color) -> PolyMesh {
    let vertex_count = (u64::from(columns) + 1) * (u64::from(rows) + 1);
    assert!(
        vertex_count <= u64::from(u32::MAX),
        "quad_grid: {columns}x{rows} needs {vertex_count} vertices, more than u32 indices can address"
    );

    // Every index below is bounded by the vertex count
    let stride = columns + 1;
    let mut mesh = PolyMesh::with_capacity(
        (stride * (rows + 1)) as usize,
        (columns * rows) as usize,
    );

    for y in 0..=rows {
        for x in 0..=columns {
            mesh.add_vertex(Vertex::from_coords(f64::from(x), f64::from(y), 0.0));
        }
    }

    for y in 0..rows {
        for x in 0..columns {
            let v0 = y * stride + x;
            let v1 = v0 + 1;
            let v2 = v1 + stride;
            let v3 = v0 + stride;
            mesh.add_face(Face::uniform(&[v0, v1, v2, v3], color));
        }
    }

    mesh
}
