//! Mesh adjacency graph.
//!
//! Provides face-to-face and vertex-to-vertex adjacency plus per-corner
//! color lookup over a borrowed [`PolyMesh`] snapshot.

// Face and vertex indices are u32 throughout the mesh family
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use mesh_types::{Color, Corner, PolyMesh};
use tracing::debug;

use crate::error::{PaintError, PaintResult};

/// Reference to one corner of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CornerRef {
    /// Face index.
    pub face: u32,
    /// Position of the corner within the face.
    pub corner: u32,
}

impl CornerRef {
    /// Create a corner reference.
    #[must_use]
    pub const fn new(face: u32, corner: u32) -> Self {
        Self { face, corner }
    }
}

/// Read-only adjacency view over a mesh snapshot.
///
/// Two faces are adjacent if they share an edge (two consecutive corner
/// vertices). Edges shared by more than two faces (non-manifold) make every
/// one of those faces adjacent to every other. Two vertices are neighbors if
/// some face has them as consecutive corners.
///
/// The graph borrows the mesh and never mutates it. Build one per tool
/// invocation and drop it afterwards; it does not track later edits.
///
/// # Example
///
/// ```
/// use mesh_paint::MeshGraph;
/// use mesh_types::{quad_grid, Color};
///
/// let mesh = quad_grid(2, 1, Color::WHITE);
/// let graph = MeshGraph::build(&mesh).unwrap();
///
/// assert_eq!(graph.faces_adjacent_to(0), &[1]);
/// assert_eq!(graph.vertex_neighbors(0), &[1, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct MeshGraph<'m> {
    mesh: &'m PolyMesh,
    /// Faces containing each undirected edge, keyed by `(min, max)`.
    edge_faces: HashMap<(u32, u32), Vec<u32>>,
    /// For each face, the sorted list of edge-adjacent faces.
    face_adjacency: Vec<Vec<u32>>,
    /// For each vertex, the sorted list of edge-connected vertices.
    vertex_adjacency: Vec<Vec<u32>>,
    /// For each vertex, every corner that references it.
    vertex_corners: Vec<Vec<CornerRef>>,
    /// For each vertex, the sorted list of incident faces.
    vertex_faces: Vec<Vec<u32>>,
}

impl<'m> MeshGraph<'m> {
    /// Build the adjacency graph for a mesh.
    ///
    /// Runs in O(V + E + F) apart from non-manifold edges, whose `k` faces
    /// produce `k * (k - 1) / 2` adjacency pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A face references fewer than 3 distinct vertices
    /// - A corner references a vertex index outside the mesh
    pub fn build(mesh: &'m PolyMesh) -> PaintResult<Self> {
        let vertex_count = mesh.vertices.len();

        validate_faces(mesh)?;

        let mut edge_faces: HashMap<(u32, u32), Vec<u32>> = HashMap::new();
        let mut vertex_corners: Vec<Vec<CornerRef>> = vec![Vec::new(); vertex_count];
        let mut vertex_faces: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];

        // Single pass over corners: edge index and vertex-corner index
        for (face_idx, face) in mesh.faces.iter().enumerate() {
            let face_idx = face_idx as u32;

            for (corner_idx, corner) in face.corners.iter().enumerate() {
                let v = corner.vertex as usize;
                vertex_corners[v].push(CornerRef::new(face_idx, corner_idx as u32));
                vertex_faces[v].push(face_idx);
            }

            for (v0, v1) in face.edges() {
                // Repeated consecutive vertices form no edge
                if v0 == v1 {
                    continue;
                }
                edge_faces
                    .entry(normalize_edge(v0, v1))
                    .or_default()
                    .push(face_idx);
            }
        }

        let mut face_adjacency: Vec<Vec<u32>> = vec![Vec::new(); mesh.faces.len()];
        let mut vertex_adjacency: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        let mut non_manifold = 0usize;

        for (&(a, b), faces) in &mut edge_faces {
            faces.sort_unstable();
            faces.dedup();

            vertex_adjacency[a as usize].push(b);
            vertex_adjacency[b as usize].push(a);

            if faces.len() > 2 {
                non_manifold += 1;
            }

            for (i, &f0) in faces.iter().enumerate() {
                for &f1 in &faces[i + 1..] {
                    face_adjacency[f0 as usize].push(f1);
                    face_adjacency[f1 as usize].push(f0);
                }
            }
        }

        for list in face_adjacency
            .iter_mut()
            .chain(vertex_adjacency.iter_mut())
            .chain(vertex_faces.iter_mut())
        {
            list.sort_unstable();
            list.dedup();
        }

        debug!(
            vertices = vertex_count,
            faces = mesh.faces.len(),
            edges = edge_faces.len(),
            non_manifold_edges = non_manifold,
            "Built mesh adjacency graph"
        );

        Ok(Self {
            mesh,
            edge_faces,
            face_adjacency,
            vertex_adjacency,
            vertex_corners,
            vertex_faces,
        })
    }

    /// The mesh snapshot this graph was built from.
    #[must_use]
    pub const fn mesh(&self) -> &'m PolyMesh {
        self.mesh
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.face_adjacency.len()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_adjacency.len()
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    /// Number of edges shared by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|f| f.len() > 2).count()
    }

    /// Check if a face id exists.
    #[must_use]
    pub fn contains_face(&self, face: u32) -> bool {
        (face as usize) < self.face_adjacency.len()
    }

    /// Check if a vertex id exists.
    #[must_use]
    pub fn contains_vertex(&self, vertex: u32) -> bool {
        (vertex as usize) < self.vertex_adjacency.len()
    }

    /// Faces sharing at least one edge with `face`.
    ///
    /// Sorted, without duplicates, never containing `face` itself. Returns
    /// an empty slice if the face index is out of bounds.
    #[must_use]
    pub fn faces_adjacent_to(&self, face: u32) -> &[u32] {
        self.face_adjacency
            .get(face as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Vertices sharing an edge with `vertex`.
    ///
    /// Sorted, without duplicates. Returns an empty slice if the vertex index
    /// is out of bounds.
    #[must_use]
    pub fn vertex_neighbors(&self, vertex: u32) -> &[u32] {
        self.vertex_adjacency
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Faces that have a corner at `vertex`, sorted.
    #[must_use]
    pub fn faces_at_vertex(&self, vertex: u32) -> &[u32] {
        self.vertex_faces
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Every corner that references `vertex`.
    #[must_use]
    pub fn corners_at_vertex(&self, vertex: u32) -> &[CornerRef] {
        self.vertex_corners
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Faces containing the undirected edge `(a, b)`, sorted.
    ///
    /// Returns an empty slice if no face has `a` and `b` as consecutive
    /// corners.
    #[must_use]
    pub fn faces_sharing_edge(&self, a: u32, b: u32) -> &[u32] {
        self.edge_faces
            .get(&normalize_edge(a, b))
            .map_or(&[], Vec::as_slice)
    }

    /// Color of one face corner.
    ///
    /// Returns `None` if the face or corner index is out of bounds.
    #[must_use]
    pub fn corner_color(&self, face: u32, corner: u32) -> Option<Color> {
        self.face_corners(face)
            .get(corner as usize)
            .map(|c| c.color)
    }

    /// Every color sample at `vertex` as `(face, color)` pairs.
    ///
    /// This is a multiset: a vertex shared by several faces yields one
    /// sample per referencing corner, and equal colors are repeated.
    pub fn colors_at_vertex(&self, vertex: u32) -> impl Iterator<Item = (u32, Color)> + '_ {
        self.corners_at_vertex(vertex)
            .iter()
            .filter_map(|r| Some((r.face, self.corner_color(r.face, r.corner)?)))
    }

    /// Corners of a face in winding order.
    ///
    /// Returns an empty slice if the face index is out of bounds.
    #[must_use]
    pub fn face_corners(&self, face: u32) -> &'m [Corner] {
        let mesh: &'m PolyMesh = self.mesh;
        mesh.faces
            .get(face as usize)
            .map_or(&[], |f| f.corners.as_slice())
    }

    /// Vertices of a face in winding order.
    pub fn face_vertices(&self, face: u32) -> impl Iterator<Item = u32> + 'm {
        self.face_corners(face).iter().map(|c| c.vertex)
    }

    /// Vertices referenced by both faces, sorted.
    #[must_use]
    pub fn shared_vertices(&self, face_a: u32, face_b: u32) -> Vec<u32> {
        let b: Vec<u32> = self.face_vertices(face_b).collect();
        let mut shared: Vec<u32> = self
            .face_vertices(face_a)
            .filter(|v| b.contains(v))
            .collect();
        shared.sort_unstable();
        shared.dedup();
        shared
    }
}

/// Check the structural invariants every face must satisfy.
fn validate_faces(mesh: &PolyMesh) -> PaintResult<()> {
    let vertex_count = mesh.vertices.len();

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        let face_idx = face_idx as u32;

        if let Some(corner) = face
            .corners
            .iter()
            .find(|c| c.vertex as usize >= vertex_count)
        {
            return Err(PaintError::VertexOutOfBounds {
                face: face_idx,
                vertex: corner.vertex,
                vertex_count,
            });
        }

        let distinct = face.distinct_vertex_count();
        if distinct < 3 {
            return Err(PaintError::DegenerateFace {
                face: face_idx,
                distinct_vertices: distinct,
            });
        }
    }

    Ok(())
}

/// Normalize an edge so the smaller vertex index comes first.
fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}
