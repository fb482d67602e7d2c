//! Mesh traversal for vertex-color painting tools.
//!
//! This crate computes which mesh elements a paint or selection tool should
//! touch. It never writes colors or selection state itself; callers apply
//! the returned sets.
//!
//! - [`MeshGraph`] - Face and vertex adjacency over a mesh snapshot
//! - [`resolve_fill`] - Faces and corners a fill stroke recolors
//! - [`expand_selection`] - Grow a vertex selection by color
//! - [`ColorTolerance`] - The single color equality policy
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. The host editor
//! builds a graph per tool invocation, calls one resolver, and drops the
//! graph.
//!
//! # Quick Start
//!
//! ```
//! use mesh_paint::{FillMode, FillParams, MeshGraph, resolve_fill};
//! use mesh_types::{quad_grid, Color};
//!
//! // Two red quads next to two blue quads
//! let mut mesh = quad_grid(4, 1, Color::RED);
//! for face in &mut mesh.faces[2..] {
//!     for corner in &mut face.corners {
//!         corner.color = Color::BLUE;
//!     }
//! }
//!
//! let graph = MeshGraph::build(&mesh).unwrap();
//! let region = resolve_fill(
//!     &graph,
//!     0,
//!     FillMode::LinkedSameColor,
//!     Color::GREEN,
//!     &FillParams::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(region.sorted_faces(), vec![0, 1]);
//!
//! // Apply the stroke
//! for corner in region.corners() {
//!     mesh.faces[corner.face as usize].corners[corner.corner as usize].color = region.fill_color();
//! }
//! ```
//!
//! # Selection Expansion
//!
//! ```
//! use mesh_paint::{ColorTolerance, ExpandMode, HashSet, MeshGraph, expand_selection};
//! use mesh_types::{quad_grid, Color};
//!
//! let mut mesh = quad_grid(1, 1, Color::RED);
//! mesh.merge(&quad_grid(1, 1, Color::RED));
//! let graph = MeshGraph::build(&mesh).unwrap();
//!
//! let selection: HashSet<u32> = [0].into_iter().collect();
//! let tolerance = ColorTolerance::exact();
//!
//! // Linked stays on the first quad
//! let linked = expand_selection(&graph, &selection, ExpandMode::LinkedByColor, &tolerance).unwrap();
//! assert_eq!(linked.len(), 4);
//!
//! // Similar finds the disconnected one too
//! let similar = expand_selection(&graph, &selection, ExpandMode::SimilarByColor, &tolerance).unwrap();
//! assert_eq!(similar.len(), 8);
//! ```
//!
//! # Colors
//!
//! Colors are compared as normalized floats. Hosts that store bytes or a
//! different color space should convert with [`Color::from_bytes`] and pick
//! [`ColorTolerance::quantized`] to absorb the rounding.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod color;
mod error;
mod expand;
mod fill;
mod graph;
mod sample;

pub use color::{ColorMetric, ColorTolerance, Palette, same_color};
pub use error::{PaintError, PaintResult};
pub use expand::{
    ExpandMode, expand_face_selection, expand_selection, faces_from_vertices, vertices_from_faces,
};
pub use fill::{
    Connectivity, FillMode, FillParams, FillRegion, resolve_fill, resolve_matching_fill,
};
pub use graph::{CornerRef, MeshGraph};
pub use sample::{average_face_color, sample_face_color};

// Re-export the snapshot types and the set type used in the API
pub use hashbrown::HashSet;
pub use mesh_types::{Color, Corner, Face, PolyMesh, Vertex};
