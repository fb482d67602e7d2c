//! Polygon mesh types for vertex painting.
//!
//! This crate provides the snapshot types handed to the paint tools:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`Corner`] - A face's reference to a vertex, carrying its own color
//! - [`Face`] - An ordered polygon of corners
//! - [`PolyMesh`] - Indexed vertices plus polygon faces
//! - [`Color`] - Canonical normalized RGBA color
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Editor add-ons and plugins
//!
//! # Per-Corner Colors
//!
//! Colors live on corners, not vertices. A vertex shared by a red face and a
//! blue face has one red corner and one blue corner. This is the standard
//! vertex-paint layout and is preserved by every type here.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Color, Face, PolyMesh, Vertex};
//!
//! let mut mesh = PolyMesh::new();
//! for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
//!     mesh.add_vertex(Vertex::from_coords(x, y, 0.0));
//! }
//! mesh.add_face(Face::uniform(&[0, 1, 2, 3], Color::RED));
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(mesh.corner_count(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod color;
mod face;
mod mesh;
mod vertex;

pub use color::Color;
pub use face::{Corner, Face};
pub use mesh::{PolyMesh, quad_grid};
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
