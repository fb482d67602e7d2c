//! Error types for paint traversal operations.

use thiserror::Error;

/// Result type for paint operations.
pub type PaintResult<T> = Result<T, PaintError>;

/// Errors that can occur while building the adjacency graph or running a
/// fill/selection traversal.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum PaintError {
    /// A face references fewer than three distinct vertices.
    #[error("face {face} is degenerate ({distinct_vertices} distinct vertices, need at least 3)")]
    DegenerateFace {
        /// The degenerate face index.
        face: u32,
        /// Number of distinct vertices the face references.
        distinct_vertices: usize,
    },

    /// A face corner references a vertex that does not exist.
    #[error("face {face} references vertex {vertex} (mesh has {vertex_count} vertices)")]
    VertexOutOfBounds {
        /// The face holding the dangling corner.
        face: u32,
        /// The invalid vertex index.
        vertex: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A seed face is not present in the mesh.
    #[error("invalid seed face {face} (mesh has {face_count} faces)")]
    InvalidSeedFace {
        /// The invalid face index.
        face: u32,
        /// Total number of faces in the mesh.
        face_count: usize,
    },

    /// A selected vertex is not present in the mesh.
    #[error("invalid seed vertex {vertex} (mesh has {vertex_count} vertices)")]
    InvalidSeedVertex {
        /// The invalid vertex index.
        vertex: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A color tolerance is negative or not finite.
    #[error("invalid color tolerance {epsilon} (must be finite and >= 0)")]
    InvalidTolerance {
        /// The rejected epsilon.
        epsilon: f32,
    },
}

impl PaintError {
    /// Check if this error reports a structurally invalid input mesh.
    #[must_use]
    pub const fn is_malformed_mesh(&self) -> bool {
        matches!(
            self,
            Self::DegenerateFace { .. } | Self::VertexOutOfBounds { .. }
        )
    }

    /// Check if this error reports a seed id missing from the mesh.
    #[must_use]
    pub const fn is_invalid_seed(&self) -> bool {
        matches!(
            self,
            Self::InvalidSeedFace { .. } | Self::InvalidSeedVertex { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        let degenerate = PaintError::DegenerateFace {
            face: 3,
            distinct_vertices: 2,
        };
        assert!(degenerate.is_malformed_mesh());
        assert!(!degenerate.is_invalid_seed());

        let seed = PaintError::InvalidSeedFace {
            face: 9,
            face_count: 4,
        };
        assert!(seed.is_invalid_seed());
        assert!(!seed.is_malformed_mesh());

        let tolerance = PaintError::InvalidTolerance { epsilon: -1.0 };
        assert!(!tolerance.is_invalid_seed());
        assert!(!tolerance.is_malformed_mesh());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = PaintError::VertexOutOfBounds {
            face: 1,
            vertex: 42,
            vertex_count: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("8 vertices"));
    }
}
