//! Polygon faces and their color-carrying corners.

use crate::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One corner of a face: a vertex reference plus that corner's color.
///
/// Two faces sharing a vertex each own a separate corner for it, so the
/// colors may differ.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Corner {
    /// Index of the referenced vertex.
    pub vertex: u32,
    /// Color sample owned by this corner.
    pub color: Color,
}

impl Corner {
    /// Create a corner.
    #[inline]
    #[must_use]
    pub const fn new(vertex: u32, color: Color) -> Self {
        Self { vertex, color }
    }
}

/// A polygon face as an ordered, cyclic sequence of corners.
///
/// Consecutive corners (and the last and first) form the face's edges.
/// Faces use counter-clockwise winding when viewed from outside, although
/// traversal never depends on orientation.
///
/// # Example
///
/// ```
/// use mesh_types::{Color, Face};
///
/// let quad = Face::uniform(&[0, 1, 2, 3], Color::RED);
/// assert_eq!(quad.len(), 4);
/// assert_eq!(quad.edges().count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// Corners in winding order.
    pub corners: Vec<Corner>,
}

impl Face {
    /// Create a face from corners.
    #[inline]
    #[must_use]
    pub const fn new(corners: Vec<Corner>) -> Self {
        Self { corners }
    }

    /// Create a face whose corners all carry the same color.
    #[must_use]
    pub fn uniform(vertices: &[u32], color: Color) -> Self {
        Self {
            corners: vertices.iter().map(|&v| Corner::new(v, color)).collect(),
        }
    }

    /// Create a face from `(vertex, color)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, Color)>) -> Self {
        Self {
            corners: pairs
                .into_iter()
                .map(|(vertex, color)| Corner::new(vertex, color))
                .collect(),
        }
    }

    /// Number of corners.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    /// Check if the face has no corners.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    /// Iterate over the referenced vertex indices in winding order.
    pub fn vertices(&self) -> impl Iterator<Item = u32> + '_ {
        self.corners.iter().map(|c| c.vertex)
    }

    /// Iterate over the corner colors in winding order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.corners.iter().map(|c| c.color)
    }

    /// Iterate over the face's edges as directed `(from, to)` vertex pairs.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.corners.len();
        (0..n).map(move |i| (self.corners[i].vertex, self.corners[(i + 1) % n].vertex))
    }

    /// Number of distinct vertices referenced by this face.
    #[must_use]
    pub fn distinct_vertex_count(&self) -> usize {
        let mut vertices: Vec<u32> = self.vertices().collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn uniform_face_colors() {
        let face = Face::uniform(&[4, 5, 6], Color::GREEN);
        assert!(face.colors().all(|c| c == Color::GREEN));
        assert_eq!(face.vertices().collect::<Vec<_>>(), vec![4, 5, 6]);
    }

    #[test]
    fn edges_wrap_around() {
        let face = Face::uniform(&[0, 1, 2, 3], Color::WHITE);
        let edges: Vec<_> = face.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    }

    #[test]
    fn distinct_vertices_ignores_repeats() {
        let face = Face::uniform(&[0, 1, 1, 0], Color::WHITE);
        assert_eq!(face.len(), 4);
        assert_eq!(face.distinct_vertex_count(), 2);
    }

    #[test]
    fn from_pairs_keeps_per_corner_colors() {
        let face = Face::from_pairs([(0, Color::RED), (1, Color::GREEN), (2, Color::BLUE)]);
        assert_eq!(face.corners[1], Corner::new(1, Color::GREEN));
    }

    #[test]
    fn empty_face_has_no_edges() {
        let face = Face::default();
        assert!(face.is_empty());
        assert_eq!(face.edges().count(), 0);
    }
}
