//! Color sampling on faces.

// Corner counts are small; precision loss in the averages is irrelevant
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use mesh_types::{Color, Point3};

use crate::graph::MeshGraph;

/// Distances below this snap to the corner's own color.
const SNAP_DISTANCE: f64 = 1e-9;

/// Arithmetic mean of a face's corner colors.
///
/// Returns `None` if the face index is out of bounds.
///
/// # Example
///
/// ```
/// use mesh_paint::{MeshGraph, average_face_color};
/// use mesh_types::{quad_grid, Color};
///
/// let mut mesh = quad_grid(1, 1, Color::BLACK);
/// mesh.faces[0].corners[0].color = Color::WHITE;
/// mesh.faces[0].corners[1].color = Color::WHITE;
/// let graph = MeshGraph::build(&mesh).unwrap();
///
/// let avg = average_face_color(&graph, 0).unwrap();
/// assert!((avg.r - 0.5).abs() < 1e-6);
/// ```
#[must_use]
pub fn average_face_color(graph: &MeshGraph<'_>, face: u32) -> Option<Color> {
    let corners = graph.face_corners(face);
    if corners.is_empty() {
        return None;
    }

    let mut sum = [0.0f64; 4];
    for corner in corners {
        for (acc, c) in sum.iter_mut().zip(corner.color.to_array()) {
            *acc += f64::from(c);
        }
    }

    let n = corners.len() as f64;
    Some(Color::from_array(sum.map(|s| (s / n) as f32)))
}

/// Color at a point on a face, blended from its corners.
///
/// Corners are weighted by inverse distance to `point`, so the sample
/// approaches a corner's color as the point approaches that corner. A point
/// exactly on a corner returns that corner's color.
///
/// Returns `None` if the face index is out of bounds.
#[must_use]
pub fn sample_face_color(graph: &MeshGraph<'_>, face: u32, point: &Point3<f64>) -> Option<Color> {
    let corners = graph.face_corners(face);
    if corners.is_empty() {
        return None;
    }

    let mesh = graph.mesh();
    let mut sum = [0.0f64; 4];
    let mut total = 0.0f64;

    for corner in corners {
        let distance = mesh.vertex(corner.vertex)?.distance_to(point);
        if distance < SNAP_DISTANCE {
            return Some(corner.color);
        }

        let weight = 1.0 / distance;
        for (acc, c) in sum.iter_mut().zip(corner.color.to_array()) {
            *acc += f64::from(c) * weight;
        }
        total += weight;
    }

    Some(Color::from_array(sum.map(|s| (s / total) as f32)))
}
