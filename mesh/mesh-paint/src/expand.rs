//! Selection expansion by vertex color.
//!
//! Grows a vertex (or face) selection either along the mesh, never crossing
//! a color discontinuity, or across the whole mesh by color alone.

// Face and vertex indices are u32 throughout the mesh family
#![allow(clippy::cast_possible_truncation)]

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{ColorTolerance, Palette};
use crate::error::{PaintError, PaintResult};
use crate::fill::{Connectivity, FillParams, flood_faces};
use crate::graph::MeshGraph;
use crate::sample::average_face_color;

/// How a selection grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExpandMode {
    /// Walk the mesh from each selected element, only stepping onto
    /// elements that share a color with it.
    #[default]
    LinkedByColor,

    /// Every element of the mesh carrying a color found in the selection,
    /// connected or not.
    SimilarByColor,
}

/// Expand a vertex selection by color.
///
/// # Arguments
///
/// * `graph` - Adjacency graph of the mesh snapshot
/// * `selection` - Currently selected vertices
/// * `mode` - Linked (adjacency-constrained) or similar (global scan)
/// * `tolerance` - Color equality policy
///
/// # Matching
///
/// A vertex's samples are the colors of every corner that references it.
/// In [`ExpandMode::LinkedByColor`], each selected vertex `s` walks the
/// vertex graph. It steps along an edge `(v, u)` only if some face carrying
/// that edge has a corner at `v` and a corner at `u` that match one of the
/// samples at `s` and each other. In
/// [`ExpandMode::SimilarByColor`], the samples of the whole selection form
/// one palette that is matched against every vertex.
///
/// The result always contains the original selection. An empty selection
/// yields an empty result.
///
/// # Errors
///
/// Returns [`PaintError::InvalidSeedVertex`] if a selected vertex is not
/// part of the mesh.
///
/// # Example
///
/// ```
/// use hashbrown::HashSet;
/// use mesh_paint::{ColorTolerance, ExpandMode, MeshGraph, expand_selection};
/// use mesh_types::{quad_grid, Color};
///
/// let mesh = quad_grid(2, 1, Color::RED);
/// let graph = MeshGraph::build(&mesh).unwrap();
///
/// let selection: HashSet<u32> = [0].into_iter().collect();
/// let grown = expand_selection(&graph, &selection, ExpandMode::LinkedByColor, &ColorTolerance::exact()).unwrap();
/// assert_eq!(grown.len(), 6);
/// ```
pub fn expand_selection(
    graph: &MeshGraph<'_>,
    selection: &HashSet<u32>,
    mode: ExpandMode,
    tolerance: &ColorTolerance,
) -> PaintResult<HashSet<u32>> {
    if selection.is_empty() {
        debug!("Empty selection, nothing to expand");
        return Ok(HashSet::new());
    }

    if let Some(&vertex) = selection.iter().find(|&&v| !graph.contains_vertex(v)) {
        return Err(PaintError::InvalidSeedVertex {
            vertex,
            vertex_count: graph.vertex_count(),
        });
    }

    let expanded = match mode {
        ExpandMode::LinkedByColor => linked_vertices(graph, selection, tolerance),
        ExpandMode::SimilarByColor => similar_vertices(graph, selection, tolerance),
    };

    info!(
        ?mode,
        selected = selection.len(),
        expanded = expanded.len(),
        "Expanded vertex selection"
    );

    Ok(expanded)
}

/// Expand a face selection by color.
///
/// Face colors are corner averages, as the color of a flat-shaded low-poly
/// face is read by the artist.
///
/// - [`ExpandMode::LinkedByColor`] floods from the selected faces through
///   shared vertices, entering a face only where its corner at the shared
///   vertex matches a selected face color (on both sides).
/// - [`ExpandMode::SimilarByColor`] returns every face whose average color
///   matches the average color of any selected face.
///
/// The result always contains the original selection.
///
/// # Errors
///
/// Returns [`PaintError::InvalidSeedFace`] if a selected face is not part of
/// the mesh.
pub fn expand_face_selection(
    graph: &MeshGraph<'_>,
    selection: &HashSet<u32>,
    mode: ExpandMode,
    tolerance: &ColorTolerance,
) -> PaintResult<HashSet<u32>> {
    if selection.is_empty() {
        return Ok(HashSet::new());
    }

    if let Some(&face) = selection.iter().find(|&&f| !graph.contains_face(f)) {
        return Err(PaintError::InvalidSeedFace {
            face,
            face_count: graph.face_count(),
        });
    }

    let palette: Palette = selection
        .iter()
        .filter_map(|&f| average_face_color(graph, f))
        .collect();

    let mut expanded = match mode {
        ExpandMode::LinkedByColor => {
            let params = FillParams::default()
                .with_tolerance(*tolerance)
                .with_connectivity(Connectivity::Vertex);
            let mut seeds: Vec<u32> = selection.iter().copied().collect();
            seeds.sort_unstable();
            flood_faces(graph, &seeds, &params, Some(&palette))
        }
        ExpandMode::SimilarByColor => (0..graph.face_count() as u32)
            .filter(|&f| {
                average_face_color(graph, f).is_some_and(|c| palette.matches(c, tolerance))
            })
            .collect(),
    };
    expanded.extend(selection.iter().copied());

    info!(
        ?mode,
        selected = selection.len(),
        palette = palette.len(),
        expanded = expanded.len(),
        "Expanded face selection"
    );

    Ok(expanded)
}

/// Every vertex referenced by a corner of the given faces.
///
/// Out-of-range face ids contribute nothing.
#[must_use]
pub fn vertices_from_faces(graph: &MeshGraph<'_>, faces: &HashSet<u32>) -> HashSet<u32> {
    faces.iter().flat_map(|&f| graph.face_vertices(f)).collect()
}

/// Faces whose every corner vertex is in `vertices`.
///
/// This is the usual vertex-to-face selection flush: a face counts as
/// selected once all of its vertices are.
#[must_use]
pub fn faces_from_vertices(graph: &MeshGraph<'_>, vertices: &HashSet<u32>) -> HashSet<u32> {
    let candidates: HashSet<u32> = vertices
        .iter()
        .flat_map(|&v| graph.faces_at_vertex(v).iter().copied())
        .collect();

    candidates
        .into_iter()
        .filter(|&f| graph.face_vertices(f).all(|v| vertices.contains(&v)))
        .collect()
}

/// Distinct colors sampled at a vertex.
fn vertex_palette(graph: &MeshGraph<'_>, vertex: u32) -> Palette {
    graph.colors_at_vertex(vertex).map(|(_, c)| c).collect()
}

/// Linked expansion: one breadth-first walk per distinct seed palette.
fn linked_vertices(
    graph: &MeshGraph<'_>,
    selection: &HashSet<u32>,
    tolerance: &ColorTolerance,
) -> HashSet<u32> {
    // Seeds with the same colors walk identically, so they share a frontier
    let mut groups: HashMap<Vec<[u32; 4]>, (Palette, Vec<u32>)> = HashMap::new();
    for &seed in selection {
        let palette = vertex_palette(graph, seed);
        let mut key: Vec<[u32; 4]> = palette.colors().iter().map(|c| c.to_bits()).collect();
        key.sort_unstable();
        groups
            .entry(key)
            .or_insert_with(|| (palette, Vec::new()))
            .1
            .push(seed);
    }

    let mut result: HashSet<u32> = selection.clone();

    for (palette, seeds) in groups.values() {
        let mut visited: HashSet<u32> = seeds.iter().copied().collect();
        let mut queue: VecDeque<u32> = seeds.iter().copied().collect();

        while let Some(current) = queue.pop_front() {
            for &neighbor in graph.vertex_neighbors(current) {
                if visited.contains(&neighbor) {
                    continue;
                }

                if steps_in_color(graph, current, neighbor, palette, tolerance) {
                    visited.insert(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        debug!(
            seeds = seeds.len(),
            palette = palette.len(),
            reached = visited.len(),
            "Linked color walk finished"
        );

        result.extend(visited);
    }

    result
}

/// Check if the walk may step along the edge `(from, to)`.
///
/// Some face carrying the edge must have matching corners at both ends.
fn steps_in_color(
    graph: &MeshGraph<'_>,
    from: u32,
    to: u32,
    palette: &Palette,
    tolerance: &ColorTolerance,
) -> bool {
    graph.faces_sharing_edge(from, to).iter().any(|&face| {
        let corners = graph.face_corners(face);
        corners.iter().filter(|a| a.vertex == from).any(|a| {
            corners
                .iter()
                .filter(|b| b.vertex == to)
                .any(|b| palette.matches_pair(a.color, b.color, tolerance))
        })
    })
}

/// Similar expansion: global scan against the selection's palette.
fn similar_vertices(
    graph: &MeshGraph<'_>,
    selection: &HashSet<u32>,
    tolerance: &ColorTolerance,
) -> HashSet<u32> {
    let palette: Palette = selection
        .iter()
        .flat_map(|&v| graph.colors_at_vertex(v).map(|(_, c)| c))
        .collect();

    let mut result: HashSet<u32> = (0..graph.vertex_count() as u32)
        .filter(|&v| {
            graph
                .colors_at_vertex(v)
                .any(|(_, c)| palette.matches(c, tolerance))
        })
        .collect();
    result.extend(selection.iter().copied());

    debug!(palette = palette.len(), matched = result.len(), "Similar color scan finished");

    result
}
