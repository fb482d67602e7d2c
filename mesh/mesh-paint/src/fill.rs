//! Fill region resolution.
//!
//! Computes which faces (and which of their corners) a fill stroke should
//! recolor, starting from the face under the cursor.

// Face and corner indices are u32 throughout the mesh family
#![allow(clippy::cast_possible_truncation)]

use std::collections::VecDeque;

use hashbrown::HashSet;
use mesh_types::Color;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{ColorTolerance, Palette};
use crate::error::{PaintError, PaintResult};
use crate::graph::{CornerRef, MeshGraph};
use crate::sample::average_face_color;

/// Selection scope of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FillMode {
    /// Only the seed face.
    Single,

    /// Every face connected to the seed, regardless of color.
    Linked,

    /// Connected faces whose color matches the seed, stopping at color
    /// boundaries.
    #[default]
    LinkedSameColor,
}

/// How faces connect during a linked fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Connectivity {
    /// Faces connect through shared edges.
    #[default]
    Edge,

    /// Faces connect through any shared vertex, so the fill also crosses
    /// faces that only touch at a corner.
    Vertex,
}

/// Parameters for fill resolution.
///
/// The defaults (exact colors, edge connectivity, no masks, seed-face
/// reference color) describe the plain fill tool.
#[derive(Debug, Clone, Default)]
pub struct FillParams {
    /// Tolerance for color matching. Default: exact.
    pub tolerance: ColorTolerance,

    /// Face connectivity used by linked modes. Default: edge.
    pub connectivity: Connectivity,

    /// Faces the fill may touch (the host's paint mask).
    /// None means every face is paintable.
    pub face_mask: Option<HashSet<u32>>,

    /// Vertices whose corners may be recolored (the host's vertex mask).
    /// Traversal ignores it; it only filters the returned corners.
    /// None means every corner is writable.
    pub vertex_mask: Option<HashSet<u32>>,

    /// Color to match instead of the seed face's color,
    /// e.g. a color picked under the cursor.
    /// None means the seed face's average color is the reference.
    pub reference_color: Option<Color>,
}

impl FillParams {
    /// Create params with a specific color tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: ColorTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the face connectivity.
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Restrict the fill to a set of faces.
    #[must_use]
    pub fn with_face_mask(mut self, faces: impl IntoIterator<Item = u32>) -> Self {
        self.face_mask = Some(faces.into_iter().collect());
        self
    }

    /// Restrict the written corners to those on a set of vertices.
    #[must_use]
    pub fn with_vertex_mask(mut self, vertices: impl IntoIterator<Item = u32>) -> Self {
        self.vertex_mask = Some(vertices.into_iter().collect());
        self
    }

    /// Match against a specific color instead of the seed face's color.
    #[must_use]
    pub fn with_reference_color(mut self, color: Color) -> Self {
        self.reference_color = Some(color);
        self
    }

    /// Check if the mask (if any) allows painting a face.
    #[must_use]
    pub fn allows(&self, face: u32) -> bool {
        self.face_mask.as_ref().is_none_or(|mask| mask.contains(&face))
    }

    /// Check if the vertex mask (if any) allows writing corners on a vertex.
    #[must_use]
    pub fn allows_vertex(&self, vertex: u32) -> bool {
        self.vertex_mask
            .as_ref()
            .is_none_or(|mask| mask.contains(&vertex))
    }
}

/// Faces and corners selected by a fill, plus the color to apply.
///
/// The face set is the contract; enumeration order carries no meaning.
/// Faces are the ones the fill reached. Corners are the write set, which
/// can be smaller: only matching corners in same-color modes, and only
/// corners on vertices the vertex mask allows.
///
/// The resolver never writes colors: applying [`FillRegion::fill_color`] to
/// [`FillRegion::corners`] is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct FillRegion {
    faces: HashSet<u32>,
    corners: HashSet<CornerRef>,
    fill_color: Color,
}

impl FillRegion {
    fn empty(fill_color: Color) -> Self {
        Self {
            faces: HashSet::new(),
            corners: HashSet::new(),
            fill_color,
        }
    }

    /// Faces the fill reached.
    #[must_use]
    pub fn faces(&self) -> &HashSet<u32> {
        &self.faces
    }

    /// Corners to recolor.
    #[must_use]
    pub fn corners(&self) -> &HashSet<CornerRef> {
        &self.corners
    }

    /// The color the caller should write.
    #[must_use]
    pub const fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Check if a face is part of the region.
    #[must_use]
    pub fn contains(&self, face: u32) -> bool {
        self.faces.contains(&face)
    }

    /// Number of faces in the region.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Check if the region has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Face ids in ascending order.
    #[must_use]
    pub fn sorted_faces(&self) -> Vec<u32> {
        let mut faces: Vec<u32> = self.faces.iter().copied().collect();
        faces.sort_unstable();
        faces
    }

    /// Consume the region, keeping only the face set.
    #[must_use]
    pub fn into_faces(self) -> HashSet<u32> {
        self.faces
    }
}

/// Resolve the faces a fill affects.
///
/// # Arguments
///
/// * `graph` - Adjacency graph of the mesh snapshot
/// * `seed` - Face under the cursor
/// * `mode` - Selection scope
/// * `fill_color` - Color to apply; carried through, never used for matching
/// * `params` - Tolerance, connectivity, masks and reference color
///
/// # Matching Policy
///
/// [`FillMode::LinkedSameColor`] matches one reference color:
/// [`FillParams::reference_color`] if set, otherwise the seed face's
/// average color. A neighbor `n` of a filled face `f` is entered when, at
/// some vertex shared by `f` and `n`, a corner of `f` and a corner of `n`
/// both match the reference and each other. Only the matching corners are
/// returned; the seed face is always included, even when none of its
/// corners match.
///
/// # Errors
///
/// Returns [`PaintError::InvalidSeedFace`] if `seed` is not a face of the
/// mesh.
///
/// # Example
///
/// ```
/// use mesh_paint::{FillMode, FillParams, MeshGraph, resolve_fill};
/// use mesh_types::{quad_grid, Color};
///
/// let mut mesh = quad_grid(3, 1, Color::RED);
/// for corner in &mut mesh.faces[2].corners {
///     corner.color = Color::BLUE;
/// }
/// let graph = MeshGraph::build(&mesh).unwrap();
///
/// let region = resolve_fill(&graph, 0, FillMode::LinkedSameColor, Color::GREEN, &FillParams::default()).unwrap();
/// assert_eq!(region.sorted_faces(), vec![0, 1]);
///
/// let region = resolve_fill(&graph, 0, FillMode::Linked, Color::GREEN, &FillParams::default()).unwrap();
/// assert_eq!(region.len(), 3);
/// ```
pub fn resolve_fill(
    graph: &MeshGraph<'_>,
    seed: u32,
    mode: FillMode,
    fill_color: Color,
    params: &FillParams,
) -> PaintResult<FillRegion> {
    validate_seed(graph, seed)?;

    if !params.allows(seed) {
        debug!(seed, "Seed face is outside the paint mask");
        return Ok(FillRegion::empty(fill_color));
    }

    let region = match mode {
        FillMode::Single => {
            let mut region = FillRegion::empty(fill_color);
            region.faces.insert(seed);
            region
                .corners
                .extend(writable_corners(graph, seed, params, None));
            region
        }
        FillMode::Linked => flood(graph, seed, fill_color, params, None),
        FillMode::LinkedSameColor => {
            let palette = reference_palette(graph, seed, params);
            flood(graph, seed, fill_color, params, Some(&palette))
        }
    };

    info!(
        ?mode,
        seed,
        faces = region.faces.len(),
        corners = region.corners.len(),
        "Resolved fill region"
    );

    Ok(region)
}

/// Resolve a non-contiguous fill: every corner of the mesh whose color
/// matches the reference, wherever it is.
///
/// The reference is [`FillParams::reference_color`] if set, otherwise the
/// seed face's average color. Both masks are honored; connectivity is
/// ignored.
///
/// # Errors
///
/// Returns [`PaintError::InvalidSeedFace`] if `seed` is not a face of the
/// mesh.
pub fn resolve_matching_fill(
    graph: &MeshGraph<'_>,
    seed: u32,
    fill_color: Color,
    params: &FillParams,
) -> PaintResult<FillRegion> {
    validate_seed(graph, seed)?;

    let palette = reference_palette(graph, seed, params);
    let mut region = FillRegion::empty(fill_color);

    for face in 0..graph.face_count() as u32 {
        if !params.allows(face) {
            continue;
        }
        let before = region.corners.len();
        region
            .corners
            .extend(writable_corners(graph, face, params, Some(&palette)));
        if region.corners.len() > before {
            region.faces.insert(face);
        }
    }

    info!(
        seed,
        faces = region.faces.len(),
        corners = region.corners.len(),
        "Resolved matching fill"
    );

    Ok(region)
}

fn validate_seed(graph: &MeshGraph<'_>, seed: u32) -> PaintResult<()> {
    if graph.contains_face(seed) {
        Ok(())
    } else {
        Err(PaintError::InvalidSeedFace {
            face: seed,
            face_count: graph.face_count(),
        })
    }
}

/// The single color a same-color fill matches against.
fn reference_palette(graph: &MeshGraph<'_>, seed: u32, params: &FillParams) -> Palette {
    params
        .reference_color
        .or_else(|| average_face_color(graph, seed))
        .into_iter()
        .collect()
}

/// Corners of `face` the caller may write: on an allowed vertex, and
/// matching the palette when there is one.
fn writable_corners<'a>(
    graph: &'a MeshGraph<'_>,
    face: u32,
    params: &'a FillParams,
    palette: Option<&'a Palette>,
) -> impl Iterator<Item = CornerRef> + 'a {
    graph
        .face_corners(face)
        .iter()
        .enumerate()
        .filter(move |(_, corner)| {
            params.allows_vertex(corner.vertex)
                && palette.is_none_or(|p| p.matches(corner.color, &params.tolerance))
        })
        .map(move |(i, _)| CornerRef::new(face, i as u32))
}

/// Breadth-first fill from `seed`, optionally gated by a palette.
fn flood(
    graph: &MeshGraph<'_>,
    seed: u32,
    fill_color: Color,
    params: &FillParams,
    palette: Option<&Palette>,
) -> FillRegion {
    let visited = flood_faces(graph, &[seed], params, palette);

    let mut region = FillRegion::empty(fill_color);
    for &face in &visited {
        region
            .corners
            .extend(writable_corners(graph, face, params, palette));
    }
    region.faces = visited;

    region
}

/// Breadth-first traversal over faces from several seeds.
///
/// Seeds outside the mask are dropped. With a palette, a step from one face
/// to the next must pass [`crosses_in_color`].
pub(crate) fn flood_faces(
    graph: &MeshGraph<'_>,
    seeds: &[u32],
    params: &FillParams,
    palette: Option<&Palette>,
) -> HashSet<u32> {
    let mut visited: HashSet<u32> = HashSet::new();
    let mut queue: VecDeque<u32> = VecDeque::new();

    for &seed in seeds {
        if graph.contains_face(seed) && params.allows(seed) && visited.insert(seed) {
            queue.push_back(seed);
        }
    }

    while let Some(current) = queue.pop_front() {
        for neighbor in neighbor_faces(graph, current, params.connectivity) {
            if visited.contains(&neighbor) || !params.allows(neighbor) {
                continue;
            }

            if let Some(palette) = palette
                && !crosses_in_color(graph, current, neighbor, palette, &params.tolerance)
            {
                continue;
            }

            visited.insert(neighbor);
            queue.push_back(neighbor);
        }
    }

    debug!(
        seeds = seeds.len(),
        faces = visited.len(),
        gated = palette.is_some(),
        "Flood fill finished"
    );

    visited
}

/// Faces reachable from `face` in one step.
fn neighbor_faces(graph: &MeshGraph<'_>, face: u32, connectivity: Connectivity) -> Vec<u32> {
    match connectivity {
        Connectivity::Edge => graph.faces_adjacent_to(face).to_vec(),
        Connectivity::Vertex => {
            let mut faces: Vec<u32> = graph
                .face_vertices(face)
                .flat_map(|v| graph.faces_at_vertex(v).iter().copied())
                .filter(|&f| f != face)
                .collect();
            faces.sort_unstable();
            faces.dedup();
            faces
        }
    }
}

/// Check if the fill may cross from `from` into `to`.
///
/// At some shared vertex, a corner of `from` and a corner of `to` must match
/// the palette and each other.
fn crosses_in_color(
    graph: &MeshGraph<'_>,
    from: u32,
    to: u32,
    palette: &Palette,
    tolerance: &ColorTolerance,
) -> bool {
    let from_corners = graph.face_corners(from);
    let to_corners = graph.face_corners(to);

    graph.shared_vertices(from, to).into_iter().any(|v| {
        from_corners
            .iter()
            .filter(|a| a.vertex == v)
            .any(|a| {
                to_corners
                    .iter()
                    .filter(|b| b.vertex == v)
                    .any(|b| palette.matches_pair(a.color, b.color, tolerance))
            })
    })
}
