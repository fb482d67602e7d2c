//! Property-based tests for fill and selection traversal.
//!
//! These tests use proptest to generate random colored meshes and verify
//! traversal invariants.
//!
//! Run with: cargo test -p mesh-paint -- proptest

use mesh_paint::{
    ColorTolerance, ExpandMode, FillMode, FillParams, HashSet, MeshGraph, expand_selection,
    faces_from_vertices, resolve_fill, resolve_matching_fill, vertices_from_faces,
};
use mesh_types::{Color, Corner, Face, PolyMesh, Vertex, quad_grid};
use proptest::prelude::*;

const PALETTE: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

// =============================================================================
// Strategies for generating random meshes
// =============================================================================

/// Paint every corner of a face one color.
fn paint_face(mesh: &mut PolyMesh, face: usize, color: Color) {
    for corner in &mut mesh.faces[face].corners {
        corner.color = color;
    }
}

/// A connected quad grid with a random palette color per face.
fn arb_colored_grid(max_side: u32) -> impl Strategy<Value = PolyMesh> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(columns, rows)| {
        let count = (columns * rows) as usize;
        prop::collection::vec(0..PALETTE.len(), count).prop_map(move |colors| {
            let mut mesh = quad_grid(columns, rows, Color::WHITE);
            for (face, &c) in colors.iter().enumerate() {
                paint_face(&mut mesh, face, PALETTE[c]);
            }
            mesh
        })
    })
}

/// A connected quad grid with a random palette color per corner, so faces
/// carry seams and neighbors can disagree at a shared vertex.
fn arb_corner_colored_grid(max_side: u32) -> impl Strategy<Value = PolyMesh> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(columns, rows)| {
        let count = (columns * rows * 4) as usize;
        prop::collection::vec(0..PALETTE.len(), count).prop_map(move |colors| {
            let mut mesh = quad_grid(columns, rows, Color::WHITE);
            let corners = mesh.faces.iter_mut().flat_map(|f| f.corners.iter_mut());
            for (corner, &c) in corners.zip(&colors) {
                corner.color = PALETTE[c];
            }
            mesh
        })
    })
}

/// Several disconnected grids, each painted a single palette color.
fn arb_uniform_components() -> impl Strategy<Value = PolyMesh> {
    prop::collection::vec((1..4u32, 1..4u32, 0..PALETTE.len()), 1..5).prop_map(|parts| {
        let mut mesh = PolyMesh::new();
        for (columns, rows, c) in parts {
            mesh.merge(&quad_grid(columns, rows, PALETTE[c]));
        }
        mesh
    })
}

/// Arbitrary polygons over a small vertex pool, possibly malformed.
fn arb_polygon_soup() -> impl Strategy<Value = PolyMesh> {
    (1..12u32).prop_flat_map(|num_vertices| {
        // Indices may run one past the end to exercise the bounds check
        let face = prop::collection::vec(0..=num_vertices, 2..6);
        prop::collection::vec(face, 0..20).prop_map(move |faces| {
            let mut mesh = PolyMesh::new();
            for i in 0..num_vertices {
                mesh.add_vertex(Vertex::from_coords(f64::from(i), 0.0, 0.0));
            }
            for vertices in faces {
                mesh.add_face(Face::new(
                    vertices.into_iter().map(|v| Corner::new(v, Color::WHITE)).collect(),
                ));
            }
            mesh
        })
    })
}

fn exact() -> FillParams {
    FillParams::default()
}

/// Check if faces `a` and `b` both carry `color` on a vertex they share.
fn faces_meet_in(graph: &MeshGraph<'_>, a: u32, b: u32, color: Color) -> bool {
    graph.shared_vertices(a, b).into_iter().any(|v| {
        let has = |face: u32| {
            graph
                .face_corners(face)
                .iter()
                .any(|c| c.vertex == v && c.color == color)
        };
        has(a) && has(b)
    })
}

/// Check if some face carrying edge `(a, b)` has equal corner colors at
/// both ends, drawn from `colors`.
fn edge_in_colors(graph: &MeshGraph<'_>, a: u32, b: u32, colors: &[Color]) -> bool {
    graph.faces_sharing_edge(a, b).iter().any(|&face| {
        let corners = graph.face_corners(face);
        corners.iter().filter(|x| x.vertex == a).any(|x| {
            colors.contains(&x.color)
                && corners
                    .iter()
                    .any(|y| y.vertex == b && y.color == x.color)
        })
    })
}

fn fill(graph: &MeshGraph<'_>, seed: u32, mode: FillMode) -> HashSet<u32> {
    resolve_fill(graph, seed, mode, Color::BLACK, &exact())
        .expect("seed is in range")
        .into_faces()
}

// =============================================================================
// Property Tests: Graph Construction
// =============================================================================

proptest! {
    /// Building never panics; it either succeeds or reports a malformed mesh.
    #[test]
    fn build_never_panics(mesh in arb_polygon_soup()) {
        match MeshGraph::build(&mesh) {
            Ok(graph) => {
                prop_assert_eq!(graph.face_count(), mesh.faces.len());
            }
            Err(err) => {
                prop_assert!(err.is_malformed_mesh());
            }
        }
    }

    /// Face adjacency is symmetric and never reflexive.
    #[test]
    fn face_adjacency_is_symmetric(mesh in arb_colored_grid(6)) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");

        for face in 0..graph.face_count() as u32 {
            prop_assert!(!graph.faces_adjacent_to(face).contains(&face));
            for &other in graph.faces_adjacent_to(face) {
                prop_assert!(graph.faces_adjacent_to(other).contains(&face));
            }
        }
    }
}

// =============================================================================
// Property Tests: Fill Resolution
// =============================================================================

proptest! {
    /// Single mode returns exactly the seed.
    #[test]
    fn single_is_seed_only(mesh in arb_colored_grid(6), seed in any::<prop::sample::Index>()) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let seed = seed.index(graph.face_count()) as u32;

        let faces = fill(&graph, seed, FillMode::Single);
        prop_assert_eq!(faces.len(), 1);
        prop_assert!(faces.contains(&seed));
    }

    /// A grid is one component, so linked fill reaches every face.
    #[test]
    fn linked_covers_connected_grid(mesh in arb_colored_grid(6), seed in any::<prop::sample::Index>()) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let seed = seed.index(graph.face_count()) as u32;

        prop_assert_eq!(fill(&graph, seed, FillMode::Linked).len(), graph.face_count());
    }

    /// Same-color fill stays inside linked fill and on the seed's color.
    #[test]
    fn same_color_is_within_linked(mesh in arb_colored_grid(6), seed in any::<prop::sample::Index>()) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let seed = seed.index(graph.face_count()) as u32;
        let seed_color = mesh.faces[seed as usize].corners[0].color;

        let linked = fill(&graph, seed, FillMode::Linked);
        let same = fill(&graph, seed, FillMode::LinkedSameColor);

        prop_assert!(same.contains(&seed));
        prop_assert!(same.is_subset(&linked));
        for &face in &same {
            prop_assert_eq!(mesh.faces[face as usize].corners[0].color, seed_color);
        }
    }

    /// Filling again from any face of a same-color region yields the same region.
    #[test]
    fn same_color_region_is_stable(mesh in arb_colored_grid(5), seed in any::<prop::sample::Index>()) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let seed = seed.index(graph.face_count()) as u32;

        let region = fill(&graph, seed, FillMode::LinkedSameColor);
        for &face in &region {
            prop_assert_eq!(&fill(&graph, face, FillMode::LinkedSameColor), &region);
        }
    }

    /// The global matching fill finds at least what the linked one does.
    #[test]
    fn matching_fill_contains_same_color(mesh in arb_uniform_components(), seed in any::<prop::sample::Index>()) {
        let graph = MeshGraph::build(&mesh).expect("components are valid");
        let seed = seed.index(graph.face_count()) as u32;

        let same = fill(&graph, seed, FillMode::LinkedSameColor);
        let matching = resolve_matching_fill(&graph, seed, Color::BLACK, &exact())
            .expect("seed is in range")
            .into_faces();
        prop_assert!(same.is_subset(&matching));
    }

    /// With per-corner colors, a same-color fill returns only reference
    /// corners, and its faces touch the rest of the region and the outside
    /// only through corners that carry the reference on both sides.
    #[test]
    fn same_color_fill_crosses_only_matching_corners(
        mesh in arb_corner_colored_grid(5),
        seed in any::<prop::sample::Index>(),
        reference in 0..PALETTE.len(),
    ) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let seed = seed.index(graph.face_count()) as u32;
        let reference = PALETTE[reference];
        let params = FillParams::default().with_reference_color(reference);

        let region = resolve_fill(&graph, seed, FillMode::LinkedSameColor, Color::BLACK, &params)
            .expect("seed is in range");
        prop_assert!(region.contains(seed));

        for corner in region.corners() {
            let color = graph.corner_color(corner.face, corner.corner).expect("corner exists");
            prop_assert_eq!(color, reference);
        }

        for &face in region.faces() {
            let neighbors = graph.faces_adjacent_to(face);
            for &other in neighbors {
                if !region.contains(other) {
                    prop_assert!(!faces_meet_in(&graph, face, other, reference));
                }
            }
            if face != seed {
                prop_assert!(neighbors
                    .iter()
                    .any(|&n| region.contains(n) && faces_meet_in(&graph, face, n, reference)));
            }
        }
    }

    /// Nothing outside the paint mask is ever returned.
    #[test]
    fn fill_respects_mask(
        mesh in arb_colored_grid(5),
        seed in any::<prop::sample::Index>(),
        mask in prop::collection::hash_set(0..25u32, 0..25),
    ) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let seed = seed.index(graph.face_count()) as u32;
        let params = FillParams::default().with_face_mask(mask.iter().copied());

        for mode in [FillMode::Single, FillMode::Linked, FillMode::LinkedSameColor] {
            let region = resolve_fill(&graph, seed, mode, Color::BLACK, &params)
                .expect("seed is in range");
            for face in region.faces() {
                prop_assert!(mask.contains(face));
            }
        }
    }
}

// =============================================================================
// Property Tests: Selection Expansion
// =============================================================================

proptest! {
    /// Expansion always keeps the original selection.
    #[test]
    fn expansion_contains_selection(
        mesh in arb_colored_grid(5),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..6),
    ) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let selection: HashSet<u32> = picks
            .iter()
            .map(|i| i.index(graph.vertex_count()) as u32)
            .collect();
        let tol = ColorTolerance::exact();

        for mode in [ExpandMode::LinkedByColor, ExpandMode::SimilarByColor] {
            let grown = expand_selection(&graph, &selection, mode, &tol).expect("valid selection");
            prop_assert!(selection.is_subset(&grown));
        }
    }

    /// With per-corner colors, a linked walk from one vertex is closed: it
    /// reaches exactly the vertices joined to the seed by edges whose
    /// carrying face agrees with a seed color at both ends.
    #[test]
    fn linked_expansion_follows_matching_edges(
        mesh in arb_corner_colored_grid(5),
        pick in any::<prop::sample::Index>(),
    ) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let seed = pick.index(graph.vertex_count()) as u32;
        let seed_colors: Vec<Color> = graph.colors_at_vertex(seed).map(|(_, c)| c).collect();
        let selection: HashSet<u32> = [seed].into_iter().collect();

        let grown = expand_selection(&graph, &selection, ExpandMode::LinkedByColor, &ColorTolerance::exact())
            .expect("valid selection");

        for &v in &grown {
            let neighbors = graph.vertex_neighbors(v);
            for &u in neighbors {
                if !grown.contains(&u) {
                    prop_assert!(!edge_in_colors(&graph, v, u, &seed_colors));
                }
            }
            if v != seed {
                prop_assert!(neighbors
                    .iter()
                    .any(|&u| grown.contains(&u) && edge_in_colors(&graph, u, v, &seed_colors)));
            }
        }
    }

    /// Similar expansion finds everything linked expansion does, seams included.
    #[test]
    fn similar_contains_linked_on_seams(
        mesh in arb_corner_colored_grid(5),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4),
    ) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let selection: HashSet<u32> = picks
            .iter()
            .map(|i| i.index(graph.vertex_count()) as u32)
            .collect();
        let tol = ColorTolerance::exact();

        let linked = expand_selection(&graph, &selection, ExpandMode::LinkedByColor, &tol)
            .expect("valid selection");
        let similar = expand_selection(&graph, &selection, ExpandMode::SimilarByColor, &tol)
            .expect("valid selection");
        prop_assert!(linked.is_subset(&similar));
    }

    /// Expanding a maximal linked region again changes nothing.
    #[test]
    fn linked_expansion_is_fixed_point(mesh in arb_uniform_components(), pick in any::<prop::sample::Index>()) {
        let graph = MeshGraph::build(&mesh).expect("components are valid");
        let selection: HashSet<u32> = [pick.index(graph.vertex_count()) as u32].into_iter().collect();
        let tol = ColorTolerance::exact();

        let once = expand_selection(&graph, &selection, ExpandMode::LinkedByColor, &tol)
            .expect("valid selection");
        let twice = expand_selection(&graph, &once, ExpandMode::LinkedByColor, &tol)
            .expect("valid selection");
        prop_assert_eq!(once, twice);
    }

    /// Similar expansion finds everything linked expansion does.
    #[test]
    fn similar_contains_linked(mesh in arb_uniform_components(), pick in any::<prop::sample::Index>()) {
        let graph = MeshGraph::build(&mesh).expect("components are valid");
        let selection: HashSet<u32> = [pick.index(graph.vertex_count()) as u32].into_iter().collect();
        let tol = ColorTolerance::exact();

        let linked = expand_selection(&graph, &selection, ExpandMode::LinkedByColor, &tol)
            .expect("valid selection");
        let similar = expand_selection(&graph, &selection, ExpandMode::SimilarByColor, &tol)
            .expect("valid selection");
        prop_assert!(linked.is_subset(&similar));
    }

    /// Flushing the vertices of a face selection gives back at least those faces.
    #[test]
    fn face_projection_keeps_faces(
        mesh in arb_colored_grid(5),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let graph = MeshGraph::build(&mesh).expect("grid is valid");
        let faces: HashSet<u32> = picks
            .iter()
            .map(|i| i.index(graph.face_count()) as u32)
            .collect();

        let flushed = faces_from_vertices(&graph, &vertices_from_faces(&graph, &faces));
        prop_assert!(faces.is_subset(&flushed));
    }
}
