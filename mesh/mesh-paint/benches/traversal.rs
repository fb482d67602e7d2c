//! Benchmarks for mesh-paint traversal.
//!
//! Run with: cargo bench -p mesh-paint
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-paint -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-paint -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_paint::{
    ColorTolerance, ExpandMode, FillMode, FillParams, HashSet, MeshGraph, expand_selection,
    resolve_fill,
};
use mesh_types::{Color, PolyMesh, quad_grid};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Square grid with a checkerboard of 4x4-face red and blue tiles.
fn create_tiled_grid(side: u32) -> PolyMesh {
    let mut mesh = quad_grid(side, side, Color::RED);

    for row in 0..side {
        for col in 0..side {
            if ((row / 4) + (col / 4)) % 2 == 1 {
                let face = (row * side + col) as usize;
                for corner in &mut mesh.faces[face].corners {
                    corner.color = Color::BLUE;
                }
            }
        }
    }

    mesh
}

fn test_cases() -> Vec<(&'static str, PolyMesh)> {
    vec![
        ("grid_32x32", create_tiled_grid(32)),
        ("grid_128x128", create_tiled_grid(128)),
        ("grid_256x256", create_tiled_grid(256)),
    ]
}

// =============================================================================
// Graph Benchmarks
// =============================================================================

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("GraphBuild");

    for (name, mesh) in &test_cases() {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));
        group.bench_with_input(BenchmarkId::new("build", name), mesh, |b, mesh| {
            b.iter(|| MeshGraph::build(black_box(mesh)));
        });
    }

    group.finish();
}

// =============================================================================
// Fill Benchmarks
// =============================================================================

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fill");
    let params = FillParams::default();

    for (name, mesh) in &test_cases() {
        let Ok(graph) = MeshGraph::build(mesh) else {
            continue;
        };

        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for mode in [FillMode::Linked, FillMode::LinkedSameColor] {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), name),
                &graph,
                |b, graph| {
                    b.iter(|| {
                        resolve_fill(graph, black_box(0), mode, Color::GREEN, black_box(&params))
                    });
                },
            );
        }
    }

    group.finish();
}

// =============================================================================
// Selection Benchmarks
// =============================================================================

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("Expand");
    let tolerance = ColorTolerance::exact();
    let selection: HashSet<u32> = [0].into_iter().collect();

    for (name, mesh) in &test_cases() {
        let Ok(graph) = MeshGraph::build(mesh) else {
            continue;
        };

        group.throughput(Throughput::Elements(mesh.vertices.len() as u64));

        for mode in [ExpandMode::LinkedByColor, ExpandMode::SimilarByColor] {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), name),
                &graph,
                |b, graph| {
                    b.iter(|| expand_selection(graph, black_box(&selection), mode, &tolerance));
                },
            );
        }
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_graph_build, bench_fill, bench_expand);
criterion_main!(benches);
