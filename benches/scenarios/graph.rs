//! Benchmarks for whole-graph evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use curve_lfo::{
    dsp::{CurveType, WarpType},
    Graph, Vertex,
};

use crate::BLOCK_SIZES;

/// A graph with `count` vertices alternating between low and high.
fn zigzag(count: usize) -> Graph {
    let vertices: Vec<Vertex> = (0..count)
        .map(|i| {
            let x = i as f32 / (count - 1) as f32;
            let y = if i % 2 == 0 { 0.1 } else { 0.9 };
            Vertex::new(x, y, CurveType::Exponential, 0.4)
        })
        .collect();
    Graph::from_vertices(&vertices).expect("zigzag graph is valid")
}

pub fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/graph");

    for &size in BLOCK_SIZES {
        let phases: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();
        let mut output = vec![0.0f32; size];

        for vertex_count in [2usize, 16, 99] {
            let mut graph = zigzag(vertex_count);
            graph.set_horizontal_warp_type(WarpType::SkewPlus);
            graph.set_horizontal_warp_amount(0.5);
            graph.set_vertical_warp_type(WarpType::BendMinus);
            graph.set_vertical_warp_amount(0.3);

            let name = format!("value_at_{}_vertices", vertex_count);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (out, &phase) in output.iter_mut().zip(&phases) {
                        *out = graph.value_at(black_box(phase));
                    }
                    black_box(&output);
                })
            });
        }
    }

    group.finish();
}
