//! Benchmarks for phase and amplitude warps.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use curve_lfo::dsp::warp::{Warp, WarpType};

use crate::BLOCK_SIZES;

pub fn bench_warp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/warp");

    for &size in BLOCK_SIZES {
        let us: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();
        let mut output = vec![0.0f32; size];

        for kind in [WarpType::BendPlusMinus, WarpType::SkewPlusMinus] {
            let warp = Warp::new(kind, 0.7);
            group.bench_with_input(BenchmarkId::new(format!("{:?}", kind).to_lowercase(), size), &size, |b, _| {
                b.iter(|| {
                    for (out, &u) in output.iter_mut().zip(&us) {
                        *out = black_box(warp).apply(u);
                    }
                    black_box(&output);
                })
            });
        }
    }

    group.finish();
}
