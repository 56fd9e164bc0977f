//! Benchmarks for segment interpolation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use curve_lfo::dsp::curve::{interpolate, CurveType};

use crate::BLOCK_SIZES;

pub fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/curve");

    for &size in BLOCK_SIZES {
        let xs: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();
        let mut output = vec![0.0f32; size];

        for curve_type in CurveType::ALL {
            let name = format!("{:?}", curve_type).to_lowercase();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (out, &x) in output.iter_mut().zip(&xs) {
                        *out = interpolate(
                            0.0,
                            0.0,
                            1.0,
                            1.0,
                            black_box(curve_type),
                            black_box(0.6),
                            x,
                        );
                    }
                    black_box(&output);
                })
            });
        }
    }

    group.finish();
}
