//! Benchmarks for stereo block processing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use curve_lfo::plugin::{Param, Processor, ProcessorConfig};

use crate::BLOCK_SIZES;

pub fn bench_processor(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/processor");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 * 0.05).sin() * 0.5)
            .collect();
        let mut out_l = vec![0.0f32; size];
        let mut out_r = vec![0.0f32; size];

        let mut processor = Processor::new(ProcessorConfig::default());
        group.bench_with_input(BenchmarkId::new("default", size), &size, |b, _| {
            b.iter(|| {
                processor.process(
                    [black_box(input.as_slice()), black_box(input.as_slice())],
                    [out_l.as_mut_slice(), out_r.as_mut_slice()],
                )
            })
        });

        let mut processor = Processor::new(ProcessorConfig::default());
        processor.set_param(Param::HorizontalWarpType, 6.0);
        processor.set_param(Param::HorizontalWarpAmount, 0.8);
        processor.set_param(Param::VerticalWarpType, 3.0);
        processor.set_param(Param::VerticalWarpAmount, 0.5);
        processor.set_param(Param::BipolarMode, 1.0);
        processor.set_param(Param::Wet, 0.7);
        group.bench_with_input(BenchmarkId::new("warped", size), &size, |b, _| {
            b.iter(|| {
                processor.process(
                    [black_box(input.as_slice()), black_box(input.as_slice())],
                    [out_l.as_mut_slice(), out_r.as_mut_slice()],
                )
            })
        });
    }

    group.finish();
}
