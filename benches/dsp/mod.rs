//! Benchmarks for low-level LFO primitives.

mod curve;
mod warp;

pub use curve::bench_curve;
pub use warp::bench_warp;
