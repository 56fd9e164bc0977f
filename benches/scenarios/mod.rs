//! Benchmarks for graph evaluation and block processing.

mod graph;
mod processor;

pub use graph::bench_graph;
pub use processor::bench_processor;
