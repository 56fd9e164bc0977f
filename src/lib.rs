//! Realtime-safe LFO engine whose waveform is an editable spline graph.
//!
//! The graph is a list of vertices joined by shaped segments. It is
//! evaluated once per sample at the playhead phase, with independent
//! horizontal and vertical warps applied around the lookup.

pub mod clock; // Playhead, musical rates and host transport
pub mod dsp;
pub mod error;
pub mod graph; // Spline graph, vertices and persisted state
pub mod plugin; // Parameters, graph handoff and block processing

pub use error::{GraphError, HandoffError, ParseError};
pub use graph::{Graph, Vertex};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
