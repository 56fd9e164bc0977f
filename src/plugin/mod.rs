//! The LFO as an effect: parameters, graph handoff and block processing.

/// Lock-free transfer of graphs to the audio thread.
#[cfg(feature = "rtrb")]
pub mod handoff;
/// Parameter registry, shared store and smoothing.
pub mod params;
/// Stereo block processor.
pub mod processor;

#[cfg(feature = "rtrb")]
pub use handoff::{graph_channel, GraphPublisher, GraphReceiver};
pub use params::{Param, ParamFlags, ParamInfo, ParamStore};
pub use processor::{Processor, ProcessorConfig};
