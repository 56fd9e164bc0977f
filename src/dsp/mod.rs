//! Low-level DSP primitives used by the graph and the processor.
//!
//! Everything here is allocation-free and realtime-safe: plain functions of
//! their scalar inputs, or small `Copy` state that lives inside the
//! processor. Curve types and warp types are closed enums dispatched with a
//! `match`.

/// Segment interpolation laws (linear, exponential, stairs, ...).
pub mod curve;
/// Unipolar/bipolar helpers and phase wrapping.
pub mod lfo;
/// One-pole parameter smoothing.
pub mod smooth;
/// Monotonic remapping of the unit interval (bend and skew).
pub mod warp;

pub use curve::{interpolate, CurveType};
pub use smooth::ParamSmooth;
pub use warp::{warp, Warp, WarpType};
