//! The spline graph that gives the LFO its shape.
//!
//! A [`Graph`] owns an ordered list of [`Vertex`] values and evaluates the
//! curve through them at any phase, with horizontal and vertical warps
//! applied around the lookup. The `state` module converts graphs to and from
//! the compact text the host persists.

/// Hexadecimal float literals used by the persisted format.
pub mod hexfloat;
/// Graph container: evaluation and structural edits.
pub mod spline;
/// Persisted state string (parse / serialize).
pub mod state;
/// Vertices and owner-resolved vertex handles.
pub mod vertex;

pub use spline::{Graph, MAX_VERTICES, MIN_VERTEX_SPACING};
pub use state::{parse, serialize, DEFAULT_STATE, STATE_KEY};
pub use vertex::{Vertex, VertexRef};
