#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::curve::CurveType;
use crate::graph::Graph;

/// A control point of the graph.
///
/// `curve_type` and `tension` shape the segment that starts at this vertex
/// and ends at the next one. On the last vertex they are kept (and
/// persisted) but unused.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub tension: f32,
    pub curve_type: CurveType,
}

impl Vertex {
    /// Create a vertex, clamping `x`/`y` to `[0, 1]` and `tension` to `[-1, 1]`.
    pub fn new(x: f32, y: f32, curve_type: CurveType, tension: f32) -> Self {
        Self {
            x: clamp_or_zero(x, 0.0, 1.0),
            y: clamp_or_zero(y, 0.0, 1.0),
            tension: clamp_or_zero(tension, -1.0, 1.0),
            curve_type,
        }
    }

    /// Straight-line vertex.
    pub fn linear(x: f32, y: f32) -> Self {
        Self::new(x, y, CurveType::Linear, 0.0)
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(0.0, 0.0, CurveType::Exponential, 0.0)
    }
}

#[inline]
pub(crate) fn clamp_or_zero(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}

/// A vertex viewed through the graph that owns it.
///
/// Vertices do not point back at their graph. Anything that needs graph
/// state (the warps, the neighbours) goes through this handle, which
/// borrows the graph and an index into it. A cloned graph hands out
/// handles to itself, never to the source.
#[derive(Debug, Clone, Copy)]
pub struct VertexRef<'g> {
    graph: &'g Graph,
    index: usize,
}

impl<'g> VertexRef<'g> {
    pub(crate) fn new(graph: &'g Graph, index: usize) -> Self {
        Self { graph, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn vertex(&self) -> &'g Vertex {
        &self.graph.as_slice()[self.index]
    }

    pub fn x(&self) -> f32 {
        self.vertex().x
    }

    pub fn y(&self) -> f32 {
        self.vertex().y
    }

    pub fn tension(&self) -> f32 {
        self.vertex().tension
    }

    pub fn curve_type(&self) -> CurveType {
        self.vertex().curve_type
    }

    /// First or last vertex.
    pub fn is_boundary(&self) -> bool {
        self.index == 0 || self.index + 1 == self.graph.vertex_count()
    }

    /// The vertex that closes this vertex's segment, if any.
    pub fn next(&self) -> Option<VertexRef<'g>> {
        self.graph.vertex(self.index + 1)
    }

    /// The vertex whose segment ends here, if any.
    pub fn previous(&self) -> Option<VertexRef<'g>> {
        self.index
            .checked_sub(1)
            .and_then(|index| self.graph.vertex(index))
    }

    /// Vertical position after the owning graph's vertical warp.
    pub fn warped_y(&self) -> f32 {
        self.graph.vertical_warp().apply(self.y())
    }

    /// Phase at which the playhead reaches this vertex under the owning
    /// graph's horizontal warp.
    ///
    /// The horizontal warp maps phase to graph x, so this is the inverse
    /// mapping, found by bisection.
    pub fn phase(&self) -> f32 {
        let warp = self.graph.horizontal_warp();
        let target = self.x();
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        for _ in 0..32 {
            let mid = 0.5 * (lo + hi);
            if warp.apply(mid) < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }
}
