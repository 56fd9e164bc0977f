use crate::{
    dsp::{
        curve::{interpolate, CurveType},
        warp::{Warp, WarpType},
    },
    error::{GraphError, ParseError},
    graph::vertex::{clamp_or_zero, Vertex, VertexRef},
};

/*
Spline Graph
============

The graph is the LFO's waveform: an ordered list of vertices over one cycle.

    y
    1.0 ┤        ●
        │       ╱ ╲
        │      ╱   ╲__
        │     ╱       ╲___●
    0.0 ●────┴─────────────┴──→ x
       0.0                1.0

Invariants
----------

  * x strictly increases from one vertex to the next. Segments need a
    non-zero width, so two vertices never share an x.
  * There are always at least two vertices, the first at x = 0.0 and the
    last at x = 1.0. Every phase in [0, 1] therefore lands on a segment.
  * The boundary vertices can move vertically but never horizontally, and
    cannot be removed.

Evaluation
----------

    phase ──► horizontal warp ──► segment lookup ──► curve ──► vertical warp

The lookup is a binary search over the sorted x positions. Nothing in the
evaluation path allocates, locks, or caches: warp setters take effect on the
very next call.

Ownership
---------

A Graph owns its vertices outright. Cloning is a deep copy, and handles
(`VertexRef`) borrow the graph they were taken from, so a copy can never
reach back into its source.
*/

/// Most vertices a graph will hold.
pub const MAX_VERTICES: usize = 99;

/// Closest two interior vertices may be dragged together.
pub const MIN_VERTEX_SPACING: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    vertices: Vec<Vertex>,
    horizontal_warp: Warp,
    vertical_warp: Warp,
}

impl Graph {
    /// The shipped default: a rising ramp from (0, 0) to (1, 1).
    pub fn new() -> Self {
        let mut vertices = Vec::with_capacity(MAX_VERTICES);
        vertices.push(Vertex::new(0.0, 0.0, CurveType::Exponential, 0.0));
        vertices.push(Vertex::new(1.0, 1.0, CurveType::Exponential, 0.0));

        Self {
            vertices,
            horizontal_warp: Warp::IDENTITY,
            vertical_warp: Warp::IDENTITY,
        }
    }

    /// Build a graph from vertices already in x order.
    ///
    /// Validation matches what the persisted-state parser enforces.
    pub fn from_vertices(vertices: &[Vertex]) -> Result<Self, ParseError> {
        validate(vertices)?;

        let mut owned = Vec::with_capacity(MAX_VERTICES.max(vertices.len()));
        owned.extend_from_slice(vertices);

        Ok(Self {
            vertices: owned,
            horizontal_warp: Warp::IDENTITY,
            vertical_warp: Warp::IDENTITY,
        })
    }

    /// Evaluate the graph at `phase`.
    ///
    /// `phase` is clamped to `[0, 1]` (NaN reads as 0). Realtime-safe.
    #[inline]
    pub fn value_at(&self, phase: f32) -> f32 {
        let phase = clamp_or_zero(phase, 0.0, 1.0);
        let x = self.horizontal_warp.apply(phase);
        let y = self.curve_at(x);
        self.vertical_warp.apply(y)
    }

    /// Raw curve lookup at graph position `x`, no warps.
    pub fn curve_at(&self, x: f32) -> f32 {
        let vertices = self.vertices.as_slice();
        let (first, last) = match (vertices.first(), vertices.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                debug_assert!(false, "graph without vertices");
                return 0.0;
            }
        };

        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        // First vertex strictly right of x. Bounded to 1..len by the checks above.
        let right = vertices.partition_point(|v| v.x <= x);
        let left = &vertices[right - 1];
        let right = &vertices[right];

        interpolate(
            left.x,
            left.y,
            right.x,
            right.y,
            left.curve_type,
            left.tension,
            x,
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, index: usize) -> Option<VertexRef<'_>> {
        (index < self.vertices.len()).then(|| VertexRef::new(self, index))
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexRef<'_>> + '_ {
        (0..self.vertices.len()).map(move |index| VertexRef::new(self, index))
    }

    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Insert a vertex in x order and return its index.
    ///
    /// `x` and `y` are clamped to `[0, 1]`. An `x` already taken by another
    /// vertex is rejected, which also keeps the boundary vertices in place.
    pub fn insert_vertex(
        &mut self,
        x: f32,
        y: f32,
        curve_type: CurveType,
        tension: f32,
    ) -> Result<usize, GraphError> {
        if self.vertices.len() >= MAX_VERTICES {
            return Err(GraphError::Full { max: MAX_VERTICES });
        }

        let vertex = Vertex::new(x, y, curve_type, tension);
        let index = self.vertices.partition_point(|v| v.x < vertex.x);
        if self.vertices.get(index).is_some_and(|v| v.x == vertex.x) {
            return Err(GraphError::DuplicateX { x: vertex.x });
        }

        self.vertices.insert(index, vertex);
        Ok(index)
    }

    /// Remove an interior vertex.
    pub fn remove_vertex(&mut self, index: usize) -> Result<Vertex, GraphError> {
        self.check_index(index)?;
        if self.is_boundary(index) {
            return Err(GraphError::BoundaryVertex { index });
        }
        Ok(self.vertices.remove(index))
    }

    /// Move a vertex, keeping the x order intact.
    ///
    /// Boundary vertices only move vertically. Interior vertices are held
    /// between their neighbours, `MIN_VERTEX_SPACING` away from each.
    pub fn set_vertex_position(&mut self, index: usize, x: f32, y: f32) -> Result<(), GraphError> {
        self.check_index(index)?;

        let last = self.vertices.len() - 1;
        let x = if index == 0 {
            0.0
        } else if index == last {
            1.0
        } else {
            let left = self.vertices[index - 1].x;
            let right = self.vertices[index + 1].x;
            let lo = left + MIN_VERTEX_SPACING;
            let hi = right - MIN_VERTEX_SPACING;
            if lo < hi {
                // NaN keeps the vertex where it is
                let x = if x.is_nan() { self.vertices[index].x } else { x };
                x.clamp(lo, hi)
            } else {
                // Neighbours are closer than two spacings apart
                0.5 * (left + right)
            }
        };

        let vertex = &mut self.vertices[index];
        vertex.x = x;
        vertex.y = clamp_or_zero(y, 0.0, 1.0);
        Ok(())
    }

    pub fn set_vertex_tension(&mut self, index: usize, tension: f32) -> Result<(), GraphError> {
        self.check_index(index)?;
        self.vertices[index].tension = clamp_or_zero(tension, -1.0, 1.0);
        Ok(())
    }

    pub fn set_vertex_curve_type(
        &mut self,
        index: usize,
        curve_type: CurveType,
    ) -> Result<(), GraphError> {
        self.check_index(index)?;
        self.vertices[index].curve_type = curve_type;
        Ok(())
    }

    pub fn horizontal_warp(&self) -> Warp {
        self.horizontal_warp
    }

    pub fn vertical_warp(&self) -> Warp {
        self.vertical_warp
    }

    pub fn set_horizontal_warp_type(&mut self, kind: WarpType) {
        self.horizontal_warp.kind = kind;
    }

    pub fn set_horizontal_warp_amount(&mut self, amount: f32) {
        self.horizontal_warp.amount = amount;
    }

    pub fn set_vertical_warp_type(&mut self, kind: WarpType) {
        self.vertical_warp.kind = kind;
    }

    pub fn set_vertical_warp_amount(&mut self, amount: f32) {
        self.vertical_warp.amount = amount;
    }

    /// Copy the warp settings of another graph.
    ///
    /// Used when a freshly parsed graph replaces the active one: the warps
    /// come from parameters, not from the persisted vertices.
    pub fn copy_warps_from(&mut self, other: &Graph) {
        self.horizontal_warp = other.horizontal_warp;
        self.vertical_warp = other.vertical_warp;
    }

    /// Back to the default ramp. Warps are left alone.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.vertices
            .push(Vertex::new(0.0, 0.0, CurveType::Exponential, 0.0));
        self.vertices
            .push(Vertex::new(1.0, 1.0, CurveType::Exponential, 0.0));
    }

    fn is_boundary(&self, index: usize) -> bool {
        index == 0 || index + 1 == self.vertices.len()
    }

    fn check_index(&self, index: usize) -> Result<(), GraphError> {
        if index < self.vertices.len() {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange {
                index,
                count: self.vertices.len(),
            })
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the structural invariants on a vertex list.
pub(crate) fn validate(vertices: &[Vertex]) -> Result<(), ParseError> {
    if vertices.len() < 2 {
        return Err(ParseError::TooFewVertices {
            found: vertices.len(),
        });
    }

    for (record, v) in vertices.iter().enumerate() {
        let in_unit = |value: f32| value.is_finite() && (0.0..=1.0).contains(&value);
        if !in_unit(v.x) || !in_unit(v.y) {
            return Err(ParseError::OutOfRange {
                record,
                x: v.x,
                y: v.y,
            });
        }
    }

    for (record, pair) in vertices.windows(2).enumerate() {
        if pair[1].x <= pair[0].x {
            return Err(ParseError::Unsorted {
                record: record + 1,
                x: pair[1].x,
                previous: pair[0].x,
            });
        }
    }

    let first = vertices[0].x;
    let last = vertices[vertices.len() - 1].x;
    if first != 0.0 || last != 1.0 {
        return Err(ParseError::MissingBoundary { first, last });
    }

    Ok(())
}
