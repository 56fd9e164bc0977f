use thiserror::Error;

use crate::graph::Graph;

/// Errors produced while decoding a persisted graph string.
///
/// `record` is the zero-based index of the vertex record (the text between
/// two `;` separators, empty records not counted).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("record {record}: expected 4 fields, found {found}")]
    FieldCount { record: usize, found: usize },

    #[error("record {record}: invalid float literal `{text}`")]
    InvalidFloat { record: usize, text: String },

    #[error("record {record}: invalid curve type `{text}`")]
    InvalidInteger { record: usize, text: String },

    #[error("record {record}: unknown curve type code {code}")]
    UnknownCurveType { record: usize, code: i64 },

    #[error("record {record}: coordinate out of range (x = {x}, y = {y})")]
    OutOfRange { record: usize, x: f32, y: f32 },

    #[error("record {record}: x = {x} does not follow previous x = {previous}")]
    Unsorted { record: usize, x: f32, previous: f32 },

    #[error("graph needs at least 2 vertices, found {found}")]
    TooFewVertices { found: usize },

    #[error("graph must start at x = 0 and end at x = 1 (found {first} .. {last})")]
    MissingBoundary { first: f32, last: f32 },
}

/// Rejected structural edits on a [`crate::Graph`].
///
/// These come from UI gestures. The graph is left untouched whenever one
/// is returned.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GraphError {
    #[error("vertex {index} is a boundary vertex and cannot be removed")]
    BoundaryVertex { index: usize },

    #[error("a vertex already exists at x = {x}")]
    DuplicateX { x: f32 },

    #[error("graph is full ({max} vertices)")]
    Full { max: usize },

    #[error("vertex index {index} out of range (graph has {count} vertices)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// A graph could not be handed to the audio thread.
///
/// The rejected graph travels back inside the error so the caller can keep
/// it or try again.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("a graph is already waiting for the audio thread")]
    Pending(Box<Graph>),
}

impl HandoffError {
    /// Take back the graph that was not delivered.
    pub fn into_graph(self) -> Box<Graph> {
        match self {
            HandoffError::Pending(graph) => graph,
        }
    }
}
