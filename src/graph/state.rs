use std::{fmt, str::FromStr};

use crate::{
    dsp::curve::CurveType,
    error::ParseError,
    graph::{
        hexfloat::{parse_hex_f32, write_hex_f32},
        spline::Graph,
        vertex::Vertex,
    },
};

/*
Persisted Graph State
=====================

The host saves the graph as a single string under the key "graph":

    x,y,tension,curve;x,y,tension,curve;...

    0x0p+0,0x0p+0,0x0p+0,0;0x1p+0,0x1p+0,0x0p+0,0;
    └─x──┘ └─y──┘ └tension┘└curve code
    ─────────── vertex 0 ──────────┘└──────── vertex 1 ─────────┘

  * One record per vertex, in x order, each terminated by ';'.
  * x, y and tension are hexadecimal float literals (see `hexfloat`).
  * The curve type is a plain integer code (`CurveType::code`).
  * Warp settings are host parameters and are not part of the string.

Loading is all-or-nothing: a string that fails any check produces an error
and no graph, so the caller can keep whatever graph it already has.
*/

/// Key under which the host stores the graph.
pub const STATE_KEY: &str = "graph";

/// Serialized form of [`Graph::new`].
pub const DEFAULT_STATE: &str = "0x0p+0,0x0p+0,0x0p+0,0;0x1p+0,0x1p+0,0x0p+0,0;";

const RECORD_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = ',';

/// Decode a persisted graph string.
pub fn parse(text: &str) -> Result<Graph, ParseError> {
    let mut vertices = Vec::with_capacity(8);

    let records = text
        .split(RECORD_SEPARATOR)
        .map(str::trim)
        .filter(|record| !record.is_empty());

    for (record, fields) in records.enumerate() {
        vertices.push(parse_record(record, fields)?);
    }

    // An empty string surfaces here as too few vertices
    Graph::from_vertices(&vertices)
}

fn parse_record(record: usize, text: &str) -> Result<Vertex, ParseError> {
    let mut fields = [""; 4];
    let mut found = 0;
    for field in text.split(FIELD_SEPARATOR) {
        if found < fields.len() {
            fields[found] = field.trim();
        }
        found += 1;
    }
    if found != fields.len() {
        return Err(ParseError::FieldCount { record, found });
    }

    let float = |text: &str| {
        parse_hex_f32(text).ok_or_else(|| ParseError::InvalidFloat {
            record,
            text: text.to_string(),
        })
    };

    let x = float(fields[0])?;
    let y = float(fields[1])?;
    let tension = float(fields[2])?;

    let code: i64 = fields[3]
        .parse()
        .map_err(|_| ParseError::InvalidInteger {
            record,
            text: fields[3].to_string(),
        })?;
    let curve_type =
        CurveType::from_code(code).ok_or(ParseError::UnknownCurveType { record, code })?;

    if !x.is_finite() || !y.is_finite() || !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y)
    {
        return Err(ParseError::OutOfRange { record, x, y });
    }
    if !tension.is_finite() {
        return Err(ParseError::InvalidFloat {
            record,
            text: fields[2].to_string(),
        });
    }

    Ok(Vertex {
        x,
        y,
        tension: tension.clamp(-1.0, 1.0),
        curve_type,
    })
}

/// Encode a graph as a persisted state string.
pub fn serialize(graph: &Graph) -> String {
    // Each record is at most ~70 bytes
    let mut out = String::with_capacity(graph.vertex_count() * 72);
    // Writing into a String cannot fail
    let _ = write_state(&mut out, graph);
    out
}

fn write_state<W: fmt::Write>(out: &mut W, graph: &Graph) -> fmt::Result {
    for vertex in graph.as_slice() {
        write_hex_f32(out, vertex.x)?;
        out.write_char(FIELD_SEPARATOR)?;
        write_hex_f32(out, vertex.y)?;
        out.write_char(FIELD_SEPARATOR)?;
        write_hex_f32(out, vertex.tension)?;
        write!(out, "{}{}", FIELD_SEPARATOR, vertex.curve_type.code())?;
        out.write_char(RECORD_SEPARATOR)?;
    }
    Ok(())
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_state(f, self)
    }
}

impl FromStr for Graph {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Graph {
    /// Replace this graph's vertices with the ones decoded from `text`.
    ///
    /// On error the graph is left exactly as it was. Warps are kept.
    pub fn rebuild_from_str(&mut self, text: &str) -> Result<(), ParseError> {
        let mut parsed = parse(text)?;
        parsed.copy_warps_from(self);
        *self = parsed;
        Ok(())
    }

    /// Persisted state string for this graph.
    pub fn to_state_string(&self) -> String {
        serialize(self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Graph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Graph {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }
}
