use curve_lfo::{
    dsp::{CurveType, WarpType},
    graph::{parse, serialize, DEFAULT_STATE, STATE_KEY},
    plugin::{Processor, ProcessorConfig},
    Graph, ParseError, Vertex,
};

const TRIANGLE: &str = "0x0p+0,0x0p+0,0x0p+0,4;0x1p-1,0x1p+0,0x0p+0,4;0x1p+0,0x0p+0,0x0p+0,4;";

#[test]
fn default_state_is_a_rising_ramp() {
    let graph = parse(DEFAULT_STATE).expect("default state parses");
    assert_eq!(graph.vertex_count(), 2);
    assert!((graph.value_at(0.5) - 0.5).abs() < 1e-6);
    assert_eq!(serialize(&graph), DEFAULT_STATE);
}

#[test]
fn triangle_state_evaluates_as_drawn() {
    let graph: Graph = TRIANGLE.parse().expect("triangle parses");
    for (phase, expected) in [(0.25, 0.5), (0.5, 1.0), (0.75, 0.5)] {
        let y = graph.value_at(phase);
        assert!((y - expected).abs() < 1e-6, "value_at({}) = {}", phase, y);
    }
}

#[test]
fn edited_graph_survives_a_save_load_cycle() {
    let mut graph = Graph::new();
    graph
        .insert_vertex(0.3, 0.8, CurveType::Wave, 0.45)
        .expect("room for a vertex");
    graph
        .insert_vertex(0.7, 0.1, CurveType::Stairs, -0.2)
        .expect("room for a vertex");
    graph
        .set_vertex_curve_type(0, CurveType::DoubleCurve)
        .expect("valid index");
    graph.set_vertex_tension(0, 0.9).expect("valid index");

    let saved = graph.to_state_string();
    let loaded = parse(&saved).expect("saved state parses");

    assert_eq!(loaded.as_slice(), graph.as_slice());
    assert_eq!(serialize(&loaded), saved);
    for i in 0..=100 {
        let phase = i as f32 / 100.0;
        assert_eq!(loaded.value_at(phase), graph.value_at(phase));
    }
}

#[test]
fn warps_are_not_persisted() {
    let mut graph: Graph = TRIANGLE.parse().expect("triangle parses");
    graph.set_horizontal_warp_type(WarpType::SkewPlus);
    graph.set_horizontal_warp_amount(0.9);

    assert_eq!(graph.to_state_string(), TRIANGLE);
}

#[test]
fn truncated_record_is_rejected_and_graph_kept() {
    let mut processor = Processor::new(ProcessorConfig::default());
    processor
        .set_state(STATE_KEY, TRIANGLE)
        .expect("triangle parses");

    let err = processor
        .set_state(STATE_KEY, "0x0p+0,0x0p+0;")
        .expect_err("two fields are not a vertex");
    assert_eq!(err, ParseError::FieldCount { record: 0, found: 2 });

    assert_eq!(processor.state(STATE_KEY).as_deref(), Some(TRIANGLE));
    assert!((processor.graph().value_at(0.5) - 1.0).abs() < 1e-6);
}

#[test]
fn malformed_strings_report_what_went_wrong() {
    assert!(matches!(
        parse("0x0p+0,0x0p+0,0x0p+0,9;0x1p+0,0x1p+0,0x0p+0,0;"),
        Err(ParseError::UnknownCurveType { record: 0, code: 9 })
    ));
    assert!(matches!(
        parse("0x0p+0,0x0p+0,0x0p+0,0;0xQ,0x1p+0,0x0p+0,0;"),
        Err(ParseError::InvalidFloat { record: 1, .. })
    ));
    assert!(matches!(
        parse("0x0p+0,0x0p+0,0x0p+0,0;"),
        Err(ParseError::TooFewVertices { found: 1 })
    ));
    assert!(matches!(
        parse("0x0p+0,0x0p+0,0x0p+0,0;0x1p+1,0x1p+0,0x0p+0,0;"),
        Err(ParseError::OutOfRange { record: 1, .. })
    ));
}

#[test]
fn from_vertices_matches_parsed_state() {
    let built = Graph::from_vertices(&[
        Vertex::linear(0.0, 0.0),
        Vertex::linear(0.5, 1.0),
        Vertex::linear(1.0, 0.0),
    ])
    .expect("valid triangle");
    let parsed = parse(TRIANGLE).expect("triangle parses");
    assert_eq!(built, parsed);
}
