//! Graph widget - the LFO shape with its vertices and the playhead

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use curve_lfo::Graph;

/// Points sampled across one cycle
const GRAPH_RESOLUTION: usize = 256;

/// Render the graph with warps applied, vertices and playhead
pub fn render_graph(frame: &mut Frame, area: Rect, graph: &Graph, title: &str, phase: f32) {
    let block = Block::default()
        .title(format!(" Graph: {} ", title))
        .borders(Borders::ALL);

    let curve: Vec<(f64, f64)> = (0..=GRAPH_RESOLUTION)
        .map(|i| {
            let phase = i as f32 / GRAPH_RESOLUTION as f32;
            (f64::from(phase), f64::from(graph.value_at(phase)))
        })
        .collect();

    // Vertices sit where the playhead reaches them, at their warped height
    let vertices: Vec<(f64, f64)> = graph
        .vertices()
        .map(|v| (f64::from(v.phase()), f64::from(v.warped_y())))
        .collect();

    let playhead = [
        (f64::from(phase), 0.0),
        (f64::from(phase), f64::from(graph.value_at(phase))),
    ];

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&curve),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White))
            .data(&vertices),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&playhead),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
