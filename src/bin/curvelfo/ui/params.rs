//! Parameter panel - current value of every parameter

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use curve_lfo::{
    clock::rate,
    dsp::WarpType,
    plugin::{Param, ParamStore},
};

/// Render one line per parameter
pub fn render_params(frame: &mut Frame, area: Rect, params: &ParamStore) {
    let block = Block::default().title(" Parameters ").borders(Borders::ALL);

    let lines: Vec<Line> = Param::ALL
        .iter()
        .map(|&param| {
            let info = param.info();
            let value = params.get(param);
            let shown = match param {
                Param::HorizontalWarpType | Param::VerticalWarpType => {
                    WarpType::from_param(value).label().to_string()
                }
                Param::LfoRate => format!("{:.2} ({}/bar)", value, rate::label(value)),
                Param::Smoothing => format!("{:.0} ms", value),
                _ if info.flags.boolean => {
                    let state = if value >= 0.5 { "on" } else { "off" };
                    state.to_string()
                }
                _ => format!("{:.3}", value),
            };

            Line::from(vec![
                Span::styled(
                    format!("{:<14}", info.name),
                    Style::default().fg(if info.flags.output {
                        Color::DarkGray
                    } else {
                        Color::White
                    }),
                ),
                Span::styled(shown, Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
