//! Output scope with the LFO gain traced over it

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use curve_lfo::{
    dsp::lfo::{period_from_frequency, samples_per_period, unipolar_to_bipolar, wrap_phase},
    Graph,
};

/// What the gain trace needs to line up with the audio window
pub struct LfoTrace<'a> {
    /// Graph with the live warps applied
    pub graph: &'a Graph,
    /// Playhead phase at the newest sample
    pub phase: f32,
    /// LFO cycles per second
    pub cycle_hz: f32,
    pub sample_rate: f32,
    pub bipolar: bool,
}

impl LfoTrace<'_> {
    /// Gain for each sample of a window of `len` samples ending now
    fn gains(&self, len: usize) -> Vec<(f64, f64)> {
        let samples_per_cycle = f64::from(samples_per_period(self.cycle_hz, self.sample_rate));
        (0..len)
            .map(|i| {
                let back = (len - 1 - i) as f64 / samples_per_cycle;
                let phase = wrap_phase(f64::from(self.phase) - back);
                let mut gain = self.graph.value_at(phase as f32);
                if self.bipolar {
                    gain = unipolar_to_bipolar(gain);
                }
                (i as f64 / len as f64, f64::from(gain))
            })
            .collect()
    }
}

/// Render the processed output, with the LFO gain that shaped it
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32], trace: &LfoTrace) {
    let title = format!(
        " Output  (LFO cycle {:.2} s) ",
        period_from_frequency(trace.cycle_hz)
    );
    let block = Block::default().title(title).borders(Borders::ALL);

    let len = audio_buffer.len().max(1);
    let samples: Vec<(f64, f64)> = audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / len as f64, f64::from(sample)))
        .collect();
    let gains = trace.gains(len);

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&samples),
        Dataset::default()
            .name("gain")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&gains),
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
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
