//! TUI module for curvelfo
//!
//! Shows the graph, the parameters and the processed output, and turns key
//! presses into parameter changes and graph swaps.

mod graph;
mod params;
pub mod state;
mod transport;
mod waveform;

use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

use curve_lfo::{
    clock::rate,
    dsp::WarpType,
    plugin::{GraphPublisher, Param, ParamStore},
    Graph,
};

pub use state::{ControlMessage, UiStateInit, UiStateUpdate};

use graph::render_graph;
use params::render_params;
use transport::{render_transport, AudioStats};
use waveform::{render_waveform, LfoTrace};

use crate::app::Preset;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// Step for continuous parameters per key press
const AMOUNT_STEP: f32 = 0.05;

/// UI application state
pub struct UiApp {
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Ring buffer receiver for UI state updates
    state_rx: Consumer<UiStateUpdate>,
    /// Commands for the audio thread
    control_tx: Producer<ControlMessage>,
    /// Graph handoff to the audio thread
    publisher: GraphPublisher,
    /// Parameters shared with the audio thread
    params: Arc<ParamStore>,
    /// Static info sent once at startup
    static_state: UiStateInit,
    /// Current UI state (latest received)
    current_state: UiStateUpdate,
    /// Graph presets, cycled with [G]
    presets: Vec<Preset>,
    /// Index of the preset the audio thread is playing (or about to)
    preset_index: usize,
    /// Graph refused by the handoff, retried every frame
    queued: Option<Box<Graph>>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    /// Create a new UI application
    pub fn new(
        audio_rx: Consumer<f32>,
        state_rx: Consumer<UiStateUpdate>,
        control_tx: Producer<ControlMessage>,
        publisher: GraphPublisher,
        params: Arc<ParamStore>,
        static_state: UiStateInit,
        presets: Vec<Preset>,
    ) -> Self {
        Self {
            audio_rx,
            state_rx,
            control_tx,
            publisher,
            params,
            static_state,
            current_state: UiStateUpdate::new(),
            presets,
            preset_index: 0,
            queued: None,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();
            self.flush_queued();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        let mut new_samples = Vec::new();
        while let Ok(sample) = self.audio_rx.pop() {
            new_samples.push(sample);
        }

        if !new_samples.is_empty() {
            self.audio_buffer.extend(new_samples);
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
        }
    }

    /// Poll for state updates from ring buffer
    fn poll_state(&mut self) {
        // Keep only the latest state
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = state;
        }
    }

    /// Retry a graph the handoff refused, and free retired ones
    fn flush_queued(&mut self) {
        match self.queued.take() {
            Some(graph) => {
                if let Err(err) = self.publisher.publish(graph) {
                    self.queued = Some(err.into_graph());
                }
            }
            None => {
                self.publisher.reclaim();
            }
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.send(ControlMessage::TogglePlayback),
            KeyCode::Char('0') => {
                self.params.reset();
                self.send(ControlMessage::Reset);
            }
            KeyCode::Up => self.nudge(Param::LfoRate, 1.0),
            KeyCode::Down => self.nudge(Param::LfoRate, -1.0),
            KeyCode::Char('w') => self.cycle_warp(Param::HorizontalWarpType, WarpType::next),
            KeyCode::Char('W') => self.cycle_warp(Param::HorizontalWarpType, WarpType::previous),
            KeyCode::Char('a') => self.nudge(Param::HorizontalWarpAmount, AMOUNT_STEP),
            KeyCode::Char('z') => self.nudge(Param::HorizontalWarpAmount, -AMOUNT_STEP),
            KeyCode::Char('v') => self.cycle_warp(Param::VerticalWarpType, WarpType::next),
            KeyCode::Char('V') => self.cycle_warp(Param::VerticalWarpType, WarpType::previous),
            KeyCode::Char('s') => self.nudge(Param::VerticalWarpAmount, AMOUNT_STEP),
            KeyCode::Char('x') => self.nudge(Param::VerticalWarpAmount, -AMOUNT_STEP),
            KeyCode::Char('[') => self.nudge(Param::Phase, -AMOUNT_STEP),
            KeyCode::Char(']') => self.nudge(Param::Phase, AMOUNT_STEP),
            KeyCode::Char('-') => self.nudge(Param::Wet, -AMOUNT_STEP),
            KeyCode::Char('=') => self.nudge(Param::Wet, AMOUNT_STEP),
            KeyCode::Char('b') => self.toggle(Param::BpmSync),
            KeyCode::Char('p') => self.toggle(Param::BipolarMode),
            KeyCode::Char('g') => self.next_preset(),
            _ => {}
        }
    }

    fn send(&mut self, message: ControlMessage) {
        // A full queue means the audio thread is behind; dropping is fine
        let _ = self.control_tx.push(message);
    }

    fn nudge(&self, param: Param, delta: f32) {
        self.params.set(param, self.params.get(param) + delta);
    }

    fn toggle(&self, param: Param) {
        let value = if self.params.is_on(param) { 0.0 } else { 1.0 };
        self.params.set(param, value);
    }

    fn cycle_warp(&self, param: Param, step: fn(WarpType) -> WarpType) {
        let current = WarpType::from_param(self.params.get(param));
        self.params.set(param, step(current) as u8 as f32);
    }

    /// Hand the next preset's graph to the audio thread
    fn next_preset(&mut self) {
        if self.presets.is_empty() || self.queued.is_some() {
            return;
        }
        self.preset_index = (self.preset_index + 1) % self.presets.len();
        let graph = Box::new(self.presets[self.preset_index].graph.clone());
        if let Err(err) = self.publisher.publish(graph) {
            self.queued = Some(err.into_graph());
        }
    }

    /// LFO frequency the audio thread is running at
    fn cycle_hz(&self) -> f32 {
        let position = self.params.get(Param::LfoRate);
        let hz = if self.params.is_on(Param::BpmSync) {
            let bar_hz = self.static_state.bpm / 60.0 / f64::from(self.static_state.beats_per_bar);
            bar_hz * rate::ratio_at_index(position)
        } else {
            rate::free_running_hz(position)
        };
        hz as f32
    }

    /// The current preset with the live warp parameters applied
    fn display_graph(&self) -> Graph {
        let mut graph = self
            .presets
            .get(self.preset_index)
            .map(|preset| preset.graph.clone())
            .unwrap_or_default();
        graph.set_horizontal_warp_type(WarpType::from_param(
            self.params.get(Param::HorizontalWarpType),
        ));
        graph.set_horizontal_warp_amount(self.params.get(Param::HorizontalWarpAmount));
        graph.set_vertical_warp_type(WarpType::from_param(self.params.get(Param::VerticalWarpType)));
        graph.set_vertical_warp_amount(self.params.get(Param::VerticalWarpAmount));
        graph
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, graph + parameters, output, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(10),   // Graph and parameters
                Constraint::Length(8), // Output scope
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let audio_stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(
            frame,
            chunks[0],
            &self.static_state,
            &self.current_state,
            self.params.is_on(Param::BpmSync),
            &audio_stats,
        );

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(34)])
            .split(chunks[1]);

        let title = self
            .presets
            .get(self.preset_index)
            .map_or("default", |preset| preset.name);
        let graph = self.display_graph();
        render_graph(frame, middle[0], &graph, title, self.current_state.phase);
        render_params(frame, middle[1], &self.params);

        let trace = LfoTrace {
            graph: &graph,
            phase: self.current_state.phase,
            cycle_hz: self.cycle_hz(),
            sample_rate: self.static_state.sample_rate,
            bipolar: self.params.is_on(Param::BipolarMode),
        };
        render_waveform(frame, chunks[2], &self.audio_buffer, &trace);

        let help = Paragraph::new(
            " [Q] Quit  [Space] Play/Pause  [0] Reset  [↑↓] Rate  [W/w V/v] Warp type  \
             [a/z s/x] Warp amount  [[ ]] Phase  [-/=] Wet  [B] Sync  [P] Bipolar  [G] Preset",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
