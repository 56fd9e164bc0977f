//! CurveLfo - application builder and runner

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::RingBuffer;

use curve_lfo::{
    clock::TransportInfo,
    dsp::CurveType,
    graph::{self, Vertex},
    plugin::{Processor, ProcessorConfig},
    Graph, MAX_BLOCK_SIZE,
};

use super::ui::{ControlMessage, UiApp, UiStateInit, UiStateUpdate};

/// Beats per bar of the internal transport
const BEATS_PER_BAR: f32 = 4.0;

/// Samples buffered for the oscilloscope
const SCOPE_RING_SIZE: usize = 8192;

/// A named graph the UI can switch to
pub struct Preset {
    pub name: &'static str,
    pub graph: Graph,
}

/// Built-in graphs, cycled from the UI
pub fn presets() -> EyreResult<Vec<Preset>> {
    let triangle = graph::parse(
        "0x0p+0,0x0p+0,0x0p+0,4;0x1p-1,0x1p+0,0x0p+0,4;0x1p+0,0x0p+0,0x0p+0,4;",
    )
    .wrap_err("triangle preset")?;

    let pluck = Graph::from_vertices(&[
        Vertex::new(0.0, 1.0, CurveType::Exponential, -0.7),
        Vertex::new(1.0, 0.0, CurveType::Exponential, 0.0),
    ])
    .wrap_err("pluck preset")?;

    let swell = Graph::from_vertices(&[
        Vertex::new(0.0, 0.0, CurveType::DoubleCurve, 0.6),
        Vertex::new(0.5, 1.0, CurveType::DoubleCurve, 0.6),
        Vertex::new(1.0, 0.0, CurveType::DoubleCurve, 0.0),
    ])
    .wrap_err("swell preset")?;

    let stairs = Graph::from_vertices(&[
        Vertex::new(0.0, 0.0, CurveType::Stairs, 0.25),
        Vertex::new(1.0, 1.0, CurveType::Stairs, 0.0),
    ])
    .wrap_err("stairs preset")?;

    let wobble = Graph::from_vertices(&[
        Vertex::new(0.0, 0.2, CurveType::Wave, 0.8),
        Vertex::new(0.5, 0.9, CurveType::Linear, 0.0),
        Vertex::new(0.75, 0.4, CurveType::Exponential, 0.5),
        Vertex::new(1.0, 0.2, CurveType::Linear, 0.0),
    ])
    .wrap_err("wobble preset")?;

    Ok(vec![
        Preset {
            name: "ramp",
            graph: Graph::new(),
        },
        Preset {
            name: "triangle",
            graph: triangle,
        },
        Preset {
            name: "pluck",
            graph: pluck,
        },
        Preset {
            name: "swell",
            graph: swell,
        },
        Preset {
            name: "stairs",
            graph: stairs,
        },
        Preset {
            name: "wobble",
            graph: wobble,
        },
    ])
}

/// Main application builder
pub struct CurveLfo {
    bpm: f64,
    tone_hz: f32,
}

impl CurveLfo {
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            tone_hz: 220.0,
        }
    }

    /// Tempo of the internal transport
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Frequency of the test tone fed through the LFO
    pub fn tone(mut self, hz: f32) -> Self {
        self.tone_hz = hz;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        println!("=== curvelfo ===");
        println!("BPM: {}", self.bpm);
        println!("Sample rate: {} Hz", sample_rate);
        println!("Channels: {}", channels);
        println!("Test tone: {} Hz", self.tone_hz);
        println!();

        let presets = presets()?;

        let mut processor = Processor::new(ProcessorConfig {
            sample_rate,
            max_block_size: MAX_BLOCK_SIZE,
        });
        processor.set_transport(TransportInfo::playing(self.bpm, BEATS_PER_BAR));

        let publisher = processor.connect_handoff();
        let params = processor.params();

        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(SCOPE_RING_SIZE);
        let (mut state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(16);
        let (control_tx, mut control_rx) = RingBuffer::<ControlMessage>::new(16);

        let mut tone_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let mut tone_phase = 0.0f32;
        let tone_step = self.tone_hz / sample_rate;
        let bpm = self.bpm;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                while let Ok(message) = control_rx.pop() {
                    let mut transport = processor.transport();
                    match message {
                        ControlMessage::TogglePlayback => transport.playing = !transport.playing,
                        ControlMessage::Reset => {
                            transport = TransportInfo::playing(bpm, BEATS_PER_BAR);
                            processor.reset();
                        }
                    }
                    processor.set_transport(transport);
                }

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                    let tone = &mut tone_buf[..frames_to_render];
                    for sample in tone.iter_mut() {
                        *sample = 0.3 * (std::f32::consts::TAU * tone_phase).sin();
                        tone_phase = (tone_phase + tone_step).fract();
                    }

                    let block = &mut render_buf[..frames_to_render];
                    processor.process_mono(tone, block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        let _ = audio_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }

                let transport = processor.transport();
                let _ = state_tx.push(UiStateUpdate {
                    phase: processor.playhead_position(),
                    bar: transport.bar,
                    beat: transport.beat,
                    is_playing: transport.playing,
                });
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;

        stream.play()?;

        let static_state = UiStateInit::new(self.bpm, BEATS_PER_BAR, sample_rate, self.tone_hz);
        let mut app = UiApp::new(
            audio_rx,
            state_rx,
            control_tx,
            publisher,
            params,
            static_state,
            presets,
        );

        let mut terminal = ratatui::init();
        let result = app.run(&mut terminal);
        ratatui::restore();
        result
    }
}

impl Default for CurveLfo {
    fn default() -> Self {
        Self::new()
    }
}
