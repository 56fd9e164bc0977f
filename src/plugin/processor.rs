use std::sync::Arc;

use log::{debug, warn};

#[cfg(feature = "rtrb")]
use crate::plugin::handoff::{graph_channel, GraphPublisher, GraphReceiver};
use crate::{
    clock::{playhead::Playhead, transport::TransportInfo},
    dsp::{lfo::unipolar_to_bipolar, warp::WarpType},
    error::ParseError,
    graph::{Graph, STATE_KEY},
    plugin::params::{Param, ParamStore, SmoothedParams},
    MAX_BLOCK_SIZE,
};

/*
Block Processing
================

The processor applies the LFO as a gain to a stereo signal.

    in ──► × pre_gain ──► flush ──┬────────────────────────────┐ dry
                                  │                            ▼
                                  └──► × graph(playhead) ──► mix ──► × post_gain ──► out
                                                              wet

Per block
---------
  1. swap in a pending graph, if one was published
  2. pull parameter targets from the shared store
  3. set the warp types (rounded, no smoothing)
  4. sync the playhead to the host transport when BPM sync is on

Per sample
----------
  * warp amounts, gains, wet and rate are smoothed
  * tiny negative inputs are flushed to zero before they turn denormal
  * in bipolar mode the graph's [0, 1] output is stretched to [-1, 1]

Nothing on this path allocates, locks or logs.
*/

/// Negative inputs closer to zero than this are flushed.
const DENORMAL_FLOOR: f32 = -0.00001;

/// Audio settings fixed for the lifetime of a processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessorConfig {
    pub sample_rate: f32,
    /// Frames handled per internal block; transport sync and graph swaps
    /// happen at this granularity.
    pub max_block_size: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_block_size: MAX_BLOCK_SIZE,
        }
    }
}

pub struct Processor {
    config: ProcessorConfig,
    graph: Box<Graph>,
    params: Arc<ParamStore>,
    smoothed: SmoothedParams,
    playhead: Playhead,
    transport: TransportInfo,
    #[cfg(feature = "rtrb")]
    receiver: Option<GraphReceiver>,
}

impl Processor {
    /// A processor running the default graph with default parameters.
    pub fn new(config: ProcessorConfig) -> Self {
        let config = ProcessorConfig {
            sample_rate: if config.sample_rate > 0.0 {
                config.sample_rate
            } else {
                ProcessorConfig::default().sample_rate
            },
            max_block_size: config.max_block_size.max(1),
        };

        let mut smoothed = SmoothedParams::new(config.sample_rate);
        smoothed.snap();

        Self {
            config,
            graph: Box::new(Graph::new()),
            params: Arc::new(ParamStore::new()),
            smoothed,
            playhead: Playhead::new(config.sample_rate),
            transport: TransportInfo::STOPPED,
            #[cfg(feature = "rtrb")]
            receiver: None,
        }
    }

    /// Create the graph handoff and keep its audio end.
    ///
    /// Replaces any previous handoff; graphs pending on it are dropped.
    #[cfg(feature = "rtrb")]
    pub fn connect_handoff(&mut self) -> GraphPublisher {
        let (publisher, receiver) = graph_channel();
        self.receiver = Some(receiver);
        publisher
    }

    pub fn config(&self) -> ProcessorConfig {
        self.config
    }

    /// Follow a host sample-rate change. Keeps the phase; non-positive
    /// rates are ignored. Not for use from the audio thread mid-block.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate.is_nan() || sample_rate <= 0.0 {
            return;
        }
        self.config.sample_rate = sample_rate;
        self.playhead.set_sample_rate(sample_rate);
        self.smoothed.set_sample_rate(sample_rate);
    }

    /// Shared parameter store, for control threads.
    pub fn params(&self) -> Arc<ParamStore> {
        Arc::clone(&self.params)
    }

    pub fn set_param(&self, param: Param, value: f32) {
        self.params.set(param, value);
    }

    pub fn param(&self, param: Param) -> f32 {
        self.params.get(param)
    }

    /// The active graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Replace the active graph directly. Not for use from the audio thread.
    pub fn replace_graph(&mut self, graph: Graph) {
        let mut graph = Box::new(graph);
        graph.copy_warps_from(&self.graph);
        self.graph = graph;
    }

    /// Apply a persisted state entry.
    ///
    /// Unknown keys are ignored. A string that fails to parse leaves the
    /// active graph untouched and the error is returned.
    pub fn set_state(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        if key != STATE_KEY {
            debug!("ignoring unknown state key `{}`", key);
            return Ok(());
        }

        match self.graph.rebuild_from_str(value) {
            Ok(()) => {
                debug!("graph restored with {} vertices", self.graph.vertex_count());
                Ok(())
            }
            Err(err) => {
                warn!("rejected graph state: {}", err);
                Err(err)
            }
        }
    }

    /// Persisted value for `key`, if it is one this processor stores.
    pub fn state(&self, key: &str) -> Option<String> {
        (key == STATE_KEY).then(|| self.graph.to_state_string())
    }

    /// Restore from saved state, falling back to the default graph.
    pub fn restore_state_or_default(&mut self, value: Option<&str>) {
        let restored = value.and_then(|text| self.graph.rebuild_from_str(text).ok());
        if restored.is_none() {
            self.graph.reset();
        }
    }

    pub fn set_transport(&mut self, transport: TransportInfo) {
        self.transport = transport;
    }

    pub fn transport(&self) -> TransportInfo {
        self.transport
    }

    /// Playhead phase, phase offset included.
    pub fn playhead_position(&self) -> f32 {
        self.playhead.position(self.smoothed.raw(Param::Phase)) as f32
    }

    /// Restart the cycle and snap every smoother to its target.
    pub fn reset(&mut self) {
        self.playhead.reset();
        self.smoothed.update_from(&self.params);
        self.smoothed.snap();
    }

    /// Process a stereo block.
    ///
    /// Handles `min(len)` frames across all four buffers, in internal
    /// blocks of at most `max_block_size`. Realtime-safe.
    pub fn process(&mut self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2]) {
        let [in_l, in_r] = inputs;
        let [out_l, out_r] = outputs;
        let frames = in_l
            .len()
            .min(in_r.len())
            .min(out_l.len())
            .min(out_r.len());

        let mut start = 0;
        while start < frames {
            let end = (start + self.config.max_block_size).min(frames);
            self.process_block(
                &in_l[start..end],
                &in_r[start..end],
                &mut out_l[start..end],
                &mut out_r[start..end],
            );
            start = end;
        }
    }

    /// Process mono input into a mono output.
    pub fn process_mono(&mut self, input: &[f32], output: &mut [f32]) {
        let frames = input.len().min(output.len());
        let mut start = 0;
        while start < frames {
            let end = (start + self.config.max_block_size).min(frames);
            let block = &mut output[start..end];
            block.copy_from_slice(&input[start..end]);
            self.run_block(block.len(), |i, gains| apply_gains(&mut block[i], gains));
            start = end;
        }
    }

    fn process_block(
        &mut self,
        in_l: &[f32],
        in_r: &[f32],
        out_l: &mut [f32],
        out_r: &mut [f32],
    ) {
        out_l.copy_from_slice(in_l);
        out_r.copy_from_slice(in_r);
        self.run_block(in_l.len(), |i, gains| {
            apply_gains(&mut out_l[i], gains);
            apply_gains(&mut out_r[i], gains);
        });
    }

    /// Shared block loop. `sample` is called once per frame with the frame
    /// index and the gains to apply to each of its channels.
    fn run_block<F>(&mut self, frames: usize, mut sample: F)
    where
        F: FnMut(usize, &FrameGains),
    {
        #[cfg(feature = "rtrb")]
        if let Some(receiver) = self.receiver.as_mut() {
            receiver.swap_pending(&mut self.graph);
        }

        self.smoothed.update_from(&self.params);

        self.graph
            .set_horizontal_warp_type(WarpType::from_param(self.smoothed.raw(Param::HorizontalWarpType)));
        self.graph
            .set_vertical_warp_type(WarpType::from_param(self.smoothed.raw(Param::VerticalWarpType)));

        let sync = self.smoothed.raw(Param::BpmSync) >= 0.5;
        let bipolar = self.smoothed.raw(Param::BipolarMode) >= 0.5;
        let offset = self.smoothed.raw(Param::Phase);
        let mode = self.playhead.begin_block(
            sync,
            self.smoothed.raw(Param::LfoRate),
            &self.transport,
        );

        for i in 0..frames {
            self.graph
                .set_horizontal_warp_amount(self.smoothed.next(Param::HorizontalWarpAmount));
            self.graph
                .set_vertical_warp_amount(self.smoothed.next(Param::VerticalWarpAmount));

            let rate = self.smoothed.next(Param::LfoRate);

            let mut lfo = self.graph.value_at(self.playhead.position(offset) as f32);
            if bipolar {
                lfo = unipolar_to_bipolar(lfo);
            }

            let gains = FrameGains {
                pre_gain: self.smoothed.next(Param::PreGain),
                lfo,
                wet: self.smoothed.next(Param::Wet),
                post_gain: self.smoothed.next(Param::PostGain),
            };
            sample(i, &gains);

            self.playhead.advance(mode, rate);
        }

        self.transport.advance(frames, f64::from(self.config.sample_rate));
        self.params
            .set(Param::PlayheadPos, self.playhead.position(offset) as f32);
    }
}

/// Gains for one frame, shared by every channel.
struct FrameGains {
    pre_gain: f32,
    lfo: f32,
    wet: f32,
    post_gain: f32,
}

/// Run one channel's sample through the gain stages, in place.
#[inline]
fn apply_gains(sample: &mut f32, gains: &FrameGains) {
    let mut input = gains.pre_gain * *sample;
    if input < 0.0 && input > DENORMAL_FLOOR {
        input = 0.0;
    }

    let dry = 1.0 - gains.wet;
    let shaped = input * gains.lfo;
    *sample = (dry * input + gains.wet * shaped) * gains.post_gain;
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}
