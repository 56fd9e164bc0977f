use crate::{
    clock::{rate, transport::TransportInfo},
    dsp::lfo::wrap_phase,
};

/*
Playhead
========

The playhead is the LFO's phase: where in the graph the current sample
reads from. It is kept in f64 so millions of tiny per-sample increments do
not drift.

Free-running
------------

    increment = hz / sample_rate          hz = ratio_at(rate) * FREE_RUNNING_BAR_HZ

The rate is read every sample, so a smoothed rate knob sweeps the speed
without jumps.

BPM sync
--------

Once per block the phase is recomputed from the host's musical position,
so the LFO lands on the same point of the cycle on every bar regardless of
where playback started:

    beats          = (bar - 1) * beats_per_bar + (beat - 1) + tick / ticks_per_beat
    bars_per_cycle = 1 / ratio
    phase          = frac(beats / (beats_per_bar * bars_per_cycle))

Within the block it advances at the tempo:

    increment = bpm / 60 / sample_rate / (beats_per_bar * bars_per_cycle)

A stopped (but valid) transport holds the phase where the host left it. A
transport without position information falls back to free-running.

The phase offset is added at read time, never stored, so turning it moves
the reading point without disturbing the running clock.
*/

/// How the playhead moves during the current block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    /// Advance from the rate parameter, sample by sample.
    FreeRunning,
    /// Advance by a fixed per-sample increment derived from the host tempo.
    Synced { increment: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct Playhead {
    phase: f64,
    sample_rate: f64,
}

impl Playhead {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            sample_rate: f64::from(sample_rate.max(1.0)),
        }
    }

    /// Current phase in `[0, 1)`, without offset.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Phase shifted by `offset`, wrapped into `[0, 1)`.
    #[inline]
    pub fn position(&self, offset: f32) -> f64 {
        wrap_phase(self.phase + f64::from(offset))
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = f64::from(sample_rate.max(1.0));
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Decide how the coming block advances.
    ///
    /// With `sync` on and a usable transport, snaps the phase to the host
    /// position and returns the tempo-derived increment.
    pub fn begin_block(
        &mut self,
        sync: bool,
        rate_position: f32,
        transport: &TransportInfo,
    ) -> ClockMode {
        if !sync || !transport.is_usable() {
            return ClockMode::FreeRunning;
        }

        let ratio = rate::ratio_at_index(rate_position);
        let beats_per_cycle = f64::from(transport.beats_per_bar) / ratio;

        self.phase = wrap_phase(transport.total_beats() / beats_per_cycle);

        let increment = if transport.playing {
            transport.beats_per_second() / self.sample_rate / beats_per_cycle
        } else {
            0.0
        };
        ClockMode::Synced { increment }
    }

    /// Per-sample increment when free-running at `rate_position`.
    #[inline]
    pub fn free_running_increment(&self, rate_position: f32) -> f64 {
        rate::free_running_hz(rate_position) / self.sample_rate
    }

    /// Step one sample forward.
    #[inline]
    pub fn advance(&mut self, mode: ClockMode, rate_position: f32) {
        let increment = match mode {
            ClockMode::FreeRunning => self.free_running_increment(rate_position),
            ClockMode::Synced { increment } => increment,
        };
        self.phase = wrap_phase(self.phase + increment);
    }
}
