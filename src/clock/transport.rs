#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of the host's musical position, taken once per block.
///
/// `bar` and `beat` are 1-based as hosts report them. `tick` counts from
/// 0 within the current beat.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportInfo {
    pub playing: bool,
    /// False when the host has no bar/beat information.
    pub valid: bool,
    pub bar: i32,
    pub beat: i32,
    pub tick: f64,
    pub ticks_per_beat: f64,
    pub beats_per_bar: f32,
    pub bpm: f64,
}

impl TransportInfo {
    /// A stopped transport without position information.
    pub const STOPPED: TransportInfo = TransportInfo {
        playing: false,
        valid: false,
        bar: 1,
        beat: 1,
        tick: 0.0,
        ticks_per_beat: 960.0,
        beats_per_bar: 4.0,
        bpm: 120.0,
    };

    /// Playing transport at the top of bar 1.
    pub fn playing(bpm: f64, beats_per_bar: f32) -> Self {
        Self {
            playing: true,
            valid: true,
            bpm,
            beats_per_bar,
            ..Self::STOPPED
        }
    }

    /// Whether the position fields can drive a synced clock.
    pub fn is_usable(&self) -> bool {
        self.valid
            && self.bpm.is_finite()
            && self.bpm > 0.0
            && self.beats_per_bar.is_finite()
            && self.beats_per_bar > 0.0
            && self.ticks_per_beat.is_finite()
            && self.ticks_per_beat > 0.0
            && self.tick.is_finite()
    }

    /// Beats elapsed since the start of bar 1.
    pub fn total_beats(&self) -> f64 {
        f64::from(self.bar - 1) * f64::from(self.beats_per_bar)
            + f64::from(self.beat - 1)
            + self.tick / self.ticks_per_beat
    }

    /// Beats per second at the current tempo.
    pub fn beats_per_second(&self) -> f64 {
        self.bpm / 60.0
    }

    /// Move the position forward by `frames` samples.
    ///
    /// Lets a standalone host run its own transport the way a plugin host
    /// would report one.
    pub fn advance(&mut self, frames: usize, sample_rate: f64) {
        if !self.playing || !self.is_usable() || sample_rate <= 0.0 {
            return;
        }

        let beats = frames as f64 * self.beats_per_second() / sample_rate;
        self.tick += beats * self.ticks_per_beat;

        let whole_beats = (self.tick / self.ticks_per_beat).floor();
        self.tick = (self.tick - whole_beats * self.ticks_per_beat).max(0.0);

        // Bars and beats roll over in one step, whatever the tempo
        let beats_in_bar = (self.beats_per_bar.floor() as i64).max(1);
        let beat_index = (i64::from(self.beat) - 1).saturating_add(whole_beats as i64);
        let bar = i64::from(self.bar).saturating_add(beat_index.div_euclid(beats_in_bar));
        self.bar = i32::try_from(bar).unwrap_or(i32::MAX);
        self.beat = beat_index.rem_euclid(beats_in_bar) as i32 + 1;
    }

    /// Back to the top of bar 1.
    pub fn rewind(&mut self) {
        self.bar = 1;
        self.beat = 1;
        self.tick = 0.0;
    }
}

impl Default for TransportInfo {
    fn default() -> Self {
        Self::STOPPED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_beats() {
        let transport = TransportInfo {
            bar: 3,
            beat: 2,
            tick: 480.0,
            ..TransportInfo::playing(120.0, 4.0)
        };
        // Two full bars, one beat, half a beat
        assert!((transport.total_beats() - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_stopped_transport_is_not_usable() {
        assert!(!TransportInfo::STOPPED.is_usable());
        assert!(TransportInfo::playing(120.0, 4.0).is_usable());

        let zero_tempo = TransportInfo {
            bpm: 0.0,
            ..TransportInfo::playing(120.0, 4.0)
        };
        assert!(!zero_tempo.is_usable());
    }

    #[test]
    fn test_advance_rolls_beats_and_bars() {
        let mut transport = TransportInfo::playing(120.0, 4.0);
        // 120 BPM at 48 kHz: one beat every 24000 samples
        transport.advance(24_000 * 5, 48_000.0);
        assert_eq!(transport.bar, 2);
        assert_eq!(transport.beat, 2);
        assert!(transport.tick.abs() < 1e-6, "tick {}", transport.tick);
        assert!((transport.total_beats() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_at_absurd_tempo_returns() {
        let mut transport = TransportInfo::playing(1.0e12, 4.0);
        transport.advance(48_000, 48_000.0);

        assert_eq!(transport.bar, i32::MAX);
        assert!((1..=4).contains(&transport.beat), "beat {}", transport.beat);
        assert!(transport.tick >= 0.0 && transport.tick < transport.ticks_per_beat);
    }

    #[test]
    fn test_advance_ignored_when_stopped() {
        let mut transport = TransportInfo {
            playing: false,
            ..TransportInfo::playing(120.0, 4.0)
        };
        transport.advance(48_000, 48_000.0);
        assert_eq!(transport.total_beats(), 0.0);
    }

    #[test]
    fn test_rewind() {
        let mut transport = TransportInfo::playing(90.0, 3.0);
        transport.advance(100_000, 44_100.0);
        transport.rewind();
        assert_eq!(transport.total_beats(), 0.0);
    }
}
