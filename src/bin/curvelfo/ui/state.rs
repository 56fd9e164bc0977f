//! Shared state types for UI communication
//!
//! Designed for real-time safety: static data is sent once at init,
//! dynamic updates are allocation-free.

/// Commands sent from UI thread to audio thread
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    /// Toggle the internal transport
    TogglePlayback,
    /// Back to bar 1, phase 0
    Reset,
}

/// Static state known before the stream starts (can allocate)
#[derive(Clone)]
pub struct UiStateInit {
    /// Tempo of the internal transport
    pub bpm: f64,
    /// Time signature numerator of the internal transport
    pub beats_per_bar: f32,
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Frequency of the test tone
    pub tone_hz: f32,
}

/// Dynamic state update sent from audio thread (allocation-free, Copy)
#[derive(Clone, Copy, Debug)]
pub struct UiStateUpdate {
    /// Playhead phase with offset, 0.0-1.0
    pub phase: f32,
    /// 1-based bar of the internal transport
    pub bar: i32,
    /// 1-based beat within the bar
    pub beat: i32,
    /// Whether the transport is running
    pub is_playing: bool,
}

impl UiStateInit {
    pub fn new(bpm: f64, beats_per_bar: f32, sample_rate: f32, tone_hz: f32) -> Self {
        Self {
            bpm,
            beats_per_bar,
            sample_rate,
            tone_hz,
        }
    }
}

impl UiStateUpdate {
    /// Create a new update with default values
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            bar: 1,
            beat: 1,
            is_playing: true,
        }
    }
}

impl Default for UiStateUpdate {
    fn default() -> Self {
        Self::new()
    }
}
