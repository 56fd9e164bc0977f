//! Low Frequency Oscillator (LFO) helpers.

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at sub-audio rates whose output moves a
parameter rather than being heard directly. Here the waveform is not a
sine or a saw but whatever the user drew in the graph: the playhead sweeps
phase 0.0 → 1.0 once per cycle and the graph answers with a height.

Vocabulary
----------

  phase       Position inside one cycle, 0.0 (start) to 1.0 (end). Wraps
              back to 0.0 when it passes 1.0.

  period      Time for one complete cycle.
              At 2 Hz: period = 1/2 = 0.5 seconds

  unipolar    Output between 0.0 and 1.0. The graph always stores its
              vertices this way. As a gain it fades the signal between
              silence and full level (tremolo).

  bipolar     Output between -1.0 and +1.0. Used as a gain it also flips
              the signal polarity on the lower half of the graph, which
              gives a ring-modulation flavour at fast rates.

                  bipolar = unipolar * 2.0 - 1.0

              unipolar   bipolar
              0.0        -1.0
              0.5         0.0
              1.0        +1.0
*/

/// Convert unipolar signal (0.0 to 1.0) to bipolar (-1.0 to +1.0).
///
/// Used by the processor's bipolar mode on the graph output.
#[inline]
pub fn unipolar_to_bipolar(unipolar: f32) -> f32 {
    (unipolar * 2.0) - 1.0
}

/// Calculate LFO period in seconds from frequency.
///
/// # Example
/// ```
/// use curve_lfo::dsp::lfo::period_from_frequency;
/// let period = period_from_frequency(0.5);
/// assert!((period - 2.0).abs() < 1e-6); // 0.5 Hz = one cycle every 2s
/// ```
#[inline]
pub fn period_from_frequency(frequency_hz: f32) -> f32 {
    1.0 / frequency_hz
}

/// Calculate samples per LFO period.
///
/// # Example
/// ```
/// use curve_lfo::dsp::lfo::samples_per_period;
/// let samples = samples_per_period(0.5, 48000.0);
/// assert_eq!(samples, 96000.0);
/// ```
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}

/// Wrap a running phase back into `[0, 1)`.
///
/// Non-finite input resets to 0.0.
#[inline]
pub fn wrap_phase(phase: f64) -> f64 {
    if !phase.is_finite() {
        return 0.0;
    }
    let wrapped = phase - phase.floor();
    // phase - floor can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
