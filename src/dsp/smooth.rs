use crate::MIN_TIME;

/*
Parameter Smoothing
===================

Host parameters arrive in steps: a knob turned from 0.2 to 0.8 shows up as
one jump between two audio blocks. Fed straight into a gain stage, that
jump is an audible click. A one-pole low-pass turns the step into a short
exponential glide.

    y[n] = y[n-1] + (target - y[n-1]) * coeff

    coeff = 1 - e^(-1 / (time_constant * sample_rate))

After one time constant the output has covered ~63% of the distance to the
target, after five it is within 1%.

The raw (unsmoothed) value is kept alongside so hosts can read back exactly
what they wrote.
*/

/// One-pole smoother for a single parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSmooth {
    target: f32,
    current: f32,
    coeff: f32,
}

impl ParamSmooth {
    /// Create a smoother resting at `value`.
    ///
    /// Until [`ParamSmooth::set_time_constant`] is called the smoother jumps
    /// straight to new targets.
    pub fn new(value: f32) -> Self {
        Self {
            target: value,
            current: value,
            coeff: 1.0,
        }
    }

    /// Set the time constant in milliseconds for the given sample rate.
    pub fn set_time_constant(&mut self, time_ms: f32, sample_rate: f32) {
        let seconds = (time_ms / 1000.0).max(MIN_TIME);
        self.coeff = 1.0 - (-1.0 / (seconds * sample_rate)).exp();
    }

    pub fn set_target(&mut self, value: f32) {
        self.target = value;
    }

    /// The value most recently written, without smoothing.
    pub fn raw_value(&self) -> f32 {
        self.target
    }

    /// The current smoothed value, without advancing.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.coeff;
        self.current
    }

    /// Jump to the target immediately.
    pub fn snap(&mut self) {
        self.current = self.target;
    }
}

impl Default for ParamSmooth {
    fn default() -> Self {
        Self::new(0.0)
    }
}
