use std::sync::atomic::{AtomicU32, Ordering};

use crate::{
    clock::rate::{max_position, DEFAULT_RATE_POSITION},
    dsp::smooth::ParamSmooth,
};

/// Default smoothing time in milliseconds.
pub const DEFAULT_SMOOTHING_MS: f32 = 20.0;

/// Hint flags a host uses to present a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamFlags {
    pub automatable: bool,
    pub integer: bool,
    pub boolean: bool,
    pub logarithmic: bool,
    pub output: bool,
}

impl ParamFlags {
    const CONTINUOUS: Self = Self {
        automatable: true,
        integer: false,
        boolean: false,
        logarithmic: false,
        output: false,
    };

    const LOGARITHMIC: Self = Self {
        logarithmic: true,
        ..Self::CONTINUOUS
    };

    const INTEGER: Self = Self {
        integer: true,
        ..Self::CONTINUOUS
    };

    const TOGGLE: Self = Self {
        integer: true,
        boolean: true,
        ..Self::CONTINUOUS
    };

    const OUTPUT: Self = Self {
        automatable: false,
        integer: false,
        boolean: false,
        logarithmic: false,
        output: true,
    };
}

/// Static description of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub flags: ParamFlags,
}

impl ParamInfo {
    /// Clamp `value` into range, rounding integer parameters.
    ///
    /// NaN falls back to the default.
    pub fn sanitize(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let value = value.clamp(self.min, self.max);
        if self.flags.integer {
            value.round()
        } else {
            value
        }
    }
}

/// Every parameter, in host index order.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    PreGain,
    Wet,
    PostGain,
    HorizontalWarpType,
    HorizontalWarpAmount,
    VerticalWarpType,
    VerticalWarpAmount,
    LfoRate,
    BpmSync,
    Phase,
    Smoothing,
    BipolarMode,
    PlayheadPos,
}

impl Param {
    pub const COUNT: usize = 13;

    pub const ALL: [Param; Param::COUNT] = [
        Param::PreGain,
        Param::Wet,
        Param::PostGain,
        Param::HorizontalWarpType,
        Param::HorizontalWarpAmount,
        Param::VerticalWarpType,
        Param::VerticalWarpAmount,
        Param::LfoRate,
        Param::BpmSync,
        Param::Phase,
        Param::Smoothing,
        Param::BipolarMode,
        Param::PlayheadPos,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Param> {
        Self::ALL.get(index).copied()
    }

    pub fn from_symbol(symbol: &str) -> Option<Param> {
        Self::ALL.iter().copied().find(|p| p.info().symbol == symbol)
    }

    pub fn info(self) -> ParamInfo {
        let (name, symbol, min, max, default, flags) = match self {
            Param::PreGain => ("Pre Gain", "pregain", 0.0, 2.0, 1.0, ParamFlags::LOGARITHMIC),
            Param::Wet => ("Wet", "wet", 0.0, 1.0, 1.0, ParamFlags::CONTINUOUS),
            Param::PostGain => ("Post Gain", "postgain", 0.0, 1.0, 1.0, ParamFlags::LOGARITHMIC),
            Param::HorizontalWarpType => ("H Warp Type", "warptype", 0.0, 6.0, 0.0, ParamFlags::INTEGER),
            Param::HorizontalWarpAmount => {
                ("H Warp Amount", "warpamount", 0.0, 1.0, 0.0, ParamFlags::CONTINUOUS)
            }
            Param::VerticalWarpType => ("V Warp Type", "vwarptype", 0.0, 6.0, 0.0, ParamFlags::INTEGER),
            Param::VerticalWarpAmount => {
                ("V Warp Amount", "vwarpamount", 0.0, 1.0, 0.0, ParamFlags::CONTINUOUS)
            }
            Param::LfoRate => (
                "LFO Rate",
                "lforate",
                0.0,
                max_position(),
                DEFAULT_RATE_POSITION,
                ParamFlags::CONTINUOUS,
            ),
            Param::BpmSync => ("BPM Sync", "bpmsync", 0.0, 1.0, 0.0, ParamFlags::TOGGLE),
            Param::Phase => ("Phase", "phase", 0.0, 1.0, 0.0, ParamFlags::CONTINUOUS),
            Param::Smoothing => (
                "Smoothing",
                "smoothing",
                1.0,
                200.0,
                DEFAULT_SMOOTHING_MS,
                ParamFlags::CONTINUOUS,
            ),
            Param::BipolarMode => ("Bipolar Mode", "bipolarmode", 0.0, 1.0, 0.0, ParamFlags::TOGGLE),
            Param::PlayheadPos => ("Playhead", "playhead", 0.0, 1.0, 0.0, ParamFlags::OUTPUT),
        };

        ParamInfo {
            name,
            symbol,
            min,
            max,
            default,
            flags,
        }
    }
}

/// Parameter values shared between the control and audio threads.
///
/// Each value is an `f32` stored as its bit pattern in an `AtomicU32`, so
/// either side can read or write without locking. The audio side reads each
/// value once per block.
#[derive(Debug)]
pub struct ParamStore {
    values: [AtomicU32; Param::COUNT],
}

impl ParamStore {
    /// A store holding every parameter's default.
    pub fn new() -> Self {
        Self {
            values: Param::ALL.map(|p| AtomicU32::new(p.info().default.to_bits())),
        }
    }

    /// Write a value, clamped to the parameter's range.
    pub fn set(&self, param: Param, value: f32) {
        let value = param.info().sanitize(value);
        self.values[param.index()].store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self, param: Param) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Relaxed))
    }

    /// Toggle parameters read as booleans.
    pub fn is_on(&self, param: Param) -> bool {
        self.get(param) >= 0.5
    }

    /// Restore every input parameter to its default.
    pub fn reset(&self) {
        for param in Param::ALL {
            self.set(param, param.info().default);
        }
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-parameter smoothers owned by the audio thread.
#[derive(Debug, Clone)]
pub struct SmoothedParams {
    smoothers: [ParamSmooth; Param::COUNT],
    time_ms: f32,
    sample_rate: f32,
}

impl SmoothedParams {
    pub fn new(sample_rate: f32) -> Self {
        let mut params = Self {
            smoothers: Param::ALL.map(|p| ParamSmooth::new(p.info().default)),
            time_ms: DEFAULT_SMOOTHING_MS,
            sample_rate,
        };
        params.apply_time_constant();
        params
    }

    /// Pull fresh targets from the shared store.
    ///
    /// Re-derives the coefficients when the `Smoothing` parameter moved.
    pub fn update_from(&mut self, store: &ParamStore) {
        let time_ms = store.get(Param::Smoothing);
        if time_ms != self.time_ms {
            self.time_ms = time_ms;
            self.apply_time_constant();
        }

        for param in Param::ALL {
            self.smoothers[param.index()].set_target(store.get(param));
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.apply_time_constant();
    }

    /// Next smoothed value for `param`.
    #[inline]
    pub fn next(&mut self, param: Param) -> f32 {
        self.smoothers[param.index()].next()
    }

    /// Latest target for `param`, unsmoothed.
    pub fn raw(&self, param: Param) -> f32 {
        self.smoothers[param.index()].raw_value()
    }

    /// Jump every smoother to its target.
    pub fn snap(&mut self) {
        for smoother in &mut self.smoothers {
            smoother.snap();
        }
    }

    fn apply_time_constant(&mut self) {
        for smoother in &mut self.smoothers {
            smoother.set_time_constant(self.time_ms, self.sample_rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_order() {
        for (index, param) in Param::ALL.iter().enumerate() {
            assert_eq!(param.index(), index);
            assert_eq!(Param::from_index(index), Some(*param));
        }
        assert_eq!(Param::from_index(Param::COUNT), None);
    }

    #[test]
    fn test_symbols_are_unique() {
        for a in Param::ALL {
            for b in Param::ALL {
                if a != b {
                    assert_ne!(a.info().symbol, b.info().symbol);
                }
            }
        }
        assert_eq!(Param::from_symbol("vwarpamount"), Some(Param::VerticalWarpAmount));
        assert_eq!(Param::from_symbol("nope"), None);
    }

    #[test]
    fn test_defaults_are_in_range() {
        for param in Param::ALL {
            let info = param.info();
            assert!(
                info.min <= info.default && info.default <= info.max,
                "{} default {} outside [{}, {}]",
                info.name,
                info.default,
                info.min,
                info.max
            );
        }
    }

    #[test]
    fn test_store_clamps_and_rounds() {
        let store = ParamStore::new();
        store.set(Param::PreGain, 5.0);
        assert_eq!(store.get(Param::PreGain), 2.0);

        store.set(Param::HorizontalWarpType, 3.6);
        assert_eq!(store.get(Param::HorizontalWarpType), 4.0);

        store.set(Param::Wet, f32::NAN);
        assert_eq!(store.get(Param::Wet), 1.0);

        store.set(Param::BpmSync, 1.0);
        assert!(store.is_on(Param::BpmSync));

        store.reset();
        assert_eq!(store.get(Param::PreGain), 1.0);
        assert!(!store.is_on(Param::BpmSync));
    }

    #[test]
    fn test_smoothed_params_glide() {
        let store = ParamStore::new();
        let mut smoothed = SmoothedParams::new(48_000.0);

        store.set(Param::Wet, 0.0);
        smoothed.update_from(&store);
        assert_eq!(smoothed.raw(Param::Wet), 0.0);

        let first = smoothed.next(Param::Wet);
        assert!(first < 1.0 && first > 0.9, "first step {}", first);

        smoothed.snap();
        assert_eq!(smoothed.next(Param::Wet), 0.0);
    }
}
