#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Warp Transforms
===============

A warp bends one axis of the graph without touching its vertices. The
horizontal warp is applied to the playhead phase before the segment lookup,
the vertical warp to the looked-up value afterwards.

Every warp is a bijection on [0, 1]: 0 stays 0, 1 stays 1, and the mapping
is strictly increasing in between. With amount = 0 the input is returned
unchanged, for every type.


Bend
----

A power law, p = MAX_BEND^amount (1.0 at amount = 0, MAX_BEND at 1).

  BEND +      1 - (1 - u)^p    rushes through the start, lingers at the end
  BEND -      u^p              lingers at the start, rushes at the end
  BEND +/-    0.5 * (2u)^p below the midpoint, mirrored above it

A steep power flattens below f32 resolution near its flat end (at p = 8,
1 - (1 - u)^8 is exactly 1.0 for the top tenth of the range). A small share
of u is blended back in so the slope never reaches zero:

    bend(u) = (1 - BEND_SLOPE) * power(u) + BEND_SLOPE * u

      BEND +        BEND -        BEND +/-
     │  ___        │     ╱       │    __
     │ ╱           │    ╱        │   ╱
     │╱            │ __╱         │__╱
     └────         └────         └────


Skew
----

A rational map that moves the midpoint while keeping both ends fixed:

    f_k(u) = k u / (1 + (k - 1) u),      k = MAX_SKEW^amount

f_k(0.5) = k / (k + 1), so larger k pushes the middle of the cycle earlier.
f_(1/k) is the exact inverse of f_k.

  SKEW +      f_k
  SKEW -      f_(1/k)
  SKEW +/-    f_k on the lower half, f_(1/k) on the upper half


Automation
----------

Both exponents are continuous in amount, so sweeping the amount knob at
audio rate never produces a jump in the output.
*/

/// Bend exponent at amount = 1.
pub const MAX_BEND: f32 = 8.0;

/// Share of the identity mixed into every bend.
const BEND_SLOPE: f32 = 1.0e-3;

/// Skew ratio at amount = 1.
pub const MAX_SKEW: f32 = 8.0;

/// Warp family applied to one axis.
///
/// Discriminants match the integer range of the warp-type parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum WarpType {
    #[default]
    None = 0,
    BendPlus = 1,
    BendMinus = 2,
    BendPlusMinus = 3,
    SkewPlus = 4,
    SkewMinus = 5,
    SkewPlusMinus = 6,
}

impl WarpType {
    pub const ALL: [WarpType; 7] = [
        WarpType::None,
        WarpType::BendPlus,
        WarpType::BendMinus,
        WarpType::BendPlusMinus,
        WarpType::SkewPlus,
        WarpType::SkewMinus,
        WarpType::SkewPlusMinus,
    ];

    /// Convert a (possibly fractional) parameter value to a warp type.
    ///
    /// The value is rounded and clamped into the valid range.
    pub fn from_param(value: f32) -> Self {
        if !value.is_finite() {
            return WarpType::None;
        }
        let index = value.round().clamp(0.0, 6.0) as usize;
        Self::ALL[index]
    }

    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            WarpType::None => "-",
            WarpType::BendPlus => "BEND +",
            WarpType::BendMinus => "BEND -",
            WarpType::BendPlusMinus => "BEND +/-",
            WarpType::SkewPlus => "SKEW +",
            WarpType::SkewMinus => "SKEW -",
            WarpType::SkewPlusMinus => "SKEW +/-",
        }
    }

    /// Next type, wrapping around after the last one.
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// Previous type, wrapping around before the first one.
    pub fn previous(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A warp type paired with its amount.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Warp {
    pub kind: WarpType,
    pub amount: f32,
}

impl Warp {
    pub const IDENTITY: Warp = Warp {
        kind: WarpType::None,
        amount: 0.0,
    };

    pub fn new(kind: WarpType, amount: f32) -> Self {
        Self { kind, amount }
    }

    #[inline]
    pub fn apply(&self, u: f32) -> f32 {
        warp(self.kind, self.amount, u)
    }
}

/// Apply a warp to `u`.
///
/// `u` and `amount` are clamped to `[0, 1]`; NaN inputs are treated as 0.
#[inline]
pub fn warp(kind: WarpType, amount: f32, u: f32) -> f32 {
    let u = clamp_unit(u);
    let amount = clamp_unit(amount);
    if amount == 0.0 {
        return u;
    }

    match kind {
        WarpType::None => u,
        WarpType::BendPlus => bend_plus(amount, u),
        WarpType::BendMinus => bend_minus(amount, u),
        WarpType::BendPlusMinus => bend_plus_minus(amount, u),
        WarpType::SkewPlus => skew(MAX_SKEW.powf(amount), u),
        WarpType::SkewMinus => skew(MAX_SKEW.powf(-amount), u),
        WarpType::SkewPlusMinus => skew_plus_minus(amount, u),
    }
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[inline]
fn bend_exponent(amount: f32) -> f32 {
    MAX_BEND.powf(amount)
}

#[inline]
fn keep_slope(shaped: f32, u: f32) -> f32 {
    (1.0 - BEND_SLOPE) * shaped + BEND_SLOPE * u
}

#[inline]
fn bend_plus(amount: f32, u: f32) -> f32 {
    keep_slope(1.0 - (1.0 - u).powf(bend_exponent(amount)), u)
}

#[inline]
fn bend_minus(amount: f32, u: f32) -> f32 {
    keep_slope(u.powf(bend_exponent(amount)), u)
}

#[inline]
fn bend_plus_minus(amount: f32, u: f32) -> f32 {
    let p = bend_exponent(amount);
    let shaped = if u < 0.5 {
        0.5 * (2.0 * u).powf(p)
    } else {
        1.0 - 0.5 * (2.0 - 2.0 * u).powf(p)
    };
    keep_slope(shaped, u)
}

#[inline]
fn skew(k: f32, u: f32) -> f32 {
    k * u / (1.0 + (k - 1.0) * u)
}

#[inline]
fn skew_plus_minus(amount: f32, u: f32) -> f32 {
    let k = MAX_SKEW.powf(amount);
    if u < 0.5 {
        0.5 * skew(k, 2.0 * u)
    } else {
        0.5 + 0.5 * skew(1.0 / k, 2.0 * u - 1.0)
    }
}
