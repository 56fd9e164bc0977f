#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Segment Curves
==============

A graph segment joins two vertices (x0, y0) and (x1, y1). The vertex on the
left owns the segment: its curve type and tension decide how the line bends
on the way to the next vertex.

Vocabulary
----------

  t           Local position inside the segment, 0.0 at the left vertex and
              1.0 at the right one:  t = (x - x0) / (x1 - x0)

  s           Shaped position. Each curve type maps t to s, then the output
              is blended between the two vertex heights:

                  y = y0 * (1 - s) + y1 * s

              This form returns y0 exactly when s = 0 and y1 exactly when
              s = 1, so segments always join without a step.

  tension     -1.0 .. +1.0. How hard the curve bends. 0.0 is always a
              straight line, whatever the curve type.


Curve Types
-----------

EXPONENTIAL (code 0)
    s = (e^(k t) - 1) / (e^k - 1),   k = tension * MAX_CURVE

        tension > 0         tension < 0
            │     ╱            │   ___
            │    ╱             │  ╱
            │__╱               │ ╱
            └────              └────
        slow start           fast start

    Same family as SuperCollider's Line with a curve argument. The
    denominator and the numerator meet at t = 1, so the right edge is hit
    exactly.

DOUBLE CURVE (code 1)
    Two mirrored exponential halves meeting at the segment midpoint.
    Positive tension gives an S (flat at both ends), negative an inverse S
    (steep at both ends).

STAIRS (code 2)
    t is quantised into n = round(|tension| * MAX_STAIRS) equal steps.
    Fewer than one step means no quantisation (a plain line).

WAVE (code 3)
    s = t + A * sin(2π * WAVE_CYCLES * t),   A = tension / 4
    A wobble around the straight line. The sine crosses zero at both ends.

LINEAR (code 4)
    s = t


Edge Cases
----------

  x0 == x1    A vertical jump. Left of the jump reads y0, right reads y1.
  x <= x0     Returns y0 as-is.
  x >= x1     Returns y1 as-is.
  NaN x       Falls through both comparisons; callers clamp first.
*/

/// Steepest exponent used by the exponential family at |tension| = 1.
pub const MAX_CURVE: f32 = 10.0;

/// Number of steps drawn by a stairs segment at |tension| = 1.
pub const MAX_STAIRS: f32 = 32.0;

/// Full sine periods drawn across a wave segment.
pub const WAVE_CYCLES: f32 = 4.0;

/// Interpolation law for the segment that follows a vertex.
///
/// The discriminants are the integer codes of the persisted graph format.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CurveType {
    #[default]
    Exponential = 0,
    DoubleCurve = 1,
    Stairs = 2,
    Wave = 3,
    Linear = 4,
}

impl CurveType {
    pub const ALL: [CurveType; 5] = [
        CurveType::Exponential,
        CurveType::DoubleCurve,
        CurveType::Stairs,
        CurveType::Wave,
        CurveType::Linear,
    ];

    /// Integer code used by the persisted state string.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Look up a curve type from its persisted code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(CurveType::Exponential),
            1 => Some(CurveType::DoubleCurve),
            2 => Some(CurveType::Stairs),
            3 => Some(CurveType::Wave),
            4 => Some(CurveType::Linear),
            _ => None,
        }
    }
}

/// Interpolate the segment `(x0, y0) → (x1, y1)` at `x`.
///
/// `tension` is clamped to `[-1, 1]` and `x` to the segment. Never allocates.
#[inline]
pub fn interpolate(
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    curve_type: CurveType,
    tension: f32,
    x: f32,
) -> f32 {
    if x <= x0 {
        return y0;
    }
    if x >= x1 {
        return y1;
    }

    // x0 < x < x1 here, so the width is positive
    let t = (x - x0) / (x1 - x0);
    let tension = tension.clamp(-1.0, 1.0);
    let s = shape(curve_type, tension, t);
    y0 * (1.0 - s) + y1 * s
}

/// Map a local position `t ∈ (0, 1)` through the curve law.
#[inline]
pub fn shape(curve_type: CurveType, tension: f32, t: f32) -> f32 {
    if tension == 0.0 {
        return t;
    }

    match curve_type {
        CurveType::Linear => t,
        CurveType::Exponential => exponential(tension, t),
        CurveType::DoubleCurve => double_curve(tension, t),
        CurveType::Stairs => stairs(tension, t),
        CurveType::Wave => wave(tension, t),
    }
}

#[inline]
fn exponential(tension: f32, t: f32) -> f32 {
    let k = tension * MAX_CURVE;
    // exp_m1 keeps precision for the small-k end of the range
    let s = (k * t).exp_m1() / k.exp_m1();
    s.clamp(0.0, 1.0)
}

#[inline]
fn double_curve(tension: f32, t: f32) -> f32 {
    if t < 0.5 {
        0.5 * exponential(tension, 2.0 * t)
    } else {
        1.0 - 0.5 * exponential(tension, 2.0 - 2.0 * t)
    }
}

#[inline]
fn stairs(tension: f32, t: f32) -> f32 {
    let steps = (tension.abs() * MAX_STAIRS).round();
    if steps < 1.0 {
        return t;
    }
    ((t * steps).floor() / steps).clamp(0.0, 1.0)
}

#[inline]
fn wave(tension: f32, t: f32) -> f32 {
    let amplitude = tension * 0.25;
    let s = t + amplitude * (std::f32::consts::TAU * WAVE_CYCLES * t).sin();
    s.clamp(0.0, 1.0)
}
