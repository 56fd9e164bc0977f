/*
LFO Rate
========

The rate parameter is a position in a table of musical ratios rather than a
frequency. Each entry says how many LFO cycles fit in one bar.

    index   0     1    2    3    4   5   6   7   8   9   10   11
    ratio   1/16  1/8  1/4  1/2  1   2   3   4   6   8   12   16
            ◄── slower (cycle spans bars)    faster (cycle per beat) ──►

BPM sync snaps the position to the nearest entry so the cycle stays locked
to the grid. Free-running mode reads between entries; the table grows
geometrically, so the blend is logarithmic:

    ratio = lo * (hi / lo)^frac

Free-running mode has no tempo to lean on, so one "bar" is a fixed
FREE_RUNNING_BAR_HZ (a 4/4 bar at 120 BPM lasts two seconds).
*/

/// Cycles per bar for each rate position.
pub const RATE_TABLE: [f64; 12] = [
    1.0 / 16.0,
    1.0 / 8.0,
    1.0 / 4.0,
    1.0 / 2.0,
    1.0,
    2.0,
    3.0,
    4.0,
    6.0,
    8.0,
    12.0,
    16.0,
];

/// Rate position of one cycle per bar.
pub const DEFAULT_RATE_POSITION: f32 = 4.0;

/// Bars per second assumed when not synced to a host tempo.
pub const FREE_RUNNING_BAR_HZ: f64 = 0.5;

/// Highest valid rate position.
pub fn max_position() -> f32 {
    (RATE_TABLE.len() - 1) as f32
}

/// Cycles per bar at a continuous rate position.
///
/// `position` is clamped to `[0, RATE_TABLE.len() - 1]`; NaN reads as the
/// slowest entry.
pub fn ratio_at(position: f32) -> f64 {
    let position = if position.is_nan() {
        0.0
    } else {
        f64::from(position.clamp(0.0, max_position()))
    };

    let index = position.floor() as usize;
    let frac = position - index as f64;
    let lo = RATE_TABLE[index];
    match RATE_TABLE.get(index + 1) {
        Some(&hi) if frac > 0.0 => lo * (hi / lo).powf(frac),
        _ => lo,
    }
}

/// Cycles per bar at the nearest table entry.
pub fn ratio_at_index(position: f32) -> f64 {
    let position = if position.is_nan() {
        0.0
    } else {
        position.round().clamp(0.0, max_position())
    };
    RATE_TABLE[position as usize]
}

/// Free-running LFO frequency in Hz for a rate position.
pub fn free_running_hz(position: f32) -> f64 {
    ratio_at(position) * FREE_RUNNING_BAR_HZ
}

/// Human-readable label for the nearest table entry ("1/4", "3", ...).
pub fn label(position: f32) -> &'static str {
    const LABELS: [&str; 12] = [
        "1/16", "1/8", "1/4", "1/2", "1", "2", "3", "4", "6", "8", "12", "16",
    ];
    let ratio = ratio_at_index(position);
    RATE_TABLE
        .iter()
        .position(|&r| r == ratio)
        .map_or("1", |index| LABELS[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries_are_exact() {
        for (index, &ratio) in RATE_TABLE.iter().enumerate() {
            assert_eq!(ratio_at(index as f32), ratio);
            assert_eq!(ratio_at_index(index as f32), ratio);
        }
    }

    #[test]
    fn test_interpolation_is_logarithmic() {
        // Halfway between 1 and 2 cycles per bar is sqrt(2)
        let ratio = ratio_at(4.5);
        assert!((ratio - 2f64.sqrt()).abs() < 1e-9, "got {}", ratio);
    }

    #[test]
    fn test_interpolation_is_monotonic() {
        let mut previous = ratio_at(0.0);
        for step in 1..=110 {
            let ratio = ratio_at(step as f32 * 0.1);
            assert!(ratio >= previous, "step {} fell from {} to {}", step, previous, ratio);
            previous = ratio;
        }
    }

    #[test]
    fn test_out_of_range_positions_clamp() {
        assert_eq!(ratio_at(-3.0), RATE_TABLE[0]);
        assert_eq!(ratio_at(99.0), RATE_TABLE[11]);
        assert_eq!(ratio_at(f32::NAN), RATE_TABLE[0]);
        assert_eq!(ratio_at_index(f32::INFINITY), RATE_TABLE[11]);
    }

    #[test]
    fn test_index_lookup_rounds() {
        assert_eq!(ratio_at_index(4.4), 1.0);
        assert_eq!(ratio_at_index(4.6), 2.0);
    }

    #[test]
    fn test_free_running_default() {
        // One cycle per bar, one bar every two seconds
        assert!((free_running_hz(DEFAULT_RATE_POSITION) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_labels() {
        assert_eq!(label(0.0), "1/16");
        assert_eq!(label(4.0), "1");
        assert_eq!(label(10.2), "12");
    }
}
