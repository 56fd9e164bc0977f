//! Hexadecimal floating-point literals (`0x1.8p-1`).
//!
//! The persisted graph stores every float in C99 `%a` form: the value is
//! written in base 2, so it survives a save/load cycle bit for bit and
//! never depends on the locale's decimal separator.
//!
//! Values are written as their `f64` widening, the same text a C program
//! gets from `printf("%a", (double)value)`.

use std::fmt::{self, Write};

const F64_MANTISSA_BITS: u32 = 52;
const F64_EXPONENT_BIAS: i32 = 1023;

/// Append the hexadecimal literal for `value` to `out`.
pub fn write_hex_f32<W: Write>(out: &mut W, value: f32) -> fmt::Result {
    write_hex_f64(out, f64::from(value))
}

/// Append the hexadecimal literal for `value` to `out`.
pub fn write_hex_f64<W: Write>(out: &mut W, value: f64) -> fmt::Result {
    if value.is_nan() {
        return out.write_str("nan");
    }
    if value.is_sign_negative() {
        out.write_char('-')?;
    }
    if value.is_infinite() {
        return out.write_str("inf");
    }
    if value == 0.0 {
        return out.write_str("0x0p+0");
    }

    let bits = value.to_bits();
    let biased = ((bits >> F64_MANTISSA_BITS) & 0x7ff) as i32;
    let mut mantissa = bits & ((1u64 << F64_MANTISSA_BITS) - 1);

    // Subnormals print with a 0 lead digit, as C does
    let (lead, exponent) = if biased == 0 {
        (0, 1 - F64_EXPONENT_BIAS)
    } else {
        (1, biased - F64_EXPONENT_BIAS)
    };

    write!(out, "0x{}", lead)?;
    if mantissa != 0 {
        // 52 bits = 13 hex digits; drop trailing zero digits
        let mut digits = 13;
        while mantissa & 0xf == 0 {
            mantissa >>= 4;
            digits -= 1;
        }
        write!(out, ".{:0width$x}", mantissa, width = digits)?;
    }
    write!(out, "p{:+}", exponent)
}

/// Hexadecimal literal for `value` as a new string.
pub fn format_hex_f32(value: f32) -> String {
    let mut out = String::with_capacity(16);
    // Writing into a String cannot fail
    let _ = write_hex_f32(&mut out, value);
    out
}

/// Parse a hexadecimal floating-point literal.
///
/// Accepts an optional sign, a `0x`/`0X` prefix, hex digits with an
/// optional `.`, and an optional binary exponent `p±N` (case-insensitive).
/// Text without the prefix is handed to the decimal parser, so hand-edited
/// values like `0.5` still load. Returns `None` on anything else.
pub fn parse_hex_f64(text: &str) -> Option<f64> {
    let text = text.trim();
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let body = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(body) => body,
        None => return parse_decimal(text),
    };

    let (digits, exponent) = match body.find(&['p', 'P'][..]) {
        Some(split) => {
            let exponent: i32 = body[split + 1..].parse().ok()?;
            (&body[..split], exponent)
        }
        None => (body, 0),
    };

    let mut mantissa: u64 = 0;
    let mut scale: i32 = 0;
    let mut seen_digit = false;
    let mut seen_point = false;

    for c in digits.chars() {
        if c == '.' {
            if seen_point {
                return None;
            }
            seen_point = true;
            continue;
        }

        let digit = c.to_digit(16)? as u64;
        seen_digit = true;

        if mantissa >> 60 == 0 {
            mantissa = (mantissa << 4) | digit;
            if seen_point {
                scale -= 4;
            }
        } else if !seen_point {
            // Out of precision: keep the magnitude, drop the digit
            scale += 4;
        }
    }

    if !seen_digit {
        return None;
    }

    // A zero mantissa is zero whatever the exponent; 0 * inf would be NaN
    let magnitude = if mantissa == 0 {
        0.0
    } else {
        (mantissa as f64) * 2f64.powi(exponent.saturating_add(scale))
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse a float literal as `f32` (hex or decimal).
pub fn parse_hex_f32(text: &str) -> Option<f32> {
    parse_hex_f64(text).map(|value| value as f32)
}

fn parse_decimal(text: &str) -> Option<f64> {
    // Reject the words Rust's parser accepts but a state string never holds
    if !text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
    {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matches_c() {
        assert_eq!(format_hex_f32(0.0), "0x0p+0");
        assert_eq!(format_hex_f32(1.0), "0x1p+0");
        assert_eq!(format_hex_f32(0.5), "0x1p-1");
        assert_eq!(format_hex_f32(0.75), "0x1.8p-1");
        assert_eq!(format_hex_f32(-0.25), "-0x1p-2");
        assert_eq!(format_hex_f32(3.0), "0x1.8p+1");
        // 0.1f widened to double
        assert_eq!(format_hex_f32(0.1), "0x1.99999ap-4");
    }

    #[test]
    fn test_parse_basic_literals() {
        assert_eq!(parse_hex_f32("0x0p+0"), Some(0.0));
        assert_eq!(parse_hex_f32("0x1p+0"), Some(1.0));
        assert_eq!(parse_hex_f32("0x1.8p-1"), Some(0.75));
        assert_eq!(parse_hex_f32("-0x1p-2"), Some(-0.25));
        assert_eq!(parse_hex_f32("0X1.8P+1"), Some(3.0));
        assert_eq!(parse_hex_f32("0x.8p0"), Some(0.5));
        assert_eq!(parse_hex_f32("0x10"), Some(16.0));
        assert_eq!(parse_hex_f32("  0x1p+0 "), Some(1.0));
    }

    #[test]
    fn test_parse_zero_with_huge_exponent() {
        assert_eq!(parse_hex_f32("0x0p+2000"), Some(0.0));
        assert_eq!(parse_hex_f32("0x0.000p-5000"), Some(0.0));
        let negative = parse_hex_f32("-0x0p+2000").expect("valid literal");
        assert!(negative == 0.0 && negative.is_sign_negative());
    }

    #[test]
    fn test_parse_decimal_fallback() {
        assert_eq!(parse_hex_f32("0.5"), Some(0.5));
        assert_eq!(parse_hex_f32("-1"), Some(-1.0));
        assert_eq!(parse_hex_f32("inf"), None);
        assert_eq!(parse_hex_f32("nan"), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_hex_f32(""), None);
        assert_eq!(parse_hex_f32("0x"), None);
        assert_eq!(parse_hex_f32("0xp+1"), None);
        assert_eq!(parse_hex_f32("0x1.2.3p0"), None);
        assert_eq!(parse_hex_f32("0x1g"), None);
        assert_eq!(parse_hex_f32("0x1p"), None);
        assert_eq!(parse_hex_f32("zero"), None);
    }

    #[test]
    fn test_roundtrip_is_bit_exact() {
        let values = [
            0.0f32,
            1.0,
            0.1,
            0.333_333_34,
            1e-30,
            f32::MIN_POSITIVE,
            f32::MIN_POSITIVE / 8.0,
            0.999_999_94,
            -0.7,
        ];
        for value in values {
            let text = format_hex_f32(value);
            let back = parse_hex_f32(&text).expect("parses");
            assert_eq!(back.to_bits(), value.to_bits(), "{} via {}", value, text);
        }
    }
}
