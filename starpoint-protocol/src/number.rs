//! Decimal angle parsing
//!
//! The host formats angles as plain decimals (`157.2300`, `-12.5`). Two
//! readings of a field are offered:
//!
//! - [`parse_angle`] is strict: the whole field must be an optionally signed
//!   decimal with an optional fractional part.
//! - [`lenient_angle`] takes the longest leading decimal prefix and falls
//!   back to `0.0` when there is none, so `"42.1deg"` reads as `42.1` and
//!   `"north"` reads as `0.0`.

/// Errors from strict angle parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NumberError {
    /// Field was empty or whitespace only
    Empty,
    /// Field contained something other than a signed decimal
    Invalid,
}

/// Length of the longest `[+-]?digits[.digits]` prefix of `text`
///
/// Returns 0 if the prefix contains no digit at all.
fn decimal_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut digits = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let dot = i;
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
        // "12." is fine, "." alone is not
        if digits == 0 {
            i = dot;
        }
    }

    if digits == 0 {
        0
    } else {
        i
    }
}

/// Parse a decimal angle, rejecting anything that is not fully numeric
///
/// Accepts `[+-]?digits[.digits]`, `[+-]?.digits` and `[+-]?digits.` with
/// surrounding whitespace. Exponents, `inf` and `nan` are rejected, as is
/// a digit string too long to fit in an `f32`.
pub fn parse_angle(text: &str) -> Result<f32, NumberError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NumberError::Empty);
    }

    let len = decimal_prefix_len(text);
    if len == 0 || len != text.len() {
        return Err(NumberError::Invalid);
    }

    match text.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(NumberError::Invalid),
    }
}

/// Parse a decimal angle, degrading malformed input to zero
///
/// Leading whitespace is skipped, then the longest decimal prefix is used.
/// A field with no numeric prefix yields `0.0`, indistinguishable from a
/// genuine zero. So does a prefix that overflows `f32`.
pub fn lenient_angle(text: &str) -> f32 {
    let text = text.trim_start();
    let len = decimal_prefix_len(text);
    if len == 0 {
        return 0.0;
    }
    match text[..len].parse::<f32>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}
