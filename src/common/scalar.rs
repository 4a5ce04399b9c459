//! Exact integer codecs for numeric XML attributes.
//!
//! Attribute values such as identifiers and EMU coordinates must survive a
//! decode/encode cycle without any textual drift: no precision loss, no
//! scientific notation, no locale-dependent formatting, no leading zeros.
//! Parsing goes through `atoi_simd` directly over the attribute byte slice;
//! formatting goes through `itoa`. For every representable value `n`,
//! `parse(format(n)) == n`.

use crate::error::{DrawingError, Result};

/// Parse a signed 64-bit attribute value (offsets, EMU coordinates).
#[inline]
pub fn parse_i64(attr: &str, value: &[u8]) -> Result<i64> {
    atoi_simd::parse::<i64, false, false>(value).map_err(|_| numeric_error(attr, value))
}

/// Parse an unsigned 32-bit attribute value (identifiers).
///
/// Negative input is rejected as out of range rather than malformed.
#[inline]
pub fn parse_u32(attr: &str, value: &[u8]) -> Result<u32> {
    atoi_simd::parse::<u32, false, false>(value).map_err(|_| numeric_error(attr, value))
}

/// Parse an unsigned 64-bit attribute value (extents, EMU sizes).
///
/// Negative input is rejected as out of range rather than malformed.
#[inline]
pub fn parse_u64(attr: &str, value: &[u8]) -> Result<u64> {
    atoi_simd::parse::<u64, false, false>(value).map_err(|_| numeric_error(attr, value))
}

/// Format a signed 64-bit value exactly as it is parsed back.
#[inline]
pub fn format_i64(value: i64) -> String {
    itoa::Buffer::new().format(value).to_string()
}

/// Format an unsigned 32-bit value exactly as it is parsed back.
#[inline]
pub fn format_u32(value: u32) -> String {
    itoa::Buffer::new().format(value).to_string()
}

/// Format an unsigned 64-bit value exactly as it is parsed back.
#[inline]
pub fn format_u64(value: u64) -> String {
    itoa::Buffer::new().format(value).to_string()
}

/// Classify a failed numeric parse.
///
/// Text that is numeric in form but unrepresentable (overflow, or a sign
/// the target type cannot carry) is a range error; anything else is
/// malformed.
fn numeric_error(attr: &str, value: &[u8]) -> DrawingError {
    let text = String::from_utf8_lossy(value).into_owned();
    let digits = match value {
        [b'-', rest @ ..] => rest,
        rest => rest,
    };
    let numeric_form = !digits.is_empty() && digits.iter().all(u8::is_ascii_digit);

    if numeric_form {
        DrawingError::InvalidRange {
            attr: attr.to_string(),
            value: text,
        }
    } else {
        DrawingError::MalformedNumber {
            attr: attr.to_string(),
            value: text,
        }
    }
}
