//! Parsing and display of textual traffic quantities.
//!
//! Quantities arrive as strings like `"900B"`, `"1K"` or `"12.5MB"`: a
//! base-10 number followed by an optional multiplier letter (`K`, `M`, `G`,
//! `T`, upper-case only) and an optional trailing unit letter. Multipliers
//! scale by powers of 1024, not 1000. The suffix grammar is fixed-width —
//! at most the last two characters of the string — rather than a general
//! tokenizer.

use crate::error::{ReportError, Result};

/// Byte multiplier for a suffix character, if it is one.
fn multiplier(c: u8) -> Option<f64> {
    match c {
        b'K' => Some(1024.0),
        b'M' => Some(1024.0 * 1024.0),
        b'G' => Some(1024.0 * 1024.0 * 1024.0),
        b'T' => Some(1024.0 * 1024.0 * 1024.0 * 1024.0),
        _ => None,
    }
}

/// Convert a textual traffic quantity into an exact byte count.
///
/// The multiplier is taken from the last character when it is one of
/// `K`/`M`/`G`/`T`, or from the second-to-last character when a unit letter
/// follows it; otherwise only the trailing unit letter is stripped.
///
/// # Examples
///
/// ```
/// use traffic_core::quantity::parse_quantity;
///
/// assert_eq!(parse_quantity("1024B").unwrap(), 1024.0);
/// assert_eq!(parse_quantity("1K").unwrap(), 1024.0);
/// assert_eq!(parse_quantity("12.5MB").unwrap(), 12.5 * 1024.0 * 1024.0);
/// assert!(parse_quantity("X").is_err());
/// ```
pub fn parse_quantity(text: &str) -> Result<f64> {
    let malformed = |reason: &str| ReportError::MalformedQuantity {
        quantity: text.to_string(),
        reason: reason.to_string(),
    };

    if !text.is_ascii() {
        return Err(malformed("quantity must be ASCII"));
    }
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return Err(malformed("quantity too short"));
    }

    let last = bytes[bytes.len() - 1];
    let second_to_last = bytes[bytes.len() - 2];

    let (body, factor) = if let Some(factor) = multiplier(last) {
        (&text[..text.len() - 1], factor)
    } else if let Some(factor) = multiplier(second_to_last) {
        (&text[..text.len() - 2], factor)
    } else {
        // No recognised multiplier: a plain byte count with one trailing
        // unit letter.
        (&text[..text.len() - 1], 1.0)
    };

    let value: f64 = body
        .parse()
        .map_err(|_| malformed("numeric body is not a base-10 number"))?;
    if !value.is_finite() {
        return Err(malformed("numeric body is not finite"));
    }

    Ok(value * factor)
}

/// Render a byte count as a human-friendly scaled string.
///
/// Values at or below 1024 stay in bytes; larger values are divided by 1024
/// through `KB`, `MB` and `GB`, stopping at the first value under 1024.
/// Values beyond the `GB` range render as large `GB` numbers. Display-only
/// and lossy — never feed the output back into aggregation.
///
/// # Examples
///
/// ```
/// use traffic_core::quantity::format_quantity;
///
/// assert_eq!(format_quantity(0.0), "0.00B");
/// assert_eq!(format_quantity(1536.0), "1.50KB");
/// assert_eq!(format_quantity(2.0 * 1024.0 * 1024.0), "2.00MB");
/// ```
pub fn format_quantity(bytes: f64) -> String {
    if bytes <= 1024.0 {
        return format!("{bytes:.2}B");
    }

    let mut value = bytes;
    let mut unit = "B";
    for label in ["KB", "MB", "GB"] {
        if value >= 1024.0 {
            value /= 1024.0;
        }
        unit = label;
        if value < 1024.0 {
            break;
        }
    }
    format!("{value:.2}{unit}")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
