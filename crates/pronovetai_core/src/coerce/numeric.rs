//! Integer and decimal coercion tolerant of legacy MySQL text.
//!
//! # Responsibility
//! - Map `""`, sentinel `"0"`, and junk-laden text (`"1 basement"`,
//!   `"1 ,200.00sqm"`) onto `None` or a typed numeric value.
//!
//! # Invariants
//! - Pure and non-panicking for every input.
//! - Natively typed column values pass through unchanged (a native
//!   integer `0` stays `Some(0)` under every policy; only the literal
//!   text `"0"` is policy-controlled).

use rusqlite::types::ValueRef;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Policy for the legacy stored text `"0"` on integer columns.
///
/// The source data used `"0"` interchangeably with `""` for "unknown";
/// whether a real zero should be representable is a deployment decision,
/// so both readings are explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroPolicy {
    /// Text `"0"` reads as `None` (legacy behavior).
    #[default]
    NullOnZero,
    /// Text `"0"` reads as `Some(0)`.
    LiteralZero,
}

/// Coerces a raw column value to an optional integer.
///
/// `Null` and empty text are `None`. Text goes through
/// [`coerce_integer_text`]; native integers pass through, native reals
/// are truncated, blobs are `None`.
pub fn coerce_integer(raw: ValueRef<'_>, zero: ZeroPolicy) -> Option<i64> {
    match raw {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value),
        ValueRef::Real(value) => Some(value.trunc() as i64),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| coerce_integer_text(text, zero)),
        ValueRef::Blob(_) => None,
    }
}

/// Coerces candidate integer text, applying the empty/zero sentinel rules.
pub fn coerce_integer_text(text: &str, zero: ZeroPolicy) -> Option<i64> {
    match text {
        "" => return None,
        "0" => {
            if zero == ZeroPolicy::NullOnZero {
                return None;
            }
        }
        _ => {}
    }
    clean_integer_text(text)
}

/// Extracts an integer from arbitrary text.
///
/// Keeps digit and sign characters, drops everything else (unit suffixes,
/// thousands separators, stray words), then parses. Text with no digits,
/// or whose surviving characters do not form an integer, is `None`.
pub fn clean_integer_text(text: &str) -> Option<i64> {
    let cleaned: String = text
        .trim_start()
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '+' || *ch == '-')
        .collect();

    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    cleaned.parse::<i64>().ok()
}

/// Coerces a raw column value to an optional decimal at `scale` places.
///
/// `Null` and empty text are `None`. Unlike the integer rule, text `"0"`
/// is a legitimate zero here. Native integers and reals convert and round
/// to the declared scale.
pub fn coerce_decimal(raw: ValueRef<'_>, scale: u32) -> Option<Decimal> {
    match raw {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(Decimal::from(value).round_dp(scale)),
        ValueRef::Real(value) => Decimal::from_f64_retain(value).map(|dec| dec.round_dp(scale)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| coerce_decimal_text(text, scale)),
        ValueRef::Blob(_) => None,
    }
}

/// Coerces candidate decimal text, applying the empty sentinel rule.
pub fn coerce_decimal_text(text: &str, scale: u32) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    clean_decimal_text(text, scale)
}

/// Extracts a decimal from arbitrary text.
///
/// Accepted characters are digits, `.`, leading `+`/`-`, and `e`/`E`;
/// everything else is dropped before parsing. Exponent forms go through
/// the scientific parser. Any parse failure is `None`.
pub fn clean_decimal_text(text: &str, scale: u32) -> Option<Decimal> {
    const ALLOWED: &[char] = &[
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '+', '-', 'e', 'E', '.',
    ];

    let cleaned: String = text
        .trim()
        .chars()
        .filter(|ch| ALLOWED.contains(ch))
        .collect();

    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    let parsed = if cleaned.contains(['e', 'E']) {
        Decimal::from_scientific(&cleaned).ok()
    } else {
        Decimal::from_str(&cleaned).ok()
    };

    parsed.map(|dec| dec.round_dp(scale))
}
