//! Amount normalization
//!
//! Every amount representation is reduced to a non-negative [`Decimal`].
//! Unparseable input becomes zero; the sign is always discarded.
//!
//! Separator policy for text amounts, applied after stripping everything
//! except digits, `,`, `.` and `-`:
//!
//! - a single kind of separator occurring more than once is digit grouping
//!   (`"1.000.000"` is one million)
//! - otherwise the last separator is the decimal point and all earlier ones
//!   are grouping (`"1.000,50"` and `"1,000.50"` are both 1000.5)
//! - so a lone separator is always decimal: `"1,000"` is 1.0, not 1000

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::value::RawValue;

fn noise_pattern() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| Regex::new(r"[^0-9,.\-]").expect("amount noise pattern is valid"))
}

/// Normalize an arbitrary amount to a non-negative decimal
pub fn normalize_amount(input: &RawValue) -> Decimal {
    match input {
        RawValue::Number(n) => normalize_float(*n),
        RawValue::Text(s) => parse_amount(s).map(|d| d.abs()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Non-finite floats are zero; finite floats beyond the decimal range
/// saturate to [`Decimal::MAX`]
fn normalize_float(n: f64) -> Decimal {
    if !n.is_finite() {
        return Decimal::ZERO;
    }
    match Decimal::from_f64(n) {
        Some(d) => d.abs(),
        None if n.abs() >= 1.0 => Decimal::MAX,
        None => Decimal::ZERO,
    }
}

/// Parse a noisy amount string, keeping its sign
fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = noise_pattern().replace_all(s, "");

    let (negative, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, &cleaned[..]),
    };
    if body.contains('-') {
        return None;
    }

    let (int_part, frac_part) = match decimal_separator(body) {
        Some(idx) => (digits(&body[..idx]), digits(&body[idx + 1..])),
        None => (digits(body), String::new()),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let int_part = if int_part.is_empty() { "0".to_string() } else { int_part };
    let sign = if negative { "-" } else { "" };
    let normalized = if frac_part.is_empty() {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{}", sign, int_part, frac_part)
    };

    Decimal::from_str(&normalized).ok()
}

/// Byte index of the decimal separator, if any
fn decimal_separator(body: &str) -> Option<usize> {
    let commas = body.matches(',').count();
    let dots = body.matches('.').count();
    match (commas, dots) {
        (0, 0) => None,
        (n, 0) | (0, n) if n > 1 => None,
        _ => body.rfind(|c| c == ',' || c == '.'),
    }
}

fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}
