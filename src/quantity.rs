//! Kubernetes resource quantity arithmetic
//!
//! `k8s-openapi` models a [`Quantity`] as an opaque string. The defaulting
//! engine needs the integer value behind a memory request and has to write a
//! derived byte count back in canonical decimal-SI form, so this module
//! implements the small subset of the Kubernetes quantity grammar we rely on.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use crate::error::{Error, Result};

/// Binary suffixes and their power-of-two exponent
const BINARY_SUFFIXES: [(&str, u32); 6] = [
    ("Ki", 10),
    ("Mi", 20),
    ("Gi", 30),
    ("Ti", 40),
    ("Pi", 50),
    ("Ei", 60),
];

/// Decimal suffixes and their power-of-ten exponent
const DECIMAL_SUFFIXES: [(&str, i32); 9] = [
    ("n", -9),
    ("u", -6),
    ("m", -3),
    ("k", 3),
    ("M", 6),
    ("G", 9),
    ("T", 12),
    ("P", 15),
    ("E", 18),
];

/// Suffixes used when formatting, largest first
const FORMAT_SUFFIXES: [(&str, u32); 6] = [
    ("E", 18),
    ("P", 15),
    ("T", 12),
    ("G", 9),
    ("M", 6),
    ("k", 3),
];

/// Parse a quantity string into its integer value.
///
/// Fractional results are rounded up, so `"500m"` yields `1` and `"1.5Gi"`
/// yields `1610612736`.
pub fn parse_quantity(input: &str) -> Result<i64> {
    let invalid =
        |reason: &str| Error::ValidationError(format!("invalid quantity {input:?}: {reason}"));

    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let split = unsigned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(unsigned.len());
    let (number, suffix) = unsigned.split_at(split);
    if number.is_empty() || number == "." {
        return Err(invalid("missing numeric part"));
    }

    let (whole, fraction) = match number.split_once('.') {
        Some((w, f)) => (w, f),
        None => (number, ""),
    };
    if fraction.contains('.') {
        return Err(invalid("more than one decimal point"));
    }

    let digits: i128 = format!("{whole}{fraction}")
        .parse()
        .map_err(|_| invalid("numeric part out of range"))?;
    let mut numerator = digits;
    let mut denominator = pow10(fraction.len() as u32).ok_or_else(|| invalid("too many digits"))?;

    match parse_suffix(suffix).ok_or_else(|| invalid("unknown suffix"))? {
        Scale::Binary(exp) => {
            numerator = numerator
                .checked_mul(1i128 << exp)
                .ok_or_else(|| invalid("value out of range"))?;
        }
        Scale::Decimal(exp) if exp >= 0 => {
            let factor = pow10(exp as u32).ok_or_else(|| invalid("value out of range"))?;
            numerator = numerator
                .checked_mul(factor)
                .ok_or_else(|| invalid("value out of range"))?;
        }
        Scale::Decimal(exp) => {
            let factor = pow10(exp.unsigned_abs()).ok_or_else(|| invalid("value out of range"))?;
            denominator = denominator
                .checked_mul(factor)
                .ok_or_else(|| invalid("value out of range"))?;
        }
    }

    // Round away from zero, as Quantity.Value() does.
    let mut value = numerator / denominator;
    if numerator % denominator != 0 {
        value += 1;
    }
    if negative {
        value = -value;
    }

    i64::try_from(value).map_err(|_| invalid("value out of range"))
}

/// Integer value of an optional quantity, `None` when absent
pub fn quantity_value(quantity: Option<&Quantity>) -> Result<Option<i64>> {
    quantity.map(|q| parse_quantity(&q.0)).transpose()
}

/// Format an integer in canonical decimal-SI form.
///
/// The largest suffix that divides the value exactly is used, so `800000000`
/// becomes `"800M"` while `858993459` stays a plain integer.
pub fn format_decimal_si(value: i64) -> String {
    if value != 0 {
        for (suffix, exp) in FORMAT_SUFFIXES {
            let factor = 10i64.pow(exp);
            if value % factor == 0 {
                return format!("{}{}", value / factor, suffix);
            }
        }
    }
    value.to_string()
}

enum Scale {
    Binary(u32),
    Decimal(i32),
}

fn parse_suffix(suffix: &str) -> Option<Scale> {
    if suffix.is_empty() {
        return Some(Scale::Decimal(0));
    }
    if let Some((_, exp)) = BINARY_SUFFIXES.iter().find(|(s, _)| *s == suffix) {
        return Some(Scale::Binary(*exp));
    }
    if let Some((_, exp)) = DECIMAL_SUFFIXES.iter().find(|(s, _)| *s == suffix) {
        return Some(Scale::Decimal(*exp));
    }
    // Exponent notation: "1e3", "2E-3". A bare "E" is exa and handled above.
    let exponent = suffix
        .strip_prefix('e')
        .or_else(|| suffix.strip_prefix('E'))?;
    exponent.parse::<i32>().ok().map(Scale::Decimal)
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}
