//! Value normalization into the JSON data model.
//!
//! [`normalize`] is pure and total: every input value maps to a value built
//! from the six JSON variants, applying the substitutions the encoder
//! relies on. Encoding applies the same substitutions inline, so
//! `encode(v)` and `encode(&normalize(v))` produce identical output.

use chrono::SecondsFormat;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::{Number, Value};

/// Largest integer exactly representable as an IEEE-754 double, 2^53 − 1.
pub(crate) const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Maps an arbitrary value into the JSON data model.
///
/// Substitutions:
///
/// - non-finite floats become `null`; `-0.0` becomes `0`
/// - whole-valued floats in `i64` range become integers, so the
///   integer/float flag is stable across a round trip
/// - big integers become numbers inside the safe-integer range
///   (|n| ≤ 2^53 − 1) and decimal strings outside it
/// - temporal instants become ISO-8601 UTC strings with millisecond
///   precision and a `Z` suffix
/// - arrays and objects are descended recursively; key order is kept
///
/// # Examples
///
/// ```rust
/// use toon_codec::{normalize, Value};
///
/// assert_eq!(normalize(Value::from(f64::NAN)), Value::Null);
/// assert_eq!(normalize(Value::from(-0.0)), Value::from(0));
/// assert_eq!(normalize(Value::from(2.0)), Value::from(2));
/// ```
#[must_use]
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Number(Number::Float(f)) => normalize_float(f),
        Value::BigInt(n) => normalize_bigint(&n),
        Value::Date(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, normalize(value)))
                .collect(),
        ),
        other => other,
    }
}

pub(crate) fn normalize_float(f: f64) -> Value {
    if !f.is_finite() {
        return Value::Null;
    }
    if f == 0.0 {
        return Value::Number(Number::Integer(0));
    }
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        return Value::Number(Number::Integer(f as i64));
    }
    Value::Number(Number::Float(f))
}

pub(crate) fn normalize_bigint(n: &BigInt) -> Value {
    match n.to_i64() {
        Some(i) if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&i) => {
            Value::Number(Number::Integer(i))
        }
        _ => Value::String(n.to_string()),
    }
}
