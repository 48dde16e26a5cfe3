use crate::{
    Error, Result,
    model::{FeatureKind, FeatureValue},
};
use serde_json::Value;

/// Converts a raw JSON value to the numeric kind of its feature.
///
/// Numbers, booleans and numeric strings are accepted. Fractional numbers are
/// truncated toward zero for integer features, while strings must already
/// hold an integer literal.
pub fn coerce(field: &str, kind: FeatureKind, value: &Value) -> Result<FeatureValue> {
    let coerced = match kind {
        FeatureKind::Float => to_float(value).map(FeatureValue::Float),
        FeatureKind::Int => to_int(value).map(FeatureValue::Int),
    };
    coerced.ok_or_else(|| Error::Coercion {
        field: field.to_string(),
        kind: kind.to_string(),
        value: value.clone(),
    })
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn truncate(v: f64) -> Option<i64> {
    let t = v.trunc();
    // i64::MAX is not exactly representable, so compare against 2^63
    if t.is_finite() && t >= i64::MIN as f64 && t < 9_223_372_036_854_775_808.0 {
        Some(t as i64)
    } else {
        None
    }
}
