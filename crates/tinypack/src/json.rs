//! Conversions between [`Value`] and `serde_json::Value`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Map, Number};

use crate::{EncodeError, Value};

/// Converts JSON into a packable value.
///
/// Integers must fit `i32::MIN..=u32::MAX` and floats must survive narrowing
/// to `f32`; anything else is [`EncodeError::Unrepresentable`]. Object keys
/// become [`Value::Str`] keys in the same order.
impl<T> TryFrom<serde_json::Value> for Value<T> {
    type Error = EncodeError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n)?,
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => Value::Array(
                arr.into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| -> Result<_, EncodeError> {
                        Ok((Value::Str(k), Value::try_from(v)?))
                    })
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

fn number_to_value<T>(n: &Number) -> Result<Value<T>, EncodeError> {
    if let Some(i) = n.as_i64() {
        if (i32::MIN as i64..=u32::MAX as i64).contains(&i) {
            return Ok(Value::Int(i));
        }
        return Err(EncodeError::Unrepresentable("integer needs 64 bits"));
    }
    if n.as_u64().is_some() {
        return Err(EncodeError::Unrepresentable("integer needs 64 bits"));
    }
    match n.as_f64() {
        Some(f) => Value::try_from(f),
        None => Err(EncodeError::Unrepresentable("number")),
    }
}

fn data_uri(bytes: &[u8]) -> String {
    format!("data:application/octet-stream;base64,{}", STANDARD.encode(bytes))
}

/// Renders a decoded value as JSON.
///
/// Byte strings become base64 data URIs, extensions become
/// `{"code": n, "data": "<base64>"}`, and non-string map keys are replaced by
/// their JSON text. Non-finite floats and custom values become `null`.
impl<T> From<Value<T>> for serde_json::Value {
    fn from(v: Value<T>) -> Self {
        match v {
            Value::Nil | Value::Custom(_) => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => json!(i),
            Value::Float(f) => Number::from_f64(f as f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bin(b) => serde_json::Value::String(data_uri(&b)),
            Value::Str(s) => serde_json::Value::String(s),
            Value::Array(items) => items.into_iter().map(serde_json::Value::from).collect(),
            Value::Tuple(items) => items.into_vec().into_iter().map(serde_json::Value::from).collect(),
            Value::Map(pairs) => {
                let mut obj = Map::with_capacity(pairs.len());
                for (k, v) in pairs {
                    let key = match k {
                        Value::Str(s) => s,
                        other => serde_json::Value::from(other).to_string(),
                    };
                    obj.insert(key, serde_json::Value::from(v));
                }
                serde_json::Value::Object(obj)
            }
            Value::Ext(ext) => json!({
                "code": ext.code(),
                "data": STANDARD.encode(ext.data()),
            }),
        }
    }
}
