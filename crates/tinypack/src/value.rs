//! [`Value`]: the in-memory values the codec reads and writes.

use std::convert::Infallible;

use crate::{EncodeError, ExtType};

/// A MessagePack value.
///
/// `T` is the application type carried by [`Value::Custom`]. It never reaches
/// the wire directly: the encoder hands it to the `default` hook, which turns
/// it into an [`ExtType`]. With the default `T = Infallible` no custom value
/// can be built and no hook is needed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T = Infallible> {
    Nil,
    Bool(bool),
    /// Signed integer. Only `i32::MIN..=u32::MAX` can be encoded.
    Int(i64),
    /// Single-precision float; the codec has no float64 support.
    Float(f32),
    /// Raw byte string.
    Bin(Vec<u8>),
    Str(String),
    /// Array decoded with `use_list = true`.
    Array(Vec<Value<T>>),
    /// Array decoded with `use_list = false`. Same wire format as `Array`.
    Tuple(Box<[Value<T>]>),
    /// Ordered key/value pairs. Keys are not deduplicated.
    Map(Vec<(Value<T>, Value<T>)>),
    Ext(ExtType),
    Custom(T),
}

impl<T> Value<T> {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bin(b) => Some(b),
            _ => None,
        }
    }

    /// Elements of an `Array` or a `Tuple`.
    pub fn as_array(&self) -> Option<&[Value<T>]> {
        match self {
            Value::Array(items) => Some(items),
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value<T>, Value<T>)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_ext(&self) -> Option<&ExtType> {
        match self {
            Value::Ext(ext) => Some(ext),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&T> {
        match self {
            Value::Custom(custom) => Some(custom),
            _ => None,
        }
    }

    /// First value stored under a string key, for maps.
    pub fn get(&self, key: &str) -> Option<&Value<T>> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl<T> From<$ty> for Value<T> {
                fn from(v: $ty) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl<T> From<bool> for Value<T> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<T> From<f32> for Value<T> {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

/// Narrows a double to single precision when that loses nothing.
///
/// NaN and the infinities narrow as well. Any other value that changes when
/// rounded to `f32` fails with [`EncodeError::Unrepresentable`].
impl<T> TryFrom<f64> for Value<T> {
    type Error = EncodeError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        let narrowed = v as f32;
        if v.is_nan() || narrowed as f64 == v {
            Ok(Value::Float(narrowed))
        } else {
            Err(EncodeError::Unrepresentable("double precision float"))
        }
    }
}

impl<T> From<&str> for Value<T> {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl<T> From<String> for Value<T> {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T> From<&[u8]> for Value<T> {
    fn from(v: &[u8]) -> Self {
        Value::Bin(v.to_vec())
    }
}

impl<T> From<Vec<u8>> for Value<T> {
    fn from(v: Vec<u8>) -> Self {
        Value::Bin(v)
    }
}

impl<T> From<ExtType> for Value<T> {
    fn from(v: ExtType) -> Self {
        Value::Ext(v)
    }
}

impl<T> From<Vec<Value<T>>> for Value<T> {
    fn from(v: Vec<Value<T>>) -> Self {
        Value::Array(v)
    }
}

impl<T> From<Vec<(Value<T>, Value<T>)>> for Value<T> {
    fn from(v: Vec<(Value<T>, Value<T>)>) -> Self {
        Value::Map(v)
    }
}
