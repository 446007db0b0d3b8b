//! Extension hooks.
//!
//! Hooks are passed to each call; there is no global registry. Both traits are
//! implemented for matching closures, so most callers never name them.

use crate::{ExtType, Value};

/// Error a hook may return. It is carried in `HookFailed`.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Turns an application value into an extension frame (the `default` hook).
pub trait ExtEncoder<T> {
    fn encode_ext(&mut self, value: &T) -> Result<ExtType, HookError>;
}

impl<T, F> ExtEncoder<T> for F
where
    F: FnMut(&T) -> Result<ExtType, HookError>,
{
    fn encode_ext(&mut self, value: &T) -> Result<ExtType, HookError> {
        self(value)
    }
}

/// Rebuilds a value from an extension frame (the `ext_hook`).
///
/// `code` is always in `0..=127`.
pub trait ExtDecoder<T> {
    fn decode_ext(&mut self, code: u8, data: Vec<u8>) -> Result<Value<T>, HookError>;
}

impl<T, F> ExtDecoder<T> for F
where
    F: FnMut(u8, Vec<u8>) -> Result<Value<T>, HookError>,
{
    fn decode_ext(&mut self, code: u8, data: Vec<u8>) -> Result<Value<T>, HookError> {
        self(code, data)
    }
}
