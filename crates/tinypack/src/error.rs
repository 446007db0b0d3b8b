//! Encode and decode error types.

use thiserror::Error;
use tinypack_buffers::BufferError;

use crate::hooks::HookError;

/// Error returned by [`pack`](crate::pack) and [`MsgPackEncoder`](crate::MsgPackEncoder).
///
/// The sink may already hold part of the value when this is returned.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("value has no msgpack encoding and no default hook handled it")]
    UnsupportedType,
    #[error("value is not representable: {0}")]
    Unrepresentable(&'static str),
    #[error("extension type code {0} is outside 0..=127")]
    ExtCodeOutOfRange(i64),
    #[error("default hook failed: {0}")]
    HookFailed(#[source] HookError),
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    #[error("sink error: {0}")]
    Sink(#[from] BufferError),
}

/// Error returned by [`unpack`](crate::unpack) and [`MsgPackDecoder`](crate::MsgPackDecoder).
///
/// The source cursor is left somewhere inside the value that failed.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid marker byte 0x{0:02x}")]
    InvalidMarker(u8),
    #[error("unsupported msgpack format 0x{0:02x}")]
    UnsupportedFormat(u8),
    #[error("input truncated")]
    Truncated,
    #[error("extension hook failed: {0}")]
    HookFailed(#[source] HookError),
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
    #[error("source error: {0}")]
    Source(#[source] BufferError),
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => DecodeError::Truncated,
            BufferError::InvalidUtf8 => DecodeError::InvalidUtf8,
            other => DecodeError::Source(other),
        }
    }
}
