//! Call-level entry points.

use std::convert::Infallible;

use tinypack_buffers::{ByteSink, ByteSource, Reader};

use crate::hooks::{ExtDecoder, ExtEncoder};
use crate::{DecodeError, EncodeError, MsgPackDecoder, MsgPackEncoder, UnpackOptions, Value};

/// Encodes `value` into `sink`.
///
/// `default` is consulted for [`Value::Custom`] values and must turn them
/// into an [`ExtType`](crate::ExtType). On error the sink may hold a partial
/// encoding.
///
/// ```
/// use tinypack::{pack, Value};
///
/// let value: Value = Value::from(vec![Value::from(1u8), Value::Nil]);
/// let mut out = Vec::new();
/// pack(&value, &mut out, None).unwrap();
/// assert_eq!(out, [0x92, 0x01, 0xc0]);
/// ```
pub fn pack<T, S: ByteSink + ?Sized>(
    value: &Value<T>,
    sink: &mut S,
    default: Option<&mut dyn ExtEncoder<T>>,
) -> Result<(), EncodeError> {
    let mut encoder = MsgPackEncoder::new();
    if let Some(default) = default {
        encoder = encoder.with_default(default);
    }
    encoder.write(sink, value)
}

/// Decodes one value from `source`, leaving it positioned after that value.
///
/// Extension frames go to `ext_hook` when given and are returned as
/// [`Value::Ext`] otherwise. `use_list` picks [`Value::Array`] over
/// [`Value::Tuple`] for arrays.
///
/// ```
/// use tinypack::{unpack, Value};
/// use tinypack_buffers::Reader;
///
/// let mut source = Reader::new(&[0x01, 0xa1, b'x']);
/// let first: Value = unpack(&mut source, None, true).unwrap();
/// let second: Value = unpack(&mut source, None, true).unwrap();
/// assert_eq!(first, Value::Int(1));
/// assert_eq!(second, Value::from("x"));
/// ```
pub fn unpack<T, S: ByteSource + ?Sized>(
    source: &mut S,
    ext_hook: Option<&mut dyn ExtDecoder<T>>,
    use_list: bool,
) -> Result<Value<T>, DecodeError> {
    let options = UnpackOptions::default().with_use_list(use_list);
    let mut decoder = MsgPackDecoder::with_options(options);
    if let Some(ext_hook) = ext_hook {
        decoder = decoder.with_ext_hook(ext_hook);
    }
    decoder.read(source)
}

/// Encodes `value` into a new buffer.
pub fn packb<T>(
    value: &Value<T>,
    default: Option<&mut dyn ExtEncoder<T>>,
) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    pack(value, &mut out, default)?;
    Ok(out)
}

/// Decodes `bytes`, which must hold exactly one value.
pub fn unpackb<T>(
    bytes: &[u8],
    ext_hook: Option<&mut dyn ExtDecoder<T>>,
    use_list: bool,
) -> Result<Value<T>, DecodeError> {
    let mut reader = Reader::new(bytes);
    let value = unpack(&mut reader, ext_hook, use_list)?;
    match reader.size() {
        0 => Ok(value),
        n => Err(DecodeError::TrailingBytes(n)),
    }
}

/// Advances `source` past one value without decoding it; returns its size.
pub fn skip<S: ByteSource + ?Sized>(source: &mut S) -> Result<usize, DecodeError> {
    MsgPackDecoder::<Infallible>::new().skip(source)
}

/// Checks that `bytes` holds exactly one well-formed value.
pub fn validate(bytes: &[u8]) -> Result<(), DecodeError> {
    let mut reader = Reader::new(bytes);
    skip(&mut reader)?;
    match reader.size() {
        0 => Ok(()),
        n => Err(DecodeError::TrailingBytes(n)),
    }
}
