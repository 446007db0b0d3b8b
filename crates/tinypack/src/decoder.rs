//! `MsgPackDecoder`: reads one [`Value`] at a time from a [`ByteSource`].

use tinypack_buffers::{ByteSource, Reader};

use crate::constants::*;
use crate::hooks::ExtDecoder;
use crate::{DecodeError, ExtType, UnpackOptions, Value};

/// Upper bound on up-front allocation for containers read from sources that
/// cannot report their remaining size.
const MAX_PREALLOC: usize = 256;

/// MessagePack decoder reading from any [`ByteSource`].
///
/// Each call consumes exactly one value and leaves the source positioned
/// right after it, so a stream of concatenated values is read by calling
/// [`read`](MsgPackDecoder::read) repeatedly.
pub struct MsgPackDecoder<'h, T> {
    pub options: UnpackOptions,
    ext_hook: Option<&'h mut dyn ExtDecoder<T>>,
    depth: usize,
}

impl<T> Default for MsgPackDecoder<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h, T> MsgPackDecoder<'h, T> {
    pub fn new() -> Self {
        Self::with_options(UnpackOptions::default())
    }

    pub fn with_options(options: UnpackOptions) -> Self {
        Self {
            options,
            ext_hook: None,
            depth: 0,
        }
    }

    /// Sets the hook that rebuilds values from extension frames.
    pub fn with_ext_hook(mut self, ext_hook: &'h mut dyn ExtDecoder<T>) -> Self {
        self.ext_hook = Some(ext_hook);
        self
    }

    /// Decodes `input`, which must hold exactly one value.
    pub fn decode(&mut self, input: &[u8]) -> Result<Value<T>, DecodeError> {
        let mut reader = Reader::new(input);
        let value = self.read(&mut reader)?;
        match reader.size() {
            0 => Ok(value),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }

    /// Reads one complete value from `src`.
    pub fn read<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<Value<T>, DecodeError> {
        self.depth = 0;
        self.read_any(src)
    }

    /// Skips one complete value and returns the number of bytes it occupied.
    ///
    /// Applies the same format restrictions as [`read`](MsgPackDecoder::read)
    /// but never builds values or calls the extension hook.
    pub fn skip<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<usize, DecodeError> {
        self.depth = 0;
        let start = src.position();
        self.skip_any(src)?;
        Ok(src.position() - start)
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::DepthLimitExceeded(self.options.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    /// Rejects `count` items of at least `min_size` bytes each when the
    /// source already knows it cannot supply them.
    fn check_count<S: ByteSource + ?Sized>(
        src: &S,
        count: usize,
        min_size: usize,
    ) -> Result<(), DecodeError> {
        match src.remaining() {
            Some(remaining) if count.saturating_mul(min_size) > remaining => {
                Err(DecodeError::Truncated)
            }
            _ => Ok(()),
        }
    }

    fn read_any<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<Value<T>, DecodeError> {
        let byte = src.u8()?;
        match byte {
            0x00..=POSITIVE_FIXINT_MAX => Ok(Value::Int(byte as i64)),
            FIXMAP..=FIXMAP_MAX => self.read_map(src, (byte & 0x0f) as usize),
            FIXARRAY..=FIXARRAY_MAX => self.read_arr(src, (byte & 0x0f) as usize),
            FIXSTR..=FIXSTR_MAX => self.read_str(src, (byte & 0x1f) as usize),
            NEGATIVE_FIXINT..=0xff => Ok(Value::Int(byte as i8 as i64)),
            NIL => Ok(Value::Nil),
            FALSE => Ok(Value::Bool(false)),
            TRUE => Ok(Value::Bool(true)),
            BIN8 => {
                let n = src.u8()? as usize;
                Ok(Value::Bin(src.buf(n)?))
            }
            BIN16 => {
                let n = src.u16()? as usize;
                Ok(Value::Bin(src.buf(n)?))
            }
            BIN32 => {
                let n = src.u32()? as usize;
                Ok(Value::Bin(src.buf(n)?))
            }
            EXT8 => {
                let n = src.u8()? as usize;
                self.read_ext(src, byte, n)
            }
            EXT16 => {
                let n = src.u16()? as usize;
                self.read_ext(src, byte, n)
            }
            EXT32 => {
                let n = src.u32()? as usize;
                self.read_ext(src, byte, n)
            }
            FLOAT32 => Ok(Value::Float(src.f32()?)),
            UINT8 => Ok(Value::Int(src.u8()? as i64)),
            UINT16 => Ok(Value::Int(src.u16()? as i64)),
            UINT32 => Ok(Value::Int(src.u32()? as i64)),
            INT8 => Ok(Value::Int(src.i8()? as i64)),
            INT16 => Ok(Value::Int(src.i16()? as i64)),
            INT32 => Ok(Value::Int(src.i32()? as i64)),
            FIXEXT1 => self.read_ext(src, byte, 1),
            FIXEXT2 => self.read_ext(src, byte, 2),
            FIXEXT4 => self.read_ext(src, byte, 4),
            FIXEXT8 => self.read_ext(src, byte, 8),
            FIXEXT16 => self.read_ext(src, byte, 16),
            STR8 => {
                let n = src.u8()? as usize;
                self.read_str(src, n)
            }
            STR16 => {
                let n = src.u16()? as usize;
                self.read_str(src, n)
            }
            STR32 => {
                let n = src.u32()? as usize;
                self.read_str(src, n)
            }
            ARRAY16 => {
                let n = src.u16()? as usize;
                self.read_arr(src, n)
            }
            ARRAY32 => {
                let n = src.u32()? as usize;
                self.read_arr(src, n)
            }
            MAP16 => {
                let n = src.u16()? as usize;
                self.read_map(src, n)
            }
            MAP32 => {
                let n = src.u32()? as usize;
                self.read_map(src, n)
            }
            FLOAT64 | UINT64 | INT64 => Err(DecodeError::UnsupportedFormat(byte)),
            NEVER_USED => Err(DecodeError::InvalidMarker(byte)),
        }
    }

    fn read_str<S: ByteSource + ?Sized>(
        &mut self,
        src: &mut S,
        size: usize,
    ) -> Result<Value<T>, DecodeError> {
        Ok(Value::Str(src.utf8(size)?))
    }

    fn read_arr<S: ByteSource + ?Sized>(
        &mut self,
        src: &mut S,
        size: usize,
    ) -> Result<Value<T>, DecodeError> {
        Self::check_count(src, size, 1)?;
        self.enter()?;
        let mut arr = Vec::with_capacity(size.min(MAX_PREALLOC));
        for _ in 0..size {
            arr.push(self.read_any(src)?);
        }
        self.depth -= 1;
        if self.options.use_list {
            Ok(Value::Array(arr))
        } else {
            Ok(Value::Tuple(arr.into_boxed_slice()))
        }
    }

    fn read_map<S: ByteSource + ?Sized>(
        &mut self,
        src: &mut S,
        size: usize,
    ) -> Result<Value<T>, DecodeError> {
        Self::check_count(src, size, 2)?;
        self.enter()?;
        let mut map = Vec::with_capacity(size.min(MAX_PREALLOC));
        for _ in 0..size {
            let key = self.read_any(src)?;
            let val = self.read_any(src)?;
            map.push((key, val));
        }
        self.depth -= 1;
        Ok(Value::Map(map))
    }

    /// Reads the type code and `size` payload bytes of an ext frame.
    fn read_ext<S: ByteSource + ?Sized>(
        &mut self,
        src: &mut S,
        marker: u8,
        size: usize,
    ) -> Result<Value<T>, DecodeError> {
        let code = src.u8()?;
        if code > EXT_CODE_MAX {
            return Err(DecodeError::UnsupportedFormat(marker));
        }
        let data = src.buf(size)?;
        match self.ext_hook.as_mut() {
            Some(hook) => hook.decode_ext(code, data).map_err(DecodeError::HookFailed),
            None => Ok(Value::Ext(ExtType::from_wire(code, data))),
        }
    }

    fn skip_any<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let byte = src.u8()?;
        match byte {
            0x00..=POSITIVE_FIXINT_MAX | NEGATIVE_FIXINT..=0xff | NIL | FALSE | TRUE => {}
            FIXMAP..=FIXMAP_MAX => self.skip_map(src, (byte & 0x0f) as usize)?,
            FIXARRAY..=FIXARRAY_MAX => self.skip_arr(src, (byte & 0x0f) as usize)?,
            FIXSTR..=FIXSTR_MAX => src.skip((byte & 0x1f) as usize)?,
            BIN8 | STR8 => {
                let n = src.u8()? as usize;
                src.skip(n)?;
            }
            BIN16 | STR16 => {
                let n = src.u16()? as usize;
                src.skip(n)?;
            }
            BIN32 | STR32 => {
                let n = src.u32()? as usize;
                src.skip(n)?;
            }
            EXT8 => {
                let n = src.u8()? as usize;
                Self::skip_ext(src, byte, n)?;
            }
            EXT16 => {
                let n = src.u16()? as usize;
                Self::skip_ext(src, byte, n)?;
            }
            EXT32 => {
                let n = src.u32()? as usize;
                Self::skip_ext(src, byte, n)?;
            }
            UINT8 | INT8 => src.skip(1)?,
            UINT16 | INT16 => src.skip(2)?,
            FLOAT32 | UINT32 | INT32 => src.skip(4)?,
            FIXEXT1 => Self::skip_ext(src, byte, 1)?,
            FIXEXT2 => Self::skip_ext(src, byte, 2)?,
            FIXEXT4 => Self::skip_ext(src, byte, 4)?,
            FIXEXT8 => Self::skip_ext(src, byte, 8)?,
            FIXEXT16 => Self::skip_ext(src, byte, 16)?,
            ARRAY16 => {
                let n = src.u16()? as usize;
                self.skip_arr(src, n)?;
            }
            ARRAY32 => {
                let n = src.u32()? as usize;
                self.skip_arr(src, n)?;
            }
            MAP16 => {
                let n = src.u16()? as usize;
                self.skip_map(src, n)?;
            }
            MAP32 => {
                let n = src.u32()? as usize;
                self.skip_map(src, n)?;
            }
            FLOAT64 | UINT64 | INT64 => return Err(DecodeError::UnsupportedFormat(byte)),
            NEVER_USED => return Err(DecodeError::InvalidMarker(byte)),
        }
        Ok(())
    }

    fn skip_arr<S: ByteSource + ?Sized>(&mut self, src: &mut S, size: usize) -> Result<(), DecodeError> {
        Self::check_count(src, size, 1)?;
        self.enter()?;
        for _ in 0..size {
            self.skip_any(src)?;
        }
        self.depth -= 1;
        Ok(())
    }

    fn skip_map<S: ByteSource + ?Sized>(&mut self, src: &mut S, size: usize) -> Result<(), DecodeError> {
        Self::check_count(src, size, 2)?;
        self.enter()?;
        for _ in 0..size {
            self.skip_any(src)?; // key
            self.skip_any(src)?; // value
        }
        self.depth -= 1;
        Ok(())
    }

    fn skip_ext<S: ByteSource + ?Sized>(src: &mut S, marker: u8, size: usize) -> Result<(), DecodeError> {
        if src.u8()? > EXT_CODE_MAX {
            return Err(DecodeError::UnsupportedFormat(marker));
        }
        src.skip(size)?;
        Ok(())
    }
}
