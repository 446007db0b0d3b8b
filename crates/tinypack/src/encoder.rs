//! `MsgPackEncoder`: writes [`Value`]s using the shortest subset format.

use tinypack_buffers::{ByteSink, Writer};

use crate::constants::*;
use crate::hooks::ExtEncoder;
use crate::{EncodeError, ExtType, PackOptions, Value};

/// MessagePack encoder writing to any [`ByteSink`].
///
/// Holds the options and the optional `default` hook for
/// [`Value::Custom`] values. The encoder itself keeps no output; every call
/// writes straight to the sink it is given.
pub struct MsgPackEncoder<'h, T> {
    pub options: PackOptions,
    default: Option<&'h mut dyn ExtEncoder<T>>,
    depth: usize,
}

impl<T> Default for MsgPackEncoder<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

fn len_u32(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::Unrepresentable("length does not fit in 32 bits"))
}

impl<'h, T> MsgPackEncoder<'h, T> {
    pub fn new() -> Self {
        Self::with_options(PackOptions::default())
    }

    pub fn with_options(options: PackOptions) -> Self {
        Self {
            options,
            default: None,
            depth: 0,
        }
    }

    /// Sets the hook that encodes [`Value::Custom`] values.
    pub fn with_default(mut self, default: &'h mut dyn ExtEncoder<T>) -> Self {
        self.default = Some(default);
        self
    }

    /// Encodes `value` into a new buffer.
    pub fn encode(&mut self, value: &Value<T>) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Writer::new();
        self.write(&mut writer, value)?;
        Ok(writer.flush())
    }

    /// Encodes one complete value into `sink`.
    pub fn write<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        value: &Value<T>,
    ) -> Result<(), EncodeError> {
        self.depth = 0;
        self.write_any(sink, value)
    }

    fn write_any<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        value: &Value<T>,
    ) -> Result<(), EncodeError> {
        match value {
            Value::Nil => self.write_nil(sink),
            Value::Bool(b) => self.write_boolean(sink, *b),
            Value::Int(i) => self.write_integer(sink, *i),
            Value::Float(f) => self.write_float(sink, *f),
            Value::Bin(b) => self.write_bin(sink, b),
            Value::Str(s) => self.write_str(sink, s),
            Value::Array(items) => self.write_arr(sink, items),
            Value::Tuple(items) => self.write_arr(sink, items),
            Value::Map(pairs) => self.write_map(sink, pairs),
            Value::Ext(ext) => self.write_ext(sink, ext),
            Value::Custom(custom) => {
                let hook = self.default.as_mut().ok_or(EncodeError::UnsupportedType)?;
                let ext = hook.encode_ext(custom).map_err(EncodeError::HookFailed)?;
                self.write_ext(sink, &ext)
            }
        }
    }

    fn enter(&mut self) -> Result<(), EncodeError> {
        if self.depth >= self.options.max_depth {
            return Err(EncodeError::DepthLimitExceeded(self.options.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn write_nil<S: ByteSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), EncodeError> {
        sink.u8(NIL)?;
        Ok(())
    }

    pub fn write_boolean<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        b: bool,
    ) -> Result<(), EncodeError> {
        sink.u8(if b { TRUE } else { FALSE })?;
        Ok(())
    }

    pub fn write_float<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        float: f32,
    ) -> Result<(), EncodeError> {
        sink.u8f32(FLOAT32, float)?;
        Ok(())
    }

    /// Writes `int` in the shortest form: fixint, then 8/16/32-bit unsigned
    /// for positives and signed for negatives.
    pub fn write_integer<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        int: i64,
    ) -> Result<(), EncodeError> {
        match int {
            0..=0x7f => sink.u8(int as u8)?,
            -0x20..=-1 => sink.u8(int as i8 as u8)?,
            0x80..=0xff => sink.u8u8(UINT8, int as u8)?,
            0x100..=0xffff => sink.u8u16(UINT16, int as u16)?,
            0x1_0000..=0xffff_ffff => sink.u8u32(UINT32, int as u32)?,
            -0x80..=-0x21 => sink.u8u8(INT8, int as i8 as u8)?,
            -0x8000..=-0x81 => sink.u8u16(INT16, int as i16 as u16)?,
            -0x8000_0000..=-0x8001 => sink.u8u32(INT32, int as i32 as u32)?,
            _ => return Err(EncodeError::Unrepresentable("integer needs 64 bits")),
        }
        Ok(())
    }

    pub fn write_str_hdr<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        length: usize,
    ) -> Result<(), EncodeError> {
        let length = len_u32(length)?;
        if length <= 0x1f {
            sink.u8(FIXSTR | length as u8)?;
        } else if length <= 0xff {
            sink.u8u8(STR8, length as u8)?;
        } else if length <= 0xffff {
            sink.u8u16(STR16, length as u16)?;
        } else {
            sink.u8u32(STR32, length)?;
        }
        Ok(())
    }

    pub fn write_str<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        s: &str,
    ) -> Result<(), EncodeError> {
        self.write_str_hdr(sink, s.len())?;
        sink.write(s.as_bytes())?;
        Ok(())
    }

    pub fn write_bin_hdr<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        length: usize,
    ) -> Result<(), EncodeError> {
        let length = len_u32(length)?;
        if length <= 0xff {
            sink.u8u8(BIN8, length as u8)?;
        } else if length <= 0xffff {
            sink.u8u16(BIN16, length as u16)?;
        } else {
            sink.u8u32(BIN32, length)?;
        }
        Ok(())
    }

    pub fn write_bin<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        buf: &[u8],
    ) -> Result<(), EncodeError> {
        self.write_bin_hdr(sink, buf.len())?;
        sink.write(buf)?;
        Ok(())
    }

    pub fn write_arr_hdr<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        length: usize,
    ) -> Result<(), EncodeError> {
        let length = len_u32(length)?;
        if length <= 0xf {
            sink.u8(FIXARRAY | length as u8)?;
        } else if length <= 0xffff {
            sink.u8u16(ARRAY16, length as u16)?;
        } else {
            sink.u8u32(ARRAY32, length)?;
        }
        Ok(())
    }

    fn write_arr<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        items: &[Value<T>],
    ) -> Result<(), EncodeError> {
        self.enter()?;
        self.write_arr_hdr(sink, items.len())?;
        for item in items {
            self.write_any(sink, item)?;
        }
        self.depth -= 1;
        Ok(())
    }

    pub fn write_map_hdr<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        length: usize,
    ) -> Result<(), EncodeError> {
        let length = len_u32(length)?;
        if length <= 0xf {
            sink.u8(FIXMAP | length as u8)?;
        } else if length <= 0xffff {
            sink.u8u16(MAP16, length as u16)?;
        } else {
            sink.u8u32(MAP32, length)?;
        }
        Ok(())
    }

    fn write_map<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        pairs: &[(Value<T>, Value<T>)],
    ) -> Result<(), EncodeError> {
        self.enter()?;
        self.write_map_hdr(sink, pairs.len())?;
        for (key, val) in pairs {
            self.write_any(sink, key)?;
            self.write_any(sink, val)?;
        }
        self.depth -= 1;
        Ok(())
    }

    /// Writes the frame header: fixext when the length allows, else ext8/16/32
    /// with an explicit length. The type code comes last in both cases.
    pub fn write_ext_hdr<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        code: u8,
        length: usize,
    ) -> Result<(), EncodeError> {
        match length {
            1 => sink.u8u8(FIXEXT1, code)?,
            2 => sink.u8u8(FIXEXT2, code)?,
            4 => sink.u8u8(FIXEXT4, code)?,
            8 => sink.u8u8(FIXEXT8, code)?,
            16 => sink.u8u8(FIXEXT16, code)?,
            _ => {
                let length = len_u32(length)?;
                if length <= 0xff {
                    sink.u8u8(EXT8, length as u8)?;
                } else if length <= 0xffff {
                    sink.u8u16(EXT16, length as u16)?;
                } else {
                    sink.u8u32(EXT32, length)?;
                }
                sink.u8(code)?;
            }
        }
        Ok(())
    }

    pub fn write_ext<S: ByteSink + ?Sized>(
        &mut self,
        sink: &mut S,
        ext: &ExtType,
    ) -> Result<(), EncodeError> {
        self.write_ext_hdr(sink, ext.code(), ext.data().len())?;
        sink.write(ext.data())?;
        Ok(())
    }
}
