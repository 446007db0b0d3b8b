//! Sequential, position-tracking byte sources.

use std::io::Read;

use crate::BufferError;

/// Scratch size for copying payloads out of sources that cannot lend slices.
const COPY_CHUNK: usize = 256;

/// Sequential byte source with a read cursor.
///
/// Only [`read`](ByteSource::read) and [`position`](ByteSource::position) are
/// required. Sources that know how many bytes are left should also implement
/// [`remaining`](ByteSource::remaining): decoders use it to reject oversized
/// length fields before allocating.
pub trait ByteSource {
    /// Fills `out` completely or fails with [`BufferError::EndOfBuffer`].
    fn read(&mut self, out: &mut [u8]) -> Result<(), BufferError>;

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;

    /// Bytes still available, when the source knows it.
    fn remaining(&self) -> Option<usize> {
        None
    }

    fn u8(&mut self) -> Result<u8, BufferError> {
        let mut bytes = [0u8; 1];
        self.read(&mut bytes)?;
        Ok(bytes[0])
    }

    fn i8(&mut self) -> Result<i8, BufferError> {
        self.u8().map(|v| v as i8)
    }

    fn u16(&mut self) -> Result<u16, BufferError> {
        let mut bytes = [0u8; 2];
        self.read(&mut bytes)?;
        Ok(u16::from_be_bytes(bytes))
    }

    fn i16(&mut self) -> Result<i16, BufferError> {
        self.u16().map(|v| v as i16)
    }

    fn u32(&mut self) -> Result<u32, BufferError> {
        let mut bytes = [0u8; 4];
        self.read(&mut bytes)?;
        Ok(u32::from_be_bytes(bytes))
    }

    fn i32(&mut self) -> Result<i32, BufferError> {
        self.u32().map(|v| v as i32)
    }

    fn f32(&mut self) -> Result<f32, BufferError> {
        self.u32().map(f32::from_bits)
    }

    /// Reads `size` bytes into a new vector.
    ///
    /// Unknown-length sources are copied in bounded steps, so a corrupt length
    /// field fails on end of input instead of reserving its full size.
    fn buf(&mut self, size: usize) -> Result<Vec<u8>, BufferError> {
        if let Some(remaining) = self.remaining() {
            if size > remaining {
                return Err(BufferError::EndOfBuffer);
            }
            let mut out = vec![0u8; size];
            self.read(&mut out)?;
            return Ok(out);
        }
        let mut out = Vec::with_capacity(size.min(COPY_CHUNK));
        let mut scratch = [0u8; COPY_CHUNK];
        let mut left = size;
        while left > 0 {
            let n = left.min(COPY_CHUNK);
            self.read(&mut scratch[..n])?;
            out.extend_from_slice(&scratch[..n]);
            left -= n;
        }
        Ok(out)
    }

    /// Reads a `size`-byte UTF-8 string.
    ///
    /// The bytes are consumed even when they are not valid UTF-8.
    fn utf8(&mut self, size: usize) -> Result<String, BufferError> {
        String::from_utf8(self.buf(size)?).map_err(|_| BufferError::InvalidUtf8)
    }

    /// Advances past `size` bytes.
    fn skip(&mut self, size: usize) -> Result<(), BufferError> {
        if let Some(remaining) = self.remaining() {
            if size > remaining {
                return Err(BufferError::EndOfBuffer);
            }
        }
        let mut scratch = [0u8; COPY_CHUNK];
        let mut left = size;
        while left > 0 {
            let n = left.min(COPY_CHUNK);
            self.read(&mut scratch[..n])?;
            left -= n;
        }
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, out: &mut [u8]) -> Result<(), BufferError> {
        (**self).read(out)
    }

    fn position(&self) -> usize {
        (**self).position()
    }

    fn remaining(&self) -> Option<usize> {
        (**self).remaining()
    }

    fn u8(&mut self) -> Result<u8, BufferError> {
        (**self).u8()
    }

    fn u16(&mut self) -> Result<u16, BufferError> {
        (**self).u16()
    }

    fn u32(&mut self) -> Result<u32, BufferError> {
        (**self).u32()
    }

    fn buf(&mut self, size: usize) -> Result<Vec<u8>, BufferError> {
        (**self).buf(size)
    }

    fn utf8(&mut self, size: usize) -> Result<String, BufferError> {
        (**self).utf8(size)
    }

    fn skip(&mut self, size: usize) -> Result<(), BufferError> {
        (**self).skip(size)
    }
}

/// [`ByteSource`] over any [`std::io::Read`] stream.
///
/// The position counts bytes consumed through this adapter. A stream that ends
/// in the middle of a read reports [`BufferError::EndOfBuffer`].
pub struct IoSource<R> {
    inner: R,
    x: usize,
}

impl<R: Read> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, x: 0 }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read(&mut self, out: &mut [u8]) -> Result<(), BufferError> {
        self.inner.read_exact(out)?;
        self.x += out.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.x
    }
}
