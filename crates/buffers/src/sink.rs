//! Append-only byte destinations.

use std::io::Write;

use crate::BufferError;

/// Append-only destination for encoded bytes.
///
/// Only [`write`](ByteSink::write) is required. The header helpers write a
/// marker byte followed by a big-endian field; sinks with direct buffer access
/// (such as [`Writer`](crate::Writer)) override them to avoid the temporary.
pub trait ByteSink {
    /// Appends all of `bytes` or fails.
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError>;

    fn u8(&mut self, val: u8) -> Result<(), BufferError> {
        self.write(&[val])
    }

    /// Writes a marker byte followed by one payload byte.
    fn u8u8(&mut self, marker: u8, val: u8) -> Result<(), BufferError> {
        self.write(&[marker, val])
    }

    fn u8u16(&mut self, marker: u8, val: u16) -> Result<(), BufferError> {
        let [b0, b1] = val.to_be_bytes();
        self.write(&[marker, b0, b1])
    }

    fn u8u32(&mut self, marker: u8, val: u32) -> Result<(), BufferError> {
        let [b0, b1, b2, b3] = val.to_be_bytes();
        self.write(&[marker, b0, b1, b2, b3])
    }

    fn u8f32(&mut self, marker: u8, val: f32) -> Result<(), BufferError> {
        self.u8u32(marker, val.to_bits())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        (**self).write(bytes)
    }

    fn u8(&mut self, val: u8) -> Result<(), BufferError> {
        (**self).u8(val)
    }

    fn u8u8(&mut self, marker: u8, val: u8) -> Result<(), BufferError> {
        (**self).u8u8(marker, val)
    }

    fn u8u16(&mut self, marker: u8, val: u16) -> Result<(), BufferError> {
        (**self).u8u16(marker, val)
    }

    fn u8u32(&mut self, marker: u8, val: u32) -> Result<(), BufferError> {
        (**self).u8u32(marker, val)
    }

    fn u8f32(&mut self, marker: u8, val: f32) -> Result<(), BufferError> {
        (**self).u8f32(marker, val)
    }
}

impl ByteSink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// [`ByteSink`] over any [`std::io::Write`] stream.
///
/// Bytes are handed to the stream as they are produced; wrap the stream in a
/// `BufWriter` if it is expensive to call.
pub struct IoSink<W> {
    inner: W,
    written: usize,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Total number of bytes accepted so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }
}
