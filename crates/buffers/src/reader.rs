//! Binary buffer reader with cursor tracking.

use std::ops::{Bound, RangeBounds};
use std::str;

use crate::{BufferError, ByteSource};

/// A binary buffer reader over a borrowed byte slice.
///
/// The reader is confined to the half-open window `x..end`; by default that is
/// the whole slice. Every read is bounds-checked and leaves the cursor where it
/// was when it fails.
///
/// # Example
///
/// ```
/// use tinypack_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u8(), Ok(0x01));
/// assert_eq!(reader.try_u16(), Ok(0x0203));
/// assert_eq!(reader.size(), 1);
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader confined to `range` of `uint8`.
    ///
    /// Unbounded ends default to the start and end of the slice. A range that
    /// does not fit inside the slice fails with [`BufferError::EndOfBuffer`].
    pub fn with_range(uint8: &'a [u8], range: impl RangeBounds<usize>) -> Result<Self, BufferError> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.checked_add(1).ok_or(BufferError::EndOfBuffer)?,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.checked_add(1).ok_or(BufferError::EndOfBuffer)?,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => uint8.len(),
        };
        if start > end || end > uint8.len() {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(Self {
            uint8,
            x: start,
            end,
        })
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Bytes between the cursor and the end of the window.
    pub fn rest(&self) -> &'a [u8] {
        &self.uint8[self.x..self.end]
    }

    /// Checks that `n` more bytes are available from the current cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if n > self.size() {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    /// Advances the cursor by `length` bytes.
    pub fn try_skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.check(length)?;
        self.x += length;
        Ok(())
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads a signed 8-bit integer.
    #[inline]
    pub fn try_i8(&mut self) -> Result<i8, BufferError> {
        self.try_u8().map(|v| v as i8)
    }

    /// Reads an unsigned 16-bit big-endian integer.
    #[inline]
    pub fn try_u16(&mut self) -> Result<u16, BufferError> {
        self.check(2)?;
        let x = self.x;
        let val = ((self.uint8[x] as u16) << 8) | (self.uint8[x + 1] as u16);
        self.x += 2;
        Ok(val)
    }

    /// Reads a signed 16-bit big-endian integer.
    #[inline]
    pub fn try_i16(&mut self) -> Result<i16, BufferError> {
        self.try_u16().map(|v| v as i16)
    }

    /// Reads an unsigned 32-bit big-endian integer.
    #[inline]
    pub fn try_u32(&mut self) -> Result<u32, BufferError> {
        self.check(4)?;
        let val = u32::from_be_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads a signed 32-bit big-endian integer.
    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        self.try_u32().map(|v| v as i32)
    }

    /// Reads a 32-bit big-endian float.
    #[inline]
    pub fn try_f32(&mut self) -> Result<f32, BufferError> {
        self.try_u32().map(f32::from_bits)
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        Ok(bin)
    }

    /// Reads a UTF-8 string of `size` bytes.
    ///
    /// On invalid UTF-8 the cursor still moves past the bytes.
    pub fn try_utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        let bytes = self.try_buf(size)?;
        str::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8)
    }
}

impl ByteSource for Reader<'_> {
    fn read(&mut self, out: &mut [u8]) -> Result<(), BufferError> {
        let bytes = self.try_buf(out.len())?;
        out.copy_from_slice(bytes);
        Ok(())
    }

    fn position(&self) -> usize {
        self.x
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.size())
    }

    fn u8(&mut self) -> Result<u8, BufferError> {
        self.try_u8()
    }

    fn u16(&mut self) -> Result<u16, BufferError> {
        self.try_u16()
    }

    fn u32(&mut self) -> Result<u32, BufferError> {
        self.try_u32()
    }

    fn buf(&mut self, size: usize) -> Result<Vec<u8>, BufferError> {
        self.try_buf(size).map(<[u8]>::to_vec)
    }

    fn utf8(&mut self, size: usize) -> Result<String, BufferError> {
        self.try_utf8(size).map(str::to_owned)
    }

    fn skip(&mut self, size: usize) -> Result<(), BufferError> {
        self.try_skip(size)
    }
}
