//! Binary buffer writer with auto-growing capacity.

use crate::{BufferError, ByteSink};

/// A binary buffer writer that grows automatically as needed.
///
/// Bytes between the last flush position and the cursor are pending; [`flush`]
/// hands them out and starts a new pending region.
///
/// # Example
///
/// ```
/// use tinypack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u8u16(0xcd, 0x0203);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0xcd, 0x02, 0x03]);
/// ```
///
/// [`flush`]: Writer::flush
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
    /// Position where last flush happened.
    pub x0: usize,
    /// Current cursor position.
    pub x: usize,
    /// Allocation size when buffer needs to grow.
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default allocation size (1KB).
    pub fn new() -> Self {
        Self::with_alloc_size(1024)
    }

    /// Creates a new writer with custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        Self {
            uint8: vec![0u8; alloc_size],
            x0: 0,
            x: 0,
            alloc_size,
        }
    }

    /// Ensures the buffer has at least `capacity` bytes available.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let remaining = self.uint8.len() - self.x;
        if remaining < capacity {
            let total = self.uint8.len() - self.x0;
            let required = capacity - remaining;
            let total_required = total + required;
            let new_size = if total_required <= self.alloc_size {
                self.alloc_size
            } else {
                total_required * 2
            };
            self.grow(new_size);
        }
    }

    // Pending bytes move to the front of the new buffer.
    fn grow(&mut self, new_size: usize) {
        let x0 = self.x0;
        let x = self.x;
        let mut new_buf = vec![0u8; new_size];
        new_buf[..x - x0].copy_from_slice(&self.uint8[x0..x]);
        self.uint8 = new_buf;
        self.x = x - x0;
        self.x0 = 0;
    }

    /// Returns the pending bytes and advances the flush position.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        result
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Writes two bytes: a marker and a payload byte.
    #[inline]
    pub fn u8u8(&mut self, marker: u8, val: u8) {
        self.ensure_capacity(2);
        self.uint8[self.x] = marker;
        self.uint8[self.x + 1] = val;
        self.x += 2;
    }

    /// Writes a u8 followed by a u16 (big-endian).
    pub fn u8u16(&mut self, u8_val: u8, u16_val: u16) {
        self.ensure_capacity(3);
        self.uint8[self.x] = u8_val;
        self.uint8[self.x + 1..self.x + 3].copy_from_slice(&u16_val.to_be_bytes());
        self.x += 3;
    }

    /// Writes a u8 followed by a u32 (big-endian).
    pub fn u8u32(&mut self, u8_val: u8, u32_val: u32) {
        self.ensure_capacity(5);
        self.uint8[self.x] = u8_val;
        self.uint8[self.x + 1..self.x + 5].copy_from_slice(&u32_val.to_be_bytes());
        self.x += 5;
    }

    /// Writes a u8 followed by a f32 (big-endian).
    pub fn u8f32(&mut self, u8_val: u8, f32_val: f32) {
        self.u8u32(u8_val, f32_val.to_bits());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(buf);
        self.x += length;
    }
}

impl ByteSink for Writer {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.buf(bytes);
        Ok(())
    }

    fn u8(&mut self, val: u8) -> Result<(), BufferError> {
        Writer::u8(self, val);
        Ok(())
    }

    fn u8u8(&mut self, marker: u8, val: u8) -> Result<(), BufferError> {
        Writer::u8u8(self, marker, val);
        Ok(())
    }

    fn u8u16(&mut self, marker: u8, val: u16) -> Result<(), BufferError> {
        Writer::u8u16(self, marker, val);
        Ok(())
    }

    fn u8u32(&mut self, marker: u8, val: u32) -> Result<(), BufferError> {
        Writer::u8u32(self, marker, val);
        Ok(())
    }

    fn u8f32(&mut self, marker: u8, val: f32) -> Result<(), BufferError> {
        Writer::u8f32(self, marker, val);
        Ok(())
    }
}
