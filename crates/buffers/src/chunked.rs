//! Byte source that reads across chunk boundaries.

use std::collections::VecDeque;

use crate::{BufferError, ByteSource};

/// A [`ByteSource`] fed by a sequence of chunks, such as serial or USB packets.
///
/// Chunks are not merged into one buffer. Reads copy across boundaries as
/// needed and fully consumed chunks are dropped.
#[derive(Debug, Default)]
pub struct ChunkedSource {
    chunks: VecDeque<Vec<u8>>,
    /// Current position within the front chunk.
    x: usize,
    /// Unread bytes across all chunks.
    size: usize,
    /// Bytes consumed since creation.
    consumed: usize,
}

impl ChunkedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bytes remaining to be read.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Adds a chunk of data to be read.
    pub fn push(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        self.size += chunk.len();
        self.chunks.push_back(chunk);
    }

    fn advance(&mut self, mut n: usize) {
        self.size -= n;
        self.consumed += n;
        while n > 0 {
            let Some(chunk) = self.chunks.front() else {
                return;
            };
            let available = chunk.len() - self.x;
            if available > n {
                self.x += n;
                return;
            }
            n -= available;
            self.chunks.pop_front();
            self.x = 0;
        }
    }
}

impl ByteSource for ChunkedSource {
    fn read(&mut self, out: &mut [u8]) -> Result<(), BufferError> {
        if out.len() > self.size {
            return Err(BufferError::EndOfBuffer);
        }
        let mut dst_pos = 0;
        let mut local_x = self.x;
        for chunk in &self.chunks {
            if dst_pos == out.len() {
                break;
            }
            let to_copy = (chunk.len() - local_x).min(out.len() - dst_pos);
            out[dst_pos..dst_pos + to_copy].copy_from_slice(&chunk[local_x..local_x + to_copy]);
            dst_pos += to_copy;
            local_x = 0;
        }
        self.advance(out.len());
        Ok(())
    }

    fn position(&self) -> usize {
        self.consumed
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.size)
    }

    fn skip(&mut self, size: usize) -> Result<(), BufferError> {
        if size > self.size {
            return Err(BufferError::EndOfBuffer);
        }
        self.advance(size);
        Ok(())
    }
}
