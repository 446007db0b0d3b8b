//! Byte sinks and sources used by the tinypack codec.
//!
//! The codec never touches storage directly. It writes through a [`ByteSink`]
//! and reads through a [`ByteSource`]; this crate provides the traits plus the
//! concrete buffers firmware callers usually hand in:
//!
//! - [`Writer`]: auto-growing in-memory output buffer.
//! - [`Reader`]: bounded cursor over a borrowed slice.
//! - [`ChunkedSource`]: reads across packets that arrive piecemeal.
//! - [`IoSink`] / [`IoSource`]: adapters over `std::io` streams.

mod chunked;
mod error;
mod reader;
mod sink;
mod source;
mod writer;

pub use chunked::ChunkedSource;
pub use error::BufferError;
pub use reader::Reader;
pub use sink::{ByteSink, IoSink};
pub use source::{ByteSource, IoSource};
pub use writer::Writer;
