use thiserror::Error;

/// Failure reported by a [`ByteSink`](crate::ByteSink) or
/// [`ByteSource`](crate::ByteSource).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("end of buffer")]
    EndOfBuffer,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("i/o error: {0}")]
    Io(std::io::ErrorKind),
}

impl From<std::io::Error> for BufferError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => BufferError::EndOfBuffer,
            kind => BufferError::Io(kind),
        }
    }
}
