//! [`ExtType`]: an application extension frame.

use crate::constants::EXT_CODE_MAX;
use crate::EncodeError;

/// A MessagePack extension: a type code in `0..=127` and an opaque payload.
///
/// Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtType {
    code: u8,
    data: Vec<u8>,
}

impl ExtType {
    /// Creates an extension frame, rejecting codes outside `0..=127`.
    ///
    /// ```
    /// use tinypack::ExtType;
    ///
    /// let ext = ExtType::new(5, b"hello").unwrap();
    /// assert_eq!(ext.code(), 5);
    /// assert_eq!(ext.data(), b"hello");
    /// assert!(ExtType::new(128, Vec::new()).is_err());
    /// ```
    pub fn new(code: i64, data: impl Into<Vec<u8>>) -> Result<Self, EncodeError> {
        match u8::try_from(code) {
            Ok(code) if code <= EXT_CODE_MAX => Ok(Self {
                code,
                data: data.into(),
            }),
            _ => Err(EncodeError::ExtCodeOutOfRange(code)),
        }
    }

    /// Caller guarantees `code <= EXT_CODE_MAX`.
    pub(crate) fn from_wire(code: u8, data: Vec<u8>) -> Self {
        debug_assert!(code <= EXT_CODE_MAX);
        Self { code, data }
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_range_is_inclusive() {
        assert_eq!(ExtType::new(0, vec![1]).unwrap().code(), 0);
        assert_eq!(ExtType::new(127, vec![1]).unwrap().code(), 127);
    }

    #[test]
    fn code_out_of_range() {
        assert!(matches!(
            ExtType::new(-1, vec![]),
            Err(EncodeError::ExtCodeOutOfRange(-1))
        ));
        assert!(matches!(
            ExtType::new(128, vec![]),
            Err(EncodeError::ExtCodeOutOfRange(128))
        ));
        assert!(matches!(
            ExtType::new(1 << 40, vec![]),
            Err(EncodeError::ExtCodeOutOfRange(_))
        ));
    }
}
