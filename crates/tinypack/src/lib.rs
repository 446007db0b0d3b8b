//! MessagePack subset codec for firmware-class targets.
//!
//! Supports nil, bool, integers up to 32 bits, float32, str, bin, array, map
//! and application extension types 0..=127. The 64-bit integer and float64
//! formats are neither written nor accepted.
//!
//! ```
//! use tinypack::{packb, unpackb, ExtType, Value};
//!
//! let value: Value = Value::Map(vec![
//!     (Value::from("id"), Value::from(65_536u32)),
//!     (Value::from("tag"), Value::Ext(ExtType::new(5, b"hello").unwrap())),
//! ]);
//! let bytes = packb(&value, None).unwrap();
//! assert_eq!(unpackb(&bytes, None, true).unwrap(), value);
//! ```
//!
//! Application types travel as [`Value::Custom`] on the way in and come back
//! through an extension hook:
//!
//! ```
//! use tinypack::{packb, unpackb, ExtType, HookError, Value};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Celsius(i8);
//!
//! let mut default = |c: &Celsius| -> Result<ExtType, HookError> {
//!     Ok(ExtType::new(1, vec![c.0 as u8])?)
//! };
//! let mut ext_hook = |code: u8, data: Vec<u8>| -> Result<Value<Celsius>, HookError> {
//!     match (code, data.as_slice()) {
//!         (1, [b]) => Ok(Value::Custom(Celsius(*b as i8))),
//!         _ => Err("unknown extension".into()),
//!     }
//! };
//!
//! let bytes = packb(&Value::Custom(Celsius(-4)), Some(&mut default)).unwrap();
//! assert_eq!(bytes, [0xd4, 0x01, 0xfc]);
//! let back = unpackb(&bytes, Some(&mut ext_hook), true).unwrap();
//! assert_eq!(back, Value::Custom(Celsius(-4)));
//! ```

pub mod constants;
mod decoder;
mod encoder;
mod error;
mod ext;
mod hooks;
mod json;
mod options;
mod util;
mod value;

pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use error::{DecodeError, EncodeError};
pub use ext::ExtType;
pub use hooks::{ExtDecoder, ExtEncoder, HookError};
pub use options::{PackOptions, UnpackOptions, DEFAULT_MAX_DEPTH};
pub use util::{pack, packb, skip, unpack, unpackb, validate};
pub use value::Value;

pub use tinypack_buffers as buffers;
