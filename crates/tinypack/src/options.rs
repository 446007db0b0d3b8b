//! Encoder and decoder options.

use serde::{Deserialize, Serialize};

/// Nesting limit used when none is configured.
///
/// Encoding and decoding recurse once per container level, and firmware stacks
/// are small.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Options controlling encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackOptions {
    /// Maximum number of nested arrays/maps.
    pub max_depth: usize,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl PackOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options controlling decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnpackOptions {
    /// Decode arrays as [`Value::Array`](crate::Value::Array) when `true`
    /// (default), as [`Value::Tuple`](crate::Value::Tuple) otherwise.
    pub use_list: bool,
    /// Maximum number of nested arrays/maps.
    pub max_depth: usize,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        Self {
            use_list: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl UnpackOptions {
    pub fn with_use_list(mut self, use_list: bool) -> Self {
        self.use_list = use_list;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
