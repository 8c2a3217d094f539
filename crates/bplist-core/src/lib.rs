//! High-level surface over the binary plist stack.
//!
//! Re-exports the value model and codec, and adds the pieces callers
//! use instead of touching the codec directly: path-based navigation
//! and mutation, and structural diff for testing and tooling.
//!
//! ```
//! use bplist_core::{decode_bytes, encode_to_bytes, navigator, PlistValue};
//!
//! let mut tree = PlistValue::dict([("volume", PlistValue::Integer(7))]);
//! navigator::set(&mut tree, "/volume", PlistValue::Integer(11)).unwrap();
//!
//! let bytes = encode_to_bytes(&tree);
//! let back = decode_bytes(&bytes).unwrap();
//! assert_eq!(back, tree);
//! ```

pub mod diff;
pub mod navigator;

pub use bplist_codec::{
    DecodeOptions, PlistDate, PlistDecoder, PlistEncoder, PlistError, PlistKind, PlistValue,
};
pub use bplist_path::{format_plist_path, parse_plist_path, parse_plist_path_relaxed, PathError};

pub use diff::{diff, Change, DiffEntry};
pub use navigator::NavError;

/// Decodes a binary plist document with default options.
pub fn decode_bytes(data: &[u8]) -> Result<PlistValue, PlistError> {
    PlistDecoder::new().decode(data)
}

/// Decodes a binary plist document with explicit options.
pub fn decode_bytes_with(data: &[u8], options: DecodeOptions) -> Result<PlistValue, PlistError> {
    PlistDecoder::with_options(options).decode(data)
}

/// Encodes a tree into a binary plist document.
pub fn encode_to_bytes(value: &PlistValue) -> Vec<u8> {
    PlistEncoder::new().encode(value)
}
