//! Binary property-list value model and codec.
//!
//! A plist tree is a [`PlistValue`] — a tagged union of the plist node
//! kinds. [`PlistDecoder`] parses the `bplist00` wire format into a
//! tree, [`PlistEncoder`] serializes a tree back to canonical bytes
//! with wire-level object deduplication. Both are pure, synchronous
//! transformations over in-memory buffers; file or network I/O is the
//! caller's business.

pub mod constants;

mod date;
mod decoder;
mod encoder;
mod error;
mod value;

pub use date::{PlistDate, APPLE_EPOCH_UNIX_MILLIS};
pub use decoder::{DecodeOptions, PlistDecoder};
pub use encoder::PlistEncoder;
pub use error::PlistError;
pub use value::{PlistKind, PlistValue};
