use thiserror::Error;

use crate::value::PlistKind;

/// Error type for plist decoding, encoding, and typed access.
///
/// The decode-side variants are fatal: the whole operation aborts and no
/// partial tree is returned. [`PlistError::TypeMismatch`] is recoverable,
/// callers either check [`crate::PlistValue::kind`] first or handle it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlistError {
    #[error("invalid magic or version")]
    InvalidFormat,
    #[error("unexpected end of input")]
    Truncated,
    #[error("offset or object index out of bounds")]
    CorruptOffset,
    #[error("self-referential object graph")]
    CycleDetected,
    #[error("unknown object type marker 0x{0:02x}")]
    UnknownType(u8),
    #[error("recursion depth limit exceeded")]
    DepthLimit,
    #[error("expected {expected} but found {found}")]
    TypeMismatch {
        expected: PlistKind,
        found: PlistKind,
    },
}
