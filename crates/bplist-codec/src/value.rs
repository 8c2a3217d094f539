//! [`PlistValue`] — the tagged plist node representation.

use std::fmt;

use crate::date::PlistDate;
use crate::error::PlistError;

/// The kind of a [`PlistValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlistKind {
    Null,
    Bool,
    Integer,
    Real,
    Date,
    Str,
    Bytes,
    Uid,
    Array,
    Dict,
}

impl fmt::Display for PlistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlistKind::Null => "null",
            PlistKind::Bool => "bool",
            PlistKind::Integer => "integer",
            PlistKind::Real => "real",
            PlistKind::Date => "date",
            PlistKind::Str => "string",
            PlistKind::Bytes => "data",
            PlistKind::Uid => "uid",
            PlistKind::Array => "array",
            PlistKind::Dict => "dict",
        };
        f.write_str(name)
    }
}

/// A node in a plist tree.
///
/// Containers exclusively own their children, so a value is always a
/// tree: dropping a container drops its subtree, cloning deep-copies it,
/// and reference cycles cannot be constructed. Dictionaries keep their
/// entries in insertion order with unique keys, which is what makes
/// encode/decode round-trips structurally stable.
#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Date(PlistDate),
    Str(String),
    Bytes(Vec<u8>),
    Uid(u64),
    Array(Vec<PlistValue>),
    Dict(Vec<(String, PlistValue)>),
}

impl PlistValue {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> PlistKind {
        match self {
            PlistValue::Null => PlistKind::Null,
            PlistValue::Bool(_) => PlistKind::Bool,
            PlistValue::Integer(_) => PlistKind::Integer,
            PlistValue::Real(_) => PlistKind::Real,
            PlistValue::Date(_) => PlistKind::Date,
            PlistValue::Str(_) => PlistKind::Str,
            PlistValue::Bytes(_) => PlistKind::Bytes,
            PlistValue::Uid(_) => PlistKind::Uid,
            PlistValue::Array(_) => PlistKind::Array,
            PlistValue::Dict(_) => PlistKind::Dict,
        }
    }

    fn mismatch(&self, expected: PlistKind) -> PlistError {
        PlistError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_bool(&self) -> Result<bool, PlistError> {
        match self {
            PlistValue::Bool(b) => Ok(*b),
            other => Err(other.mismatch(PlistKind::Bool)),
        }
    }

    pub fn as_integer(&self) -> Result<i64, PlistError> {
        match self {
            PlistValue::Integer(i) => Ok(*i),
            other => Err(other.mismatch(PlistKind::Integer)),
        }
    }

    pub fn as_real(&self) -> Result<f64, PlistError> {
        match self {
            PlistValue::Real(r) => Ok(*r),
            other => Err(other.mismatch(PlistKind::Real)),
        }
    }

    pub fn as_date(&self) -> Result<PlistDate, PlistError> {
        match self {
            PlistValue::Date(d) => Ok(*d),
            other => Err(other.mismatch(PlistKind::Date)),
        }
    }

    pub fn as_str(&self) -> Result<&str, PlistError> {
        match self {
            PlistValue::Str(s) => Ok(s),
            other => Err(other.mismatch(PlistKind::Str)),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], PlistError> {
        match self {
            PlistValue::Bytes(b) => Ok(b),
            other => Err(other.mismatch(PlistKind::Bytes)),
        }
    }

    pub fn as_uid(&self) -> Result<u64, PlistError> {
        match self {
            PlistValue::Uid(u) => Ok(*u),
            other => Err(other.mismatch(PlistKind::Uid)),
        }
    }

    pub fn as_array(&self) -> Result<&[PlistValue], PlistError> {
        match self {
            PlistValue::Array(items) => Ok(items),
            other => Err(other.mismatch(PlistKind::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<PlistValue>, PlistError> {
        match self {
            PlistValue::Array(items) => Ok(items),
            other => Err(other.mismatch(PlistKind::Array)),
        }
    }

    pub fn as_dict(&self) -> Result<&[(String, PlistValue)], PlistError> {
        match self {
            PlistValue::Dict(pairs) => Ok(pairs),
            other => Err(other.mismatch(PlistKind::Dict)),
        }
    }

    pub fn as_dict_mut(&mut self) -> Result<&mut Vec<(String, PlistValue)>, PlistError> {
        match self {
            PlistValue::Dict(pairs) => Ok(pairs),
            other => Err(other.mismatch(PlistKind::Dict)),
        }
    }

    /// Builds an array value from the given items.
    pub fn array<I: IntoIterator<Item = PlistValue>>(items: I) -> Self {
        PlistValue::Array(items.into_iter().collect())
    }

    /// Builds a dictionary value from the given pairs.
    ///
    /// Later duplicates of a key replace the earlier entry in place, so
    /// keys stay unique and first-insertion order is preserved.
    pub fn dict<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PlistValue)>,
    {
        let mut value = PlistValue::Dict(Vec::new());
        for (key, item) in pairs {
            // dict on a Dict value cannot mismatch
            let _ = value.dict_set(key.into(), item);
        }
        value
    }

    /// Looks up a dictionary entry by key.
    pub fn dict_get(&self, key: &str) -> Option<&PlistValue> {
        match self {
            PlistValue::Dict(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Inserts or replaces a dictionary entry, returning the replaced
    /// value if the key already existed.
    ///
    /// Replacement keeps the entry's original position; a new key is
    /// appended.
    pub fn dict_set(
        &mut self,
        key: impl Into<String>,
        value: PlistValue,
    ) -> Result<Option<PlistValue>, PlistError> {
        let key = key.into();
        let pairs = self.as_dict_mut()?;
        for (k, v) in pairs.iter_mut() {
            if *k == key {
                return Ok(Some(std::mem::replace(v, value)));
            }
        }
        pairs.push((key, value));
        Ok(None)
    }

    /// Removes a dictionary entry by key, returning it if present.
    pub fn dict_remove(&mut self, key: &str) -> Result<Option<PlistValue>, PlistError> {
        let pairs = self.as_dict_mut()?;
        match pairs.iter().position(|(k, _)| k == key) {
            Some(index) => Ok(Some(pairs.remove(index).1)),
            None => Ok(None),
        }
    }

    /// Number of children for containers, 0 for scalars.
    pub fn len(&self) -> usize {
        match self {
            PlistValue::Array(items) => items.len(),
            PlistValue::Dict(pairs) => pairs.len(),
            _ => 0,
        }
    }

    /// Returns `true` for an empty container or any scalar.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<bool> for PlistValue {
    fn from(val: bool) -> Self {
        PlistValue::Bool(val)
    }
}

impl From<i64> for PlistValue {
    fn from(val: i64) -> Self {
        PlistValue::Integer(val)
    }
}

impl From<i32> for PlistValue {
    fn from(val: i32) -> Self {
        PlistValue::Integer(val as i64)
    }
}

impl From<f64> for PlistValue {
    fn from(val: f64) -> Self {
        PlistValue::Real(val)
    }
}

impl From<&str> for PlistValue {
    fn from(val: &str) -> Self {
        PlistValue::Str(val.to_owned())
    }
}

impl From<String> for PlistValue {
    fn from(val: String) -> Self {
        PlistValue::Str(val)
    }
}

impl From<Vec<u8>> for PlistValue {
    fn from(val: Vec<u8>) -> Self {
        PlistValue::Bytes(val)
    }
}

impl From<PlistDate> for PlistValue {
    fn from(val: PlistDate) -> Self {
        PlistValue::Date(val)
    }
}
