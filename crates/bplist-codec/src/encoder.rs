//! Binary plist encoder.
//!
//! Serializes a value tree into canonical `bplist00` bytes. Objects are
//! enumerated in stable depth-first order (dictionary keys before
//! values, in stored order) and byte-identical Integer/Str/Bytes leaves
//! collapse into a single shared object index. The sharing is purely a
//! wire-level concern; decoding always materializes independent values.
//!
//! Encoding the same tree twice yields byte-identical output.

use std::collections::HashMap;

use bplist_buffers::Writer;

use crate::constants::*;
use crate::date::PlistDate;
use crate::value::PlistValue;

/// Binary plist encoder.
pub struct PlistEncoder {
    pub writer: Writer,
}

impl Default for PlistEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlistEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes a value tree into a binary plist document.
    pub fn encode(&mut self, value: &PlistValue) -> Vec<u8> {
        let mut flattener = Flattener::default();
        let root_index = flattener.flatten(value);
        let objects = flattener.objects;

        let ref_size = min_uint_width((objects.len() - 1) as u64);

        self.writer.reset();
        self.writer.buf(MAGIC);

        let mut offsets = Vec::with_capacity(objects.len());
        for object in &objects {
            offsets.push(self.writer.size());
            self.write_object(object, ref_size);
        }

        let table_offset = self.writer.size();
        let offset_size = min_uint_width(offsets.last().copied().unwrap_or(0) as u64);
        for &offset in &offsets {
            self.writer.uint(offset as u64, offset_size);
        }

        self.writer.buf(&[0u8; 5]); // unused
        self.writer.u8(0); // sort version
        self.writer.u8(offset_size as u8);
        self.writer.u8(ref_size as u8);
        self.writer.u64(objects.len() as u64);
        self.writer.u64(root_index as u64);
        self.writer.u64(table_offset as u64);

        self.writer.flush()
    }

    fn write_object(&mut self, object: &WireObject, ref_size: usize) {
        match object {
            WireObject::Null => self.writer.u8(MARKER_NULL),
            WireObject::Bool(b) => self.writer.u8(if *b { MARKER_TRUE } else { MARKER_FALSE }),
            WireObject::Integer(int) => self.write_integer(*int),
            WireObject::Real(real) => {
                self.writer.u8(MARKER_REAL | 3);
                self.writer.f64(*real);
            }
            WireObject::Date(date) => {
                self.writer.u8(MARKER_DATE);
                self.writer.f64(date.apple_seconds());
            }
            WireObject::Uid(uid) => {
                let width = min_uint_width(*uid);
                self.writer.u8(MARKER_UID | (width - 1) as u8);
                self.writer.uint(*uid, width);
            }
            WireObject::Str(s) => self.write_string(s),
            WireObject::Bytes(bytes) => {
                self.write_marker(MARKER_DATA, bytes.len());
                self.writer.buf(bytes);
            }
            WireObject::Array(refs) => {
                self.write_marker(MARKER_ARRAY, refs.len());
                for &child in refs {
                    self.writer.uint(child as u64, ref_size);
                }
            }
            WireObject::Dict(refs) => {
                self.write_marker(MARKER_DICT, refs.len() / 2);
                for &child in refs {
                    self.writer.uint(child as u64, ref_size);
                }
            }
        }
    }

    /// Writes a marker byte, spilling to an extended length record only
    /// when the count does not fit the inline nibble.
    fn write_marker(&mut self, overlay: u8, count: usize) {
        if count <= COUNT_INLINE_MAX {
            self.writer.u8(overlay | count as u8);
        } else {
            self.writer.u8(overlay | COUNT_EXTENDED);
            self.write_count(count as u64);
        }
    }

    /// Writes an extended count as an integer object record.
    fn write_count(&mut self, count: u64) {
        let width = min_uint_width(count);
        self.writer.u8(MARKER_INT | width.trailing_zeros() as u8);
        self.writer.uint(count, width);
    }

    fn write_integer(&mut self, int: i64) {
        if int < 0 || int > u32::MAX as i64 {
            // negative and wide integers take the signed 8-byte form
            self.writer.u8(MARKER_INT | 3);
            self.writer.u64(int as u64);
        } else {
            let width = min_uint_width(int as u64);
            self.writer.u8(MARKER_INT | width.trailing_zeros() as u8);
            self.writer.uint(int as u64, width);
        }
    }

    fn write_string(&mut self, s: &str) {
        if s.is_ascii() {
            self.write_marker(MARKER_ASCII, s.len());
            self.writer.ascii(s);
        } else {
            let units: Vec<u16> = s.encode_utf16().collect();
            self.write_marker(MARKER_UTF16, units.len());
            for unit in units {
                self.writer.u16(unit);
            }
        }
    }
}

/// One entry of the flattened object table.
enum WireObject<'a> {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Date(PlistDate),
    Uid(u64),
    Str(&'a str),
    Bytes(&'a [u8]),
    Array(Vec<usize>),
    Dict(Vec<usize>),
}

/// Identity of a deduplicatable leaf object.
#[derive(PartialEq, Eq, Hash)]
enum DedupKey<'a> {
    Int(i64),
    Str(&'a str),
    Bytes(&'a [u8]),
}

/// Assigns object indices in depth-first order, interning dedupable
/// leaves so equal ones share an index.
#[derive(Default)]
struct Flattener<'a> {
    objects: Vec<WireObject<'a>>,
    interned: HashMap<DedupKey<'a>, usize>,
}

impl<'a> Flattener<'a> {
    fn flatten(&mut self, value: &'a PlistValue) -> usize {
        match value {
            PlistValue::Null => self.push(WireObject::Null),
            PlistValue::Bool(b) => self.push(WireObject::Bool(*b)),
            PlistValue::Integer(int) => self.intern(DedupKey::Int(*int), WireObject::Integer(*int)),
            PlistValue::Real(real) => self.push(WireObject::Real(*real)),
            PlistValue::Date(date) => self.push(WireObject::Date(*date)),
            PlistValue::Str(s) => self.intern(DedupKey::Str(s), WireObject::Str(s)),
            PlistValue::Bytes(bytes) => self.intern(DedupKey::Bytes(bytes), WireObject::Bytes(bytes)),
            PlistValue::Uid(uid) => self.push(WireObject::Uid(*uid)),
            PlistValue::Array(items) => {
                let index = self.push(WireObject::Array(Vec::new()));
                let refs: Vec<usize> = items.iter().map(|item| self.flatten(item)).collect();
                self.objects[index] = WireObject::Array(refs);
                index
            }
            PlistValue::Dict(pairs) => {
                let index = self.push(WireObject::Dict(Vec::new()));
                let mut refs: Vec<usize> = pairs
                    .iter()
                    .map(|(key, _)| self.intern(DedupKey::Str(key), WireObject::Str(key)))
                    .collect();
                for (_, val) in pairs {
                    refs.push(self.flatten(val));
                }
                self.objects[index] = WireObject::Dict(refs);
                index
            }
        }
    }

    fn push(&mut self, object: WireObject<'a>) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    fn intern(&mut self, key: DedupKey<'a>, object: WireObject<'a>) -> usize {
        if let Some(&index) = self.interned.get(&key) {
            return index;
        }
        let index = self.push(object);
        self.interned.insert(key, index);
        index
    }
}
