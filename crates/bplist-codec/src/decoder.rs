//! Binary plist decoder.
//!
//! Parses the `bplist00` wire format: 8-byte magic, object table,
//! big-endian offset table, 32-byte trailer. The trailer is read first
//! to locate the offset table and root object; objects are then resolved
//! recursively from the root, following collection references by index.
//!
//! All fatal errors abort the whole decode; no partial tree is returned.

use bplist_buffers::Reader;

use crate::constants::*;
use crate::date::PlistDate;
use crate::error::PlistError;
use crate::value::PlistValue;

/// Decode-time configuration.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// When set, an object with an unrecognized type marker decodes as
    /// [`PlistValue::Null`] instead of failing with
    /// [`PlistError::UnknownType`].
    pub tolerant: bool,
    /// Container nesting depth accepted before
    /// [`PlistError::DepthLimit`].
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            tolerant: false,
            max_depth: 512,
        }
    }
}

/// Binary plist decoder.
#[derive(Default)]
pub struct PlistDecoder {
    options: DecodeOptions,
}

impl PlistDecoder {
    pub fn new() -> Self {
        Self {
            options: DecodeOptions::default(),
        }
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decodes a binary plist document into a value tree.
    pub fn decode(&self, data: &[u8]) -> Result<PlistValue, PlistError> {
        let trailer = read_trailer(data)?;
        let offsets = read_offset_table(data, &trailer)?;
        let mut ctx = DecodeCtx {
            data,
            offsets,
            ref_size: trailer.object_ref_size,
            table_offset: trailer.table_offset,
            parents: Vec::new(),
            options: &self.options,
        };
        ctx.read_object(trailer.top_object, 0)
    }
}

struct Trailer {
    offset_int_size: usize,
    object_ref_size: usize,
    num_objects: usize,
    top_object: usize,
    table_offset: usize,
}

fn read_trailer(data: &[u8]) -> Result<Trailer, PlistError> {
    if data.len() < MAGIC.len() {
        return Err(PlistError::Truncated);
    }
    if &data[..MAGIC.len()] != MAGIC {
        return Err(PlistError::InvalidFormat);
    }
    if data.len() < MAGIC.len() + TRAILER_SIZE {
        return Err(PlistError::Truncated);
    }

    let mut reader = Reader::from_slice(data, data.len() - TRAILER_SIZE, data.len());
    reader.skip(5); // unused
    let _sort_version = reader.u8();
    let offset_int_size = reader.u8() as usize;
    let object_ref_size = reader.u8() as usize;
    let num_objects = reader.u64();
    let top_object = reader.u64();
    let table_offset = reader.u64();

    if !matches!(offset_int_size, 1 | 2 | 4 | 8) || !matches!(object_ref_size, 1 | 2 | 4 | 8) {
        return Err(PlistError::InvalidFormat);
    }
    if num_objects == 0 {
        return Err(PlistError::InvalidFormat);
    }
    if top_object >= num_objects {
        return Err(PlistError::CorruptOffset);
    }
    // Each object takes at least one byte, so the count is bounded by
    // the object table region.
    let object_region = data.len() - MAGIC.len() - TRAILER_SIZE;
    if num_objects > object_region as u64 {
        return Err(PlistError::CorruptOffset);
    }

    Ok(Trailer {
        offset_int_size,
        object_ref_size,
        num_objects: num_objects as usize,
        top_object: top_object as usize,
        table_offset: table_offset as usize,
    })
}

fn read_offset_table(data: &[u8], trailer: &Trailer) -> Result<Vec<usize>, PlistError> {
    let content_end = data.len() - TRAILER_SIZE;
    let table_size = trailer
        .num_objects
        .checked_mul(trailer.offset_int_size)
        .ok_or(PlistError::CorruptOffset)?;
    let table_end = trailer
        .table_offset
        .checked_add(table_size)
        .ok_or(PlistError::CorruptOffset)?;
    if trailer.table_offset < MAGIC.len() || table_end > content_end {
        return Err(PlistError::CorruptOffset);
    }

    let mut reader = Reader::from_slice(data, trailer.table_offset, table_end);
    let mut offsets = Vec::with_capacity(trailer.num_objects);
    for _ in 0..trailer.num_objects {
        let offset = reader.uint(trailer.offset_int_size) as usize;
        if offset < MAGIC.len() || offset >= trailer.table_offset {
            return Err(PlistError::CorruptOffset);
        }
        offsets.push(offset);
    }
    Ok(offsets)
}

struct DecodeCtx<'a> {
    data: &'a [u8],
    offsets: Vec<usize>,
    ref_size: usize,
    table_offset: usize,
    /// Ancestor object indices of the resolution currently in flight.
    parents: Vec<usize>,
    options: &'a DecodeOptions,
}

impl<'a> DecodeCtx<'a> {
    fn read_object(&mut self, index: usize, depth: usize) -> Result<PlistValue, PlistError> {
        if depth > self.options.max_depth {
            return Err(PlistError::DepthLimit);
        }
        if index >= self.offsets.len() {
            return Err(PlistError::CorruptOffset);
        }
        if self.parents.contains(&index) {
            return Err(PlistError::CycleDetected);
        }

        let mut reader = Reader::from_slice(self.data, self.offsets[index], self.table_offset);
        ensure(&reader, 1)?;
        let marker = reader.u8();
        let low = marker & 0x0F;

        match marker >> 4 {
            TYPE_SIMPLE => match marker {
                MARKER_NULL => Ok(PlistValue::Null),
                MARKER_FALSE => Ok(PlistValue::Bool(false)),
                MARKER_TRUE => Ok(PlistValue::Bool(true)),
                _ => self.unknown(marker),
            },
            TYPE_INT => {
                if low > 3 {
                    return self.unknown(marker);
                }
                let width = 1usize << low;
                ensure(&reader, width)?;
                let val = reader.uint(width);
                // 1/2/4-byte integers are unsigned, 8-byte is signed
                Ok(PlistValue::Integer(val as i64))
            }
            TYPE_REAL => match low {
                2 => {
                    ensure(&reader, 4)?;
                    Ok(PlistValue::Real(reader.f32() as f64))
                }
                3 => {
                    ensure(&reader, 8)?;
                    Ok(PlistValue::Real(reader.f64()))
                }
                _ => self.unknown(marker),
            },
            TYPE_DATE => {
                if marker != MARKER_DATE {
                    return self.unknown(marker);
                }
                ensure(&reader, 8)?;
                Ok(PlistValue::Date(PlistDate::from_apple_seconds(reader.f64())))
            }
            TYPE_DATA => {
                let count = self.read_count(&mut reader, low)?;
                ensure(&reader, count)?;
                Ok(PlistValue::Bytes(reader.buf(count).to_vec()))
            }
            TYPE_ASCII => {
                let count = self.read_count(&mut reader, low)?;
                ensure(&reader, count)?;
                let bytes = reader.buf(count);
                let s = std::str::from_utf8(bytes).map_err(|_| PlistError::InvalidFormat)?;
                Ok(PlistValue::Str(s.to_owned()))
            }
            TYPE_UTF16 => {
                let count = self.read_count(&mut reader, low)?;
                let byte_len = count.checked_mul(2).ok_or(PlistError::Truncated)?;
                ensure(&reader, byte_len)?;
                let mut units = Vec::with_capacity(count);
                for _ in 0..count {
                    units.push(reader.u16());
                }
                let s = String::from_utf16(&units).map_err(|_| PlistError::InvalidFormat)?;
                Ok(PlistValue::Str(s))
            }
            TYPE_UID => {
                if low > 7 {
                    return self.unknown(marker);
                }
                let width = low as usize + 1;
                ensure(&reader, width)?;
                Ok(PlistValue::Uid(reader.uint(width)))
            }
            TYPE_ARRAY => {
                let count = self.read_count(&mut reader, low)?;
                let refs = self.read_refs(&mut reader, count)?;
                self.parents.push(index);
                let mut items = Vec::with_capacity(refs.len());
                for child in refs {
                    items.push(self.read_object(child, depth + 1)?);
                }
                self.parents.pop();
                Ok(PlistValue::Array(items))
            }
            TYPE_DICT => {
                let count = self.read_count(&mut reader, low)?;
                let key_refs = self.read_refs(&mut reader, count)?;
                let val_refs = self.read_refs(&mut reader, count)?;
                self.parents.push(index);
                let mut pairs = Vec::with_capacity(count);
                for (key_ref, val_ref) in key_refs.into_iter().zip(val_refs) {
                    let key = match self.read_object(key_ref, depth + 1)? {
                        PlistValue::Str(s) => s,
                        _ => return Err(PlistError::InvalidFormat),
                    };
                    let val = self.read_object(val_ref, depth + 1)?;
                    pairs.push((key, val));
                }
                self.parents.pop();
                Ok(PlistValue::Dict(pairs))
            }
            _ => self.unknown(marker),
        }
    }

    /// Reads a marker's count, following the extended-length integer
    /// record when the inline nibble is 0xF.
    fn read_count(&self, reader: &mut Reader, low: u8) -> Result<usize, PlistError> {
        if low != COUNT_EXTENDED {
            return Ok(low as usize);
        }
        ensure(reader, 1)?;
        let int_marker = reader.u8();
        if int_marker >> 4 != TYPE_INT || int_marker & 0x0F > 3 {
            return Err(PlistError::InvalidFormat);
        }
        let width = 1usize << (int_marker & 0x0F);
        ensure(reader, width)?;
        Ok(reader.uint(width) as usize)
    }

    fn read_refs(&self, reader: &mut Reader, count: usize) -> Result<Vec<usize>, PlistError> {
        let total = count
            .checked_mul(self.ref_size)
            .ok_or(PlistError::Truncated)?;
        ensure(reader, total)?;
        let mut refs = Vec::with_capacity(count);
        for _ in 0..count {
            refs.push(reader.uint(self.ref_size) as usize);
        }
        Ok(refs)
    }

    fn unknown(&self, marker: u8) -> Result<PlistValue, PlistError> {
        if self.options.tolerant {
            Ok(PlistValue::Null)
        } else {
            Err(PlistError::UnknownType(marker))
        }
    }
}

fn ensure(reader: &Reader, size: usize) -> Result<(), PlistError> {
    if reader.size() < size {
        Err(PlistError::Truncated)
    } else {
        Ok(())
    }
}
