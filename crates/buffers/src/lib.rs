//! Binary buffer utilities for bplist-rs.
//!
//! The binary plist format is big-endian throughout, so both halves of
//! this crate read and write multi-byte values in network order.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use bplist_buffers::{Reader, Writer};
//!
//! // Write some data
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.ascii("hello");
//! let data = writer.flush();
//!
//! // Read it back
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), 0x01);
//! assert_eq!(reader.u16(), 0x0203);
//! assert_eq!(reader.ascii(5), "hello");
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
