//! Compact binary serialization of scalar values.
//!
//! A [`Writer`] appends values to a self-growing buffer and a
//! [`Reader`] consumes them again from a borrowed byte slice. The
//! format stores no type tags or field markers; a reader has to
//! issue the same sequence of calls that the writer did.
//!
//! | value            | encoding                                          |
//! |------------------|---------------------------------------------------|
//! | [`u8`]           | 1 byte                                            |
//! | [`u32`], [`u64`] | 4 or 8 bytes, big-endian                          |
//! | [`f32`]          | 4 bytes, **little-endian**                        |
//! | varint           | 1 to 6 bytes, see [`varint`]                      |
//! | bits             | packed LSB-first, `ceil(n / 8)` bytes, see [`bits`] |
//! | string           | varint UTF-8 length and the raw bytes; `0x00` when empty |
//! | bytes            | raw bytes, no length                              |
//!
//! ```
//! use wirepack::{Reader, Writer};
//!
//! # fn main() -> wirepack::Result<()> {
//! let mut writer = Writer::new();
//! writer.write_u8(1).write_str("ab")?.write_uvarint(300)?.write_f32(1.5);
//! let bytes = writer.into_bytes();
//!
//! let mut reader = Reader::new(&bytes);
//! assert_eq!(reader.read_u8()?, 1);
//! assert_eq!(reader.read_string()?, "ab");
//! assert_eq!(reader.read_uvarint()?, 300);
//! assert_eq!(reader.read_f32()?, 1.5);
//! assert_eq!(reader.remaining(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! The [`WireEncoding`] trait and the [`schema`] module build typed
//! and dynamic records on top of these primitives.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use bitvec;
pub use bytes;

pub mod bits;

mod encoding;
pub use encoding::{to_bytes, WireEncoding};

mod error;
pub use error::{Error, Result};

mod reader;
pub use reader::Reader;

pub mod schema;

pub mod utf8;

pub mod varint;

mod writer;
pub use writer::{Writer, INITIAL_CAPACITY};
