//! Support for reading and writing tags in Java edition's binary format.
//!
//! Every tag on the wire is `[u8 id][u16 name length][name][payload]`, except
//! the end tag which is a lone `0` byte. Numbers are big-endian and names use
//! Java's modified UTF-8.
//!
//! # Examples
//!
//! ```
//! use ldk_nbt::{compound, to_binary, List, Tag};
//!
//! let c = compound! {
//!     "byte" => 5_i8,
//!     "string" => "hello",
//!     "list_of_float" => List::from_tags([
//!         std::f32::consts::PI,
//!         std::f32::consts::E,
//!         1.4142
//!     ]).unwrap(),
//! };
//!
//! let mut buf = vec![];
//!
//! to_binary(&Tag::Compound(c), &mut buf, "").unwrap();
//! ```
//!
//! Decode NBT data from its binary form.
//!
//! ```
//! use ldk_nbt::{compound, from_binary, Tag};
//!
//! let some_bytes = [10, 0, 0, 3, 0, 3, 105, 110, 116, 0, 0, 222, 173, 0];
//!
//! let expected = compound! {
//!     "int" => 0xdead
//! };
//!
//! let root = from_binary(&mut some_bytes.as_slice()).unwrap();
//!
//! assert_eq!(root.tag, Tag::Compound(expected));
//! assert_eq!(root.name, "");
//! ```

use std::io;

use thiserror::Error;

use crate::TagType;

mod decode;
mod encode;
mod io_ext;

pub use decode::from_binary;
pub use encode::{to_binary, written_size};
pub use io_ext::Compression;

/// Errors that can occur while encoding or decoding binary NBT.
///
/// Any of these aborts the whole operation; no partial tree is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("an I/O error occurred: {0}")]
    Io(#[from] io::Error),
    #[error("invalid tag id of {0}")]
    UnknownTagId(u8),
    #[error("{ty} has a negative length of {len}")]
    NegativeLength { ty: TagType, len: i32 },
    #[error("string is not valid modified UTF-8")]
    InvalidString,
    #[error("reached the maximum nesting depth")]
    DepthLimitExceeded,
    #[error("unexpected end tag inside a {0}")]
    UnexpectedEnd(TagType),
    #[error("list of {expected} holds a {found}")]
    MixedList { expected: TagType, found: TagType },
    #[error("{what} of length {len} exceeds the maximum of {max}")]
    LengthOverflow {
        what: &'static str,
        len: usize,
        max: usize,
    },
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
