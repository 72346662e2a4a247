use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::{Error, Result};
use crate::{Compound, List, Tag, TagType};

/// Encodes a named tag as uncompressed binary NBT.
///
/// Most files and packets carry a compound with the empty string `""` as its
/// name, but any tag type is accepted at the root. [`Tag::End`] is written as
/// a single zero byte and the name is dropped.
pub fn to_binary<W: Write>(tag: &Tag, writer: W, name: &str) -> Result<()> {
    let mut state = EncodeState { writer };

    state.write_tag_type(tag.tag_type())?;

    if tag.is_end() {
        return Ok(());
    }

    state.write_string(name)?;
    state.write_payload(tag)
}

/// Returns the number of bytes that will be written when [`to_binary`] is
/// called with this tag and name.
///
/// If `to_binary` results in `Ok`, the exact number of bytes reported by this
/// function will have been written. If the result is `Err`, then the reported
/// count will be greater than or equal to the number of bytes that have
/// actually been written.
pub fn written_size(tag: &Tag, name: &str) -> usize {
    fn payload_size(tag: &Tag) -> usize {
        match tag {
            Tag::End => 0,
            Tag::Byte(_) => 1,
            Tag::Short(_) => 2,
            Tag::Int(_) => 4,
            Tag::Long(_) => 8,
            Tag::Float(_) => 4,
            Tag::Double(_) => 8,
            Tag::ByteArray(v) => 4 + v.len(),
            Tag::String(v) => string_size(v),
            Tag::List(v) => 1 + 4 + v.iter().map(payload_size).sum::<usize>(),
            Tag::Compound(v) => {
                v.iter()
                    .map(|(k, v)| 1 + string_size(k) + payload_size(v))
                    .sum::<usize>()
                    + 1
            }
            Tag::IntArray(v) => 4 + v.len() * 4,
            Tag::LongArray(v) => 4 + v.len() * 8,
        }
    }

    fn string_size(s: &str) -> usize {
        2 + encoded_len(s)
    }

    if tag.is_end() {
        1
    } else {
        1 + string_size(name) + payload_size(tag)
    }
}

/// Length of `text` once encoded as modified UTF-8: NUL takes two bytes and
/// characters outside the BMP become a pair of three byte surrogates.
pub(super) fn encoded_len(text: &str) -> usize {
    text.chars()
        .map(|c| match u32::from(c) {
            0 => 2,
            1..=0x7f => 1,
            0x80..=0x7ff => 2,
            0x800..=0xffff => 3,
            _ => 6,
        })
        .sum()
}

struct EncodeState<W> {
    writer: W,
}

impl<W: Write> EncodeState<W> {
    fn write_tag_type(&mut self, ty: TagType) -> Result<()> {
        Ok(self.writer.write_u8(ty.id())?)
    }

    fn write_payload(&mut self, tag: &Tag) -> Result<()> {
        match tag {
            Tag::End => Err(Error::UnexpectedEnd(TagType::Compound)),
            Tag::Byte(v) => Ok(self.writer.write_i8(*v)?),
            Tag::Short(v) => Ok(self.writer.write_i16::<BigEndian>(*v)?),
            Tag::Int(v) => Ok(self.writer.write_i32::<BigEndian>(*v)?),
            Tag::Long(v) => Ok(self.writer.write_i64::<BigEndian>(*v)?),
            Tag::Float(v) => Ok(self.writer.write_f32::<BigEndian>(*v)?),
            Tag::Double(v) => Ok(self.writer.write_f64::<BigEndian>(*v)?),
            Tag::ByteArray(v) => self.write_byte_array(v),
            Tag::String(v) => self.write_string(v),
            Tag::List(v) => self.write_list(v),
            Tag::Compound(v) => self.write_compound(v),
            Tag::IntArray(v) => self.write_int_array(v),
            Tag::LongArray(v) => self.write_long_array(v),
        }
    }

    fn write_len(&mut self, what: &'static str, len: usize) -> Result<()> {
        match i32::try_from(len) {
            Ok(len) => Ok(self.writer.write_i32::<BigEndian>(len)?),
            Err(_) => Err(Error::LengthOverflow {
                what,
                len,
                max: i32::MAX as usize,
            }),
        }
    }

    fn write_byte_array(&mut self, bytes: &[i8]) -> Result<()> {
        self.write_len("byte array", bytes.len())?;

        let bytes: Vec<u8> = bytes.iter().map(|&b| b as u8).collect();
        Ok(self.writer.write_all(&bytes)?)
    }

    fn write_int_array(&mut self, ints: &[i32]) -> Result<()> {
        self.write_len("int array", ints.len())?;

        for i in ints {
            self.writer.write_i32::<BigEndian>(*i)?;
        }

        Ok(())
    }

    fn write_long_array(&mut self, longs: &[i64]) -> Result<()> {
        self.write_len("long array", longs.len())?;

        for l in longs {
            self.writer.write_i64::<BigEndian>(*l)?;
        }

        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        let encoded = cesu8::to_java_cesu8(s);

        match u16::try_from(encoded.len()) {
            Ok(n) => self.writer.write_u16::<BigEndian>(n)?,
            Err(_) => {
                return Err(Error::LengthOverflow {
                    what: "string",
                    len: encoded.len(),
                    max: u16::MAX as usize,
                })
            }
        }

        Ok(self.writer.write_all(&encoded)?)
    }

    fn write_list(&mut self, list: &List) -> Result<()> {
        self.write_tag_type(list.element_type())?;
        self.write_len("list", list.len())?;

        for elem in list {
            if elem.is_end() {
                return Err(Error::UnexpectedEnd(TagType::List));
            }
            if elem.tag_type() != list.element_type() {
                return Err(Error::MixedList {
                    expected: list.element_type(),
                    found: elem.tag_type(),
                });
            }
            self.write_payload(elem)?;
        }

        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        for (name, tag) in compound {
            if tag.is_end() {
                return Err(Error::UnexpectedEnd(TagType::Compound));
            }
            self.write_tag_type(tag.tag_type())?;
            self.write_string(name)?;
            self.write_payload(tag)?;
        }

        self.write_tag_type(TagType::End)
    }
}
