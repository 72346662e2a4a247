use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use super::{Error, Result};
use crate::{Compound, List, NamedTag, Tag, TagType, MAX_DEPTH};

/// Decodes one named tag from uncompressed binary NBT.
///
/// An end tag at the root decodes to [`Tag::End`] with an empty name and
/// nothing past the id byte is consumed.
pub fn from_binary<R: Read>(reader: R) -> Result<NamedTag> {
    let mut state = DecodeState { reader, depth: 0 };

    let ty = state.read_tag_type()?;

    if ty == TagType::End {
        return Ok(NamedTag::default());
    }

    let name = state.read_string()?;
    let tag = state.read_payload(ty)?;

    Ok(NamedTag { name, tag })
}

struct DecodeState<R> {
    reader: R,
    /// Current recursion depth.
    depth: usize,
}

impl<R: Read> DecodeState<R> {
    fn check_depth<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::DepthLimitExceeded);
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    fn read_tag_type(&mut self) -> Result<TagType> {
        let id = self.reader.read_u8()?;
        TagType::from_id(id).ok_or(Error::UnknownTagId(id))
    }

    fn read_payload(&mut self, ty: TagType) -> Result<Tag> {
        Ok(match ty {
            TagType::End => return Err(Error::UnexpectedEnd(TagType::Compound)),
            TagType::Byte => Tag::Byte(self.reader.read_i8()?),
            TagType::Short => Tag::Short(self.reader.read_i16::<BigEndian>()?),
            TagType::Int => Tag::Int(self.reader.read_i32::<BigEndian>()?),
            TagType::Long => Tag::Long(self.reader.read_i64::<BigEndian>()?),
            TagType::Float => Tag::Float(self.reader.read_f32::<BigEndian>()?),
            TagType::Double => Tag::Double(self.reader.read_f64::<BigEndian>()?),
            TagType::ByteArray => Tag::ByteArray(self.read_byte_array()?),
            TagType::String => Tag::String(self.read_string()?),
            TagType::List => Tag::List(self.check_depth(|st| st.read_list())?),
            TagType::Compound => Tag::Compound(self.check_depth(|st| st.read_compound())?),
            TagType::IntArray => Tag::IntArray(self.read_int_array()?),
            TagType::LongArray => Tag::LongArray(self.read_long_array()?),
        })
    }

    fn read_len(&mut self, ty: TagType) -> Result<usize> {
        let len = self.reader.read_i32::<BigEndian>()?;
        usize::try_from(len).map_err(|_| Error::NegativeLength { ty, len })
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let len = self.read_len(TagType::ByteArray)?;

        // Read through `take` so a bogus length can't trigger a huge
        // allocation up front.
        let mut buf = vec![];
        (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;

        if buf.len() != len {
            return Err(Error::Io(std::io::ErrorKind::UnexpectedEof.into()));
        }

        Ok(buf.into_iter().map(|b| b as i8).collect())
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let len = self.read_len(TagType::IntArray)?;
        let mut array = Vec::with_capacity(len.min(4096));

        for _ in 0..len {
            array.push(self.reader.read_i32::<BigEndian>()?);
        }

        Ok(array)
    }

    fn read_long_array(&mut self) -> Result<Vec<i64>> {
        let len = self.read_len(TagType::LongArray)?;
        let mut array = Vec::with_capacity(len.min(4096));

        for _ in 0..len {
            array.push(self.reader.read_i64::<BigEndian>()?);
        }

        Ok(array)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = usize::from(self.reader.read_u16::<BigEndian>()?);

        let mut buf = vec![0; len];
        self.reader.read_exact(&mut buf)?;

        match cesu8::from_java_cesu8(&buf) {
            Ok(s) => Ok(s.into_owned()),
            Err(_) => Err(Error::InvalidString),
        }
    }

    fn read_list(&mut self) -> Result<List> {
        let elem_type = self.read_tag_type()?;
        let len = self.read_len(TagType::List)?;

        if elem_type == TagType::End {
            if len != 0 {
                return Err(Error::UnexpectedEnd(TagType::List));
            }
            return Ok(List::new());
        }

        let mut elements = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            elements.push(self.read_payload(elem_type)?);
        }

        Ok(List::from_raw(elem_type, elements))
    }

    fn read_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();

        loop {
            let ty = self.read_tag_type()?;
            if ty == TagType::End {
                return Ok(compound);
            }

            let name = self.read_string()?;
            let tag = self.read_payload(ty)?;

            compound.insert(name, tag);
        }
    }
}
