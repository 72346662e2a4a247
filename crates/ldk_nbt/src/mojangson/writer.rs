use std::fmt::{self, Display, Write};

use owo_colors::{AnsiColors, OwoColorize};

use crate::{Compound, List, Tag, TagType};

/// The pieces of output that get their own color.
#[derive(Clone, Copy)]
enum Part {
    Key,
    Text,
    Number,
    Marker,
}

impl Part {
    fn color(self) -> AnsiColors {
        match self {
            Part::Key => AnsiColors::Cyan,
            Part::Text => AnsiColors::Green,
            Part::Number => AnsiColors::Yellow,
            Part::Marker => AnsiColors::Red,
        }
    }
}

/// Writes tags as Mojangson into any [`fmt::Write`].
///
/// Keys and strings are always double quoted, so the output parses back into
/// an equal tag.
pub struct MojangsonWriter<W> {
    out: W,
    colored: bool,
}

impl<W: Write> MojangsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            colored: false,
        }
    }

    /// A writer that wraps keys, strings, numbers and type markers in ANSI
    /// color codes. The text between the codes is the same as with
    /// [`MojangsonWriter::new`].
    pub fn colored(out: W) -> Self {
        Self { out, colored: true }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn part(&mut self, part: Part, text: impl Display) -> fmt::Result {
        if self.colored {
            write!(self.out, "{}", text.color(part.color()))
        } else {
            write!(self.out, "{text}")
        }
    }

    fn quoted(&mut self, part: Part, s: &str) -> fmt::Result {
        let mut quoted = String::with_capacity(s.len() + 2);
        quoted.push('"');
        for c in s.chars() {
            if matches!(c, '"' | '\\') {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');

        self.part(part, quoted)
    }

    fn number(&mut self, value: impl Display, ty: TagType) -> fmt::Result {
        self.part(Part::Number, value)?;
        match ty.suffix() {
            Some(suffix) if !suffix.is_empty() => self.part(Part::Marker, suffix),
            _ => Ok(()),
        }
    }

    fn array<T: Display + Copy>(&mut self, ty: TagType, values: &[T]) -> fmt::Result {
        let (marker, element) = match ty {
            TagType::ByteArray => ("B", TagType::Byte),
            TagType::IntArray => ("I", TagType::Int),
            _ => ("L", TagType::Long),
        };

        self.out.write_char('[')?;
        self.part(Part::Marker, marker)?;
        self.out.write_char(';')?;
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.number(*v, element)?;
        }
        self.out.write_char(']')
    }

    fn list(&mut self, list: &List) -> fmt::Result {
        self.out.write_char('[')?;
        for (i, tag) in list.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.write_tag(tag)?;
        }
        self.out.write_char(']')
    }

    fn compound(&mut self, compound: &Compound) -> fmt::Result {
        self.out.write_char('{')?;
        // End has no textual form, so such entries are left out entirely.
        let entries = compound.iter().filter(|(_, tag)| !tag.is_end());
        for (i, (key, tag)) in entries.enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.quoted(Part::Key, key)?;
            self.out.write_char(':')?;
            self.write_tag(tag)?;
        }
        self.out.write_char('}')
    }

    /// Writes one tag. [`Tag::End`] has no textual form and writes nothing.
    pub fn write_tag(&mut self, tag: &Tag) -> fmt::Result {
        match tag {
            Tag::End => Ok(()),
            Tag::Byte(v) => self.number(v, TagType::Byte),
            Tag::Short(v) => self.number(v, TagType::Short),
            Tag::Int(v) => self.number(v, TagType::Int),
            Tag::Long(v) => self.number(v, TagType::Long),
            Tag::Float(v) => self.number(v, TagType::Float),
            Tag::Double(v) => self.number(v, TagType::Double),
            Tag::ByteArray(v) => self.array(TagType::ByteArray, v),
            Tag::String(v) => self.quoted(Part::Text, v),
            Tag::List(v) => self.list(v),
            Tag::Compound(v) => self.compound(v),
            Tag::IntArray(v) => self.array(TagType::IntArray, v),
            Tag::LongArray(v) => self.array(TagType::LongArray, v),
        }
    }
}

/// Formats the tag as Mojangson.
impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        MojangsonWriter::new(f).write_tag(self)
    }
}
