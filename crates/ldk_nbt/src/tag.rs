use std::borrow::Cow;

use crate::{Compound, List, TagType};

/// A single node of an NBT tree.
///
/// Containers own their children, so cloning a tag is a deep copy.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum Tag {
    /// Marks the end of a compound in the binary format. Carries no value and
    /// is never stored inside a container.
    #[default]
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// A tag together with the name it carries in a binary stream.
///
/// Only root tags need this. Children of a compound are named by their key
/// and list elements are nameless.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct NamedTag {
    pub name: String,
    pub tag: Tag,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, tag: impl Into<Tag>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// A nameless root, which is what most files and packets carry.
    pub fn unnamed(tag: impl Into<Tag>) -> Self {
        Self::new(String::new(), tag)
    }
}

impl Tag {
    /// Returns the type of this tag.
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::End => TagType::End,
            Tag::Byte(_) => TagType::Byte,
            Tag::Short(_) => TagType::Short,
            Tag::Int(_) => TagType::Int,
            Tag::Long(_) => TagType::Long,
            Tag::Float(_) => TagType::Float,
            Tag::Double(_) => TagType::Double,
            Tag::ByteArray(_) => TagType::ByteArray,
            Tag::String(_) => TagType::String,
            Tag::List(_) => TagType::List,
            Tag::Compound(_) => TagType::Compound,
            Tag::IntArray(_) => TagType::IntArray,
            Tag::LongArray(_) => TagType::LongArray,
        }
    }

    /// Builds an empty or zero valued tag of the given type.
    pub fn default_for(ty: TagType) -> Self {
        match ty {
            TagType::End => Tag::End,
            TagType::Byte => Tag::Byte(0),
            TagType::Short => Tag::Short(0),
            TagType::Int => Tag::Int(0),
            TagType::Long => Tag::Long(0),
            TagType::Float => Tag::Float(0.0),
            TagType::Double => Tag::Double(0.0),
            TagType::ByteArray => Tag::ByteArray(Vec::new()),
            TagType::String => Tag::String(String::new()),
            TagType::List => Tag::List(List::new()),
            TagType::Compound => Tag::Compound(Compound::new()),
            TagType::IntArray => Tag::IntArray(Vec::new()),
            TagType::LongArray => Tag::LongArray(Vec::new()),
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Tag::End)
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Tag::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Tag::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            Tag::LongArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<List> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn into_compound(self) -> Option<Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }
}

/// Lossy numeric views. Every numeric tag converts to every numeric type with
/// `as` semantics; anything else yields `None`.
macro_rules! numeric_views {
    ($($name:ident -> $ty:ty),* $(,)?) => {
        impl Tag {
            $(
                pub fn $name(&self) -> Option<$ty> {
                    match *self {
                        Tag::Byte(v) => Some(v as $ty),
                        Tag::Short(v) => Some(v as $ty),
                        Tag::Int(v) => Some(v as $ty),
                        Tag::Long(v) => Some(v as $ty),
                        Tag::Float(v) => Some(v as $ty),
                        Tag::Double(v) => Some(v as $ty),
                        _ => None,
                    }
                }
            )*
        }
    };
}

numeric_views! {
    to_byte -> i8,
    to_short -> i16,
    to_int -> i32,
    to_long -> i64,
    to_float -> f32,
    to_double -> f64,
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Tag {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    String => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

/// Bools are represented as `0` or `1` bytes.
impl From<bool> for Tag {
    fn from(b: bool) -> Self {
        Tag::Byte(i8::from(b))
    }
}

impl From<&str> for Tag {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<&String> for Tag {
    fn from(v: &String) -> Self {
        Self::String(v.clone())
    }
}

impl<'a> From<Cow<'a, str>> for Tag {
    fn from(v: Cow<'a, str>) -> Self {
        Self::String(v.into_owned())
    }
}

impl From<&[i8]> for Tag {
    fn from(v: &[i8]) -> Self {
        Self::ByteArray(v.to_vec())
    }
}

impl From<&[i32]> for Tag {
    fn from(v: &[i32]) -> Self {
        Self::IntArray(v.to_vec())
    }
}

impl From<&[i64]> for Tag {
    fn from(v: &[i64]) -> Self {
        Self::LongArray(v.to_vec())
    }
}
