use std::fmt;

/// One of the possible NBT data types.
///
/// The discriminant of each variant is its id in the binary format.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum TagType {
    // Variant order is significant!
    End,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
    LongArray,
}

impl TagType {
    /// Every tag type, indexed by id.
    pub const ALL: [TagType; 13] = [
        TagType::End,
        TagType::Byte,
        TagType::Short,
        TagType::Int,
        TagType::Long,
        TagType::Float,
        TagType::Double,
        TagType::ByteArray,
        TagType::String,
        TagType::List,
        TagType::Compound,
        TagType::IntArray,
        TagType::LongArray,
    ];

    /// The id of this type on the wire.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a tag type from its wire id.
    pub const fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < Self::ALL.len() {
            Some(Self::ALL[id as usize])
        } else {
            None
        }
    }

    /// Returns the name of this type for error reporting purposes.
    pub const fn name(self) -> &'static str {
        match self {
            TagType::End => "end",
            TagType::Byte => "byte",
            TagType::Short => "short",
            TagType::Int => "int",
            TagType::Long => "long",
            TagType::Float => "float",
            TagType::Double => "double",
            TagType::ByteArray => "byte array",
            TagType::String => "string",
            TagType::List => "list",
            TagType::Compound => "compound",
            TagType::IntArray => "int array",
            TagType::LongArray => "long array",
        }
    }

    /// The suffix appended to numeric literals of this type in Mojangson.
    ///
    /// Returns `None` for non-numeric types. Ints have an empty suffix.
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            TagType::Byte => Some("b"),
            TagType::Short => Some("s"),
            TagType::Int => Some(""),
            TagType::Long => Some("L"),
            TagType::Float => Some("f"),
            TagType::Double => Some("d"),
            _ => None,
        }
    }

    pub const fn is_numeric(self) -> bool {
        self.suffix().is_some()
    }

    /// The element type of the array types, `None` for everything else.
    pub const fn array_element(self) -> Option<TagType> {
        match self {
            TagType::ByteArray => Some(TagType::Byte),
            TagType::IntArray => Some(TagType::Int),
            TagType::LongArray => Some(TagType::Long),
            _ => None,
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
