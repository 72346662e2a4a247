//! Mojangson, the textual form of NBT also known as SNBT.
//!
//! ```
//! use ldk_nbt::{compound, from_mojangson, to_mojangson, List, Tag};
//!
//! let tag = from_mojangson(r#"{id:"minecraft:diamond_sword",Count:1b,Damage:[I;0,5]}"#).unwrap();
//!
//! assert_eq!(
//!     tag,
//!     Tag::Compound(compound! {
//!         "id" => "minecraft:diamond_sword",
//!         "Count" => 1_i8,
//!         "Damage" => vec![0, 5],
//!     })
//! );
//!
//! assert_eq!(
//!     to_mojangson(&tag),
//!     r#"{"id":"minecraft:diamond_sword","Count":1b,"Damage":[I;0,5]}"#
//! );
//! ```

use thiserror::Error;

use crate::{Tag, TagType};

mod reader;
mod writer;

pub use reader::MojangsonReader;
pub use writer::MojangsonWriter;

/// What went wrong while parsing Mojangson.
#[derive(Clone, Copy, PartialEq, Eq, Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("reached end of input")]
    UnexpectedEnd,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("empty key in compound")]
    EmptyKey,
    #[error("expected ':'")]
    ExpectedColon,
    #[error("expected value")]
    ExpectedValue,
    #[error("expected ',' or '{0}'")]
    ExpectedSeparator(char),
    #[error("cannot put a {found} into a list of {expected}")]
    MixedList { expected: TagType, found: TagType },
    #[error("cannot put a {found} into a {array}")]
    WrongArrayElement { array: TagType, found: TagType },
    #[error("unexpected data after the value")]
    TrailingData,
    #[error("reached the maximum nesting depth")]
    DepthLimitExceeded,
}

/// A Mojangson syntax or typing error, along with where it happened.
#[derive(Clone, Copy, PartialEq, Eq, Error, Debug)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// One-based line of the failure.
    pub line: usize,
    /// One-based column of the failure, counted in characters.
    pub column: usize,
    /// Byte offset of the failure in the input.
    pub cursor: usize,
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Parses a complete Mojangson string. Trailing data other than whitespace is
/// an error.
pub fn from_mojangson(text: &str) -> Result<Tag> {
    MojangsonReader::new(text).read()
}

/// Formats a tag as Mojangson. This is the same as `tag.to_string()`.
pub fn to_mojangson(tag: &Tag) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = MojangsonWriter::new(&mut out).write_tag(tag);
    out
}

/// Formats a tag as Mojangson with ANSI colors for terminals.
pub fn to_mojangson_colored(tag: &Tag) -> String {
    let mut out = String::new();
    let _ = MojangsonWriter::colored(&mut out).write_tag(tag);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{compound, Compound, List};

    fn kind(text: &str) -> ParseErrorKind {
        from_mojangson(text).unwrap_err().kind
    }

    #[test]
    fn parse_compound() {
        let text = r#"
            {
                foo: 1,
                'bar': 1.0,
                "baz": 1.0f,
                "hello'": "hello world",
                "world": "hello\"world",
                1.5f: 1.5d,
                3b: 2f,
                bool: false,
                more: {
                    iarr: [I; 1, 2, 3],
                    larr: [L; 1L, 2L, 3l],
                },
                empty: [Bibabo ],
            }
        "#;
        let tag = from_mojangson(text).unwrap();
        let c = tag.as_compound().unwrap();

        assert_eq!(c.get_int("foo").unwrap(), 1);
        assert_eq!(c.get_double("bar").unwrap(), 1.0);
        assert_eq!(c.get_float("baz").unwrap(), 1.0);
        assert_eq!(c.get_string("hello'").unwrap(), "hello world");
        assert_eq!(c.get_string("world").unwrap(), "hello\"world");
        assert_eq!(c.get_double("1.5f").unwrap(), 1.5);
        assert_eq!(c.get_float("3b").unwrap(), 2.0);
        assert_eq!(c.get_byte("bool").unwrap(), 0);

        let more = c.get_compound("more").unwrap();
        assert_eq!(more.get_int_array("iarr").unwrap(), vec![1, 2, 3]);
        assert_eq!(more.get_long_array("larr").unwrap(), vec![1, 2, 3]);

        let empty = c.get_list("empty").unwrap();
        assert_eq!(empty.element_type(), TagType::String);
        assert_eq!(empty[0], Tag::from("Bibabo"));

        assert_eq!(
            c.keys().map(String::as_str).collect::<Vec<_>>(),
            ["foo", "bar", "baz", "hello'", "world", "1.5f", "3b", "bool", "more", "empty"]
        );
    }

    #[test]
    fn numeric_classification() {
        assert_eq!(from_mojangson("5b").unwrap(), Tag::Byte(5));
        assert_eq!(from_mojangson("5B").unwrap(), Tag::Byte(5));
        assert_eq!(from_mojangson("-5s").unwrap(), Tag::Short(-5));
        assert_eq!(from_mojangson("5").unwrap(), Tag::Int(5));
        assert_eq!(from_mojangson("+5").unwrap(), Tag::Int(5));
        assert_eq!(from_mojangson("5L").unwrap(), Tag::Long(5));
        assert_eq!(from_mojangson("5l").unwrap(), Tag::Long(5));
        assert_eq!(from_mojangson("1f").unwrap(), Tag::Float(1.0));
        assert_eq!(from_mojangson(".5f").unwrap(), Tag::Float(0.5));
        assert_eq!(from_mojangson("1e3F").unwrap(), Tag::Float(1000.0));
        assert_eq!(from_mojangson("5.0d").unwrap(), Tag::Double(5.0));
        assert_eq!(from_mojangson("5.0").unwrap(), Tag::Double(5.0));
        assert_eq!(from_mojangson("5d").unwrap(), Tag::Double(5.0));
        assert_eq!(from_mojangson("5.").unwrap(), Tag::Double(5.0));
        assert_eq!(from_mojangson("true").unwrap(), Tag::Byte(1));
        assert_eq!(from_mojangson("false").unwrap(), Tag::Byte(0));
    }

    #[test]
    fn non_numbers_become_strings() {
        for text in ["300b", "007", "1.2.3", "abc", "5x", "-", "e5", "trueish"] {
            assert_eq!(
                from_mojangson(text).unwrap(),
                Tag::from(text),
                "{text} should be a string"
            );
        }
    }

    #[test]
    fn typed_arrays() {
        assert_eq!(
            from_mojangson("[B;1b,2b,3b]").unwrap(),
            Tag::ByteArray(vec![1, 2, 3])
        );
        assert_eq!(from_mojangson("[I;]").unwrap(), Tag::IntArray(vec![]));
        assert_eq!(
            from_mojangson("[L; -1L , 2L]").unwrap(),
            Tag::LongArray(vec![-1, 2])
        );
        assert_eq!(
            kind("[B;1b,2s]"),
            ParseErrorKind::WrongArrayElement {
                array: TagType::ByteArray,
                found: TagType::Short
            }
        );
        assert_eq!(
            kind("[L; 1]"),
            ParseErrorKind::WrongArrayElement {
                array: TagType::LongArray,
                found: TagType::Int
            }
        );
    }

    #[test]
    fn array_prefix_needs_semicolon() {
        // `B` alone is an unquoted string, not the start of a byte array.
        assert_eq!(
            from_mojangson("[B, I]").unwrap(),
            Tag::List(List::from_tags(["B", "I"]).unwrap())
        );
    }

    #[test]
    fn lists() {
        assert_eq!(from_mojangson("[]").unwrap(), Tag::List(List::new()));
        assert_eq!(
            from_mojangson("[[1], [a, b], []]").unwrap(),
            Tag::List(
                List::from_tags([
                    List::from_tags([1]).unwrap(),
                    List::from_tags(["a", "b"]).unwrap(),
                    List::new(),
                ])
                .unwrap()
            )
        );
        assert_eq!(
            kind("[1,true]"),
            ParseErrorKind::MixedList {
                expected: TagType::Int,
                found: TagType::Byte
            }
        );
        assert_eq!(
            kind("[{}, []]"),
            ParseErrorKind::MixedList {
                expected: TagType::Compound,
                found: TagType::List
            }
        );
    }

    #[test]
    fn malformed_input() {
        assert_eq!(kind("{a:1"), ParseErrorKind::UnexpectedEnd);
        assert_eq!(kind("[L; 1L, 2L, 3L"), ParseErrorKind::UnexpectedEnd);
        assert_eq!(kind("\"open"), ParseErrorKind::UnexpectedEnd);
        assert_eq!(kind(""), ParseErrorKind::UnexpectedEnd);
        assert_eq!(kind("\"\\n\""), ParseErrorKind::InvalidEscape('n'));
        assert_eq!(kind("[L; 1L, 2L, 3L,]dewdwe"), ParseErrorKind::TrailingData);
        assert_eq!(kind("{ foo: }"), ParseErrorKind::ExpectedValue);
        assert_eq!(kind("{ {}, }"), ParseErrorKind::EmptyKey);
        assert_eq!(kind("{ \"\": 1 }"), ParseErrorKind::EmptyKey);
        assert_eq!(kind("{ foo 1 }"), ParseErrorKind::ExpectedColon);
        assert_eq!(kind("{ foo: 1 bar: 2 }"), ParseErrorKind::ExpectedSeparator('}'));
        assert_eq!(kind("[1 2]"), ParseErrorKind::ExpectedSeparator(']'));
    }

    #[test]
    fn error_position() {
        let err = from_mojangson("{\n  a: 1,\n  b: [1, 2s]\n}").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.column, 10);
        assert_eq!(&"{\n  a: 1,\n  b: [1, 2s]\n}"[err.cursor..], "2s]\n}");
        assert_eq!(
            err.to_string(),
            "cannot put a short into a list of int at line 3, column 10"
        );
    }

    #[test]
    fn depth_limit() {
        let deep = "[".repeat(crate::MAX_DEPTH + 1) + &"]".repeat(crate::MAX_DEPTH + 1);
        assert_eq!(kind(&deep), ParseErrorKind::DepthLimitExceeded);

        let ok = "[".repeat(crate::MAX_DEPTH) + &"]".repeat(crate::MAX_DEPTH);
        assert!(from_mojangson(&ok).is_ok());
    }

    #[test]
    fn depth_limit_covers_typed_arrays() {
        let deep = "[B;".repeat(crate::MAX_DEPTH + 1);
        assert_eq!(kind(&deep), ParseErrorKind::DepthLimitExceeded);

        // Far past the limit must still fail cleanly instead of overflowing
        // the stack.
        let deeper = "[I;".repeat(100_000);
        assert_eq!(kind(&deeper), ParseErrorKind::DepthLimitExceeded);

        let mixed = "[[L;".repeat(crate::MAX_DEPTH);
        assert_eq!(kind(&mixed), ParseErrorKind::DepthLimitExceeded);
    }

    #[test]
    fn reader_reports_bytes_read() {
        let mut reader = MojangsonReader::new("{a:1b} trailing words");
        let tag = reader.read_value().unwrap();
        assert_eq!(tag, Tag::Compound(compound! { "a" => 1_i8 }));
        assert_eq!(reader.bytes_read(), 6);
    }

    #[test]
    fn write_scalars() {
        assert_eq!(to_mojangson(&Tag::Byte(1)), "1b");
        assert_eq!(to_mojangson(&Tag::Short(-2)), "-2s");
        assert_eq!(to_mojangson(&Tag::Int(3)), "3");
        assert_eq!(to_mojangson(&Tag::Long(4)), "4L");
        assert_eq!(to_mojangson(&Tag::Float(0.5)), "0.5f");
        assert_eq!(to_mojangson(&Tag::Double(2.0)), "2d");
        assert_eq!(to_mojangson(&Tag::from("say \"hi\" \\o/")), r#""say \"hi\" \\o/""#);
        assert_eq!(to_mojangson(&Tag::ByteArray(vec![1, -1])), "[B;1b,-1b]");
        assert_eq!(to_mojangson(&Tag::IntArray(vec![])), "[I;]");
        assert_eq!(to_mojangson(&Tag::LongArray(vec![7])), "[L;7L]");
    }

    #[test]
    fn write_containers() {
        let tag = Tag::Compound(compound! {
            "name" => "Steve",
            "pos" => List::from_tags([1.5_f64, 64.0, -3.25]).unwrap(),
            "inv" => List::from_tags([compound! { "Slot" => 0_i8 }]).unwrap(),
            "empty" => Compound::new(),
        });

        assert_eq!(
            tag.to_string(),
            r#"{"name":"Steve","pos":[1.5d,64d,-3.25d],"inv":[{"Slot":0b}],"empty":{}}"#
        );
    }

    #[test]
    fn end_entries_are_skipped() {
        let tag = Tag::Compound(compound! {
            "a" => Tag::End,
            "b" => 1,
            "c" => Tag::End,
        });

        let text = to_mojangson(&tag);
        assert_eq!(text, r#"{"b":1}"#);
        assert_eq!(
            from_mojangson(&text).unwrap(),
            Tag::Compound(compound! { "b" => 1 })
        );
        assert_eq!(to_mojangson(&Tag::Compound(compound! { "a" => Tag::End })), "{}");
    }

    #[test]
    fn round_trip() {
        let tag = Tag::Compound(compound! {
            "byte" => i8::MIN,
            "short" => i16::MAX,
            "int" => -1,
            "long" => i64::MIN,
            "float" => 3.25_f32,
            "tiny" => 1e-7_f32,
            "double" => -0.1_f64,
            "huge" => 1e300_f64,
            "string" => "with 'both' \"quotes\" and \\",
            "unicode" => "aé日🤡",
            "bytes" => vec![1_i8, 2],
            "ints" => vec![i32::MIN, i32::MAX],
            "longs" => vec![0_i64],
            "nested" => compound! {
                "list" => List::from_tags([List::from_tags(["x"]).unwrap()]).unwrap(),
                "true" => true,
            },
        });

        assert_eq!(from_mojangson(&to_mojangson(&tag)).unwrap(), tag);
    }

    #[test]
    fn colored_output_has_same_text() {
        let tag = Tag::Compound(compound! {
            "a" => List::from_tags([1_i8, 2]).unwrap(),
            "b" => vec![3_i64],
            "c" => "text",
        });
        let colored = to_mojangson_colored(&tag);

        assert!(colored.contains("\u{1b}["));
        assert_eq!(strip_ansi(&colored), to_mojangson(&tag));
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}
