use std::sync::LazyLock;

use regex::Regex;

use super::{ParseError, ParseErrorKind, Result};
use crate::{Compound, List, Tag, TagType, MAX_DEPTH};

/// Number patterns, tried in order. The flag says whether the token ends in
/// a one letter type suffix that must be cut off before parsing.
static NUMBER_PATTERNS: LazyLock<[(TagType, bool, Regex); 7]> = LazyLock::new(|| {
    let re = |pattern: &str| {
        Regex::new(&format!("(?i)^{pattern}$")).expect("number patterns are valid regexes")
    };

    [
        (
            TagType::Float,
            true,
            re(r"[-+]?(?:[0-9]+\.?|[0-9]*\.[0-9]+)(?:e[-+]?[0-9]+)?f"),
        ),
        (TagType::Byte, true, re(r"[-+]?(?:0|[1-9][0-9]*)b")),
        (TagType::Long, true, re(r"[-+]?(?:0|[1-9][0-9]*)l")),
        (TagType::Short, true, re(r"[-+]?(?:0|[1-9][0-9]*)s")),
        (TagType::Int, false, re(r"[-+]?(?:0|[1-9][0-9]*)")),
        (
            TagType::Double,
            true,
            re(r"[-+]?(?:[0-9]+\.?|[0-9]*\.[0-9]+)(?:e[-+]?[0-9]+)?d"),
        ),
        (
            TagType::Double,
            false,
            re(r"[-+]?(?:[0-9]+\.|[0-9]*\.[0-9]+)(?:e[-+]?[0-9]+)?"),
        ),
    ]
});

fn is_unquoted_char(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' | '+' | '.')
}

/// Classifies an unquoted token as a number, a boolean or a plain string.
///
/// A token that looks like a number but does not fit its type is kept as a
/// string.
fn classify(token: &str) -> Tag {
    let Some((ty, suffixed, _)) = NUMBER_PATTERNS
        .iter()
        .find(|(_, _, pattern)| pattern.is_match(token))
    else {
        return if token.eq_ignore_ascii_case("true") {
            Tag::Byte(1)
        } else if token.eq_ignore_ascii_case("false") {
            Tag::Byte(0)
        } else {
            Tag::String(token.to_owned())
        };
    };

    // The suffix is always a single ASCII letter.
    let number = if *suffixed {
        &token[..token.len() - 1]
    } else {
        token
    };

    let parsed = match ty {
        TagType::Byte => number.parse().ok().map(Tag::Byte),
        TagType::Short => number.parse().ok().map(Tag::Short),
        TagType::Int => number.parse().ok().map(Tag::Int),
        TagType::Long => number.parse().ok().map(Tag::Long),
        TagType::Float => number.parse().ok().map(Tag::Float),
        TagType::Double => number.parse().ok().map(Tag::Double),
        _ => None,
    };

    parsed.unwrap_or_else(|| Tag::String(token.to_owned()))
}

/// A recursive descent parser over a Mojangson string.
///
/// Use [`MojangsonReader::read`] to parse a whole string, or
/// [`MojangsonReader::read_value`] followed by
/// [`MojangsonReader::bytes_read`] to parse a value at the start of a longer
/// input such as a command argument.
pub struct MojangsonReader<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    depth: usize,
}

impl<'a> MojangsonReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    /// The number of bytes consumed so far.
    pub fn bytes_read(&self) -> usize {
        self.pos
    }

    /// Parses the whole input as one value. Anything but whitespace after it
    /// is an error.
    pub fn read(&mut self) -> Result<Tag> {
        let tag = self.read_value()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(self.error(ParseErrorKind::TrailingData));
        }
        Ok(tag)
    }

    /// Parses the next value, leaving the cursor just past it.
    pub fn read_value(&mut self) -> Result<Tag> {
        self.skip_whitespace();
        match self.peek()? {
            '{' => self.nested(|r| r.read_struct().map(Tag::Compound)),
            '[' if self.at_array_prefix() => self.nested(|r| r.read_array()),
            '[' => self.nested(|r| r.read_list().map(Tag::List)),
            _ => self.read_typed_value(),
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.pos)
    }

    fn error_at(&self, kind: ParseErrorKind, cursor: usize) -> ParseError {
        let consumed = &self.input[..cursor];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
        let column = consumed[line_start..].chars().count() + 1;

        ParseError {
            kind,
            line,
            column,
            cursor,
        }
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(ParseErrorKind::DepthLimitExceeded));
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Result<char> {
        self.rest()
            .chars()
            .next()
            .ok_or_else(|| self.error(ParseErrorKind::UnexpectedEnd))
    }

    fn advance(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// After a `,`, skips to the next element. Otherwise requires `close`.
    /// Returns whether the container is finished, consuming `close` if so.
    fn separator(&mut self, close: char) -> Result<bool> {
        self.skip_whitespace();
        match self.peek()? {
            ',' => {
                self.advance(',');
                self.skip_whitespace();
                if self.peek()? == close {
                    self.advance(close);
                    return Ok(true);
                }
                Ok(false)
            }
            c if c == close => {
                self.advance(close);
                Ok(true)
            }
            _ => Err(self.error(ParseErrorKind::ExpectedSeparator(close))),
        }
    }

    /// Consumes `open` and any whitespace, then reports whether `close`
    /// follows immediately (and consumes it if so).
    fn open(&mut self, open: char, close: char) -> Result<bool> {
        self.advance(open);
        self.skip_whitespace();
        if self.peek()? == close {
            self.advance(close);
            return Ok(true);
        }
        Ok(false)
    }

    fn read_struct(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();

        if self.open('{', '}')? {
            return Ok(compound);
        }

        loop {
            let key = self.read_key()?;

            self.skip_whitespace();
            if self.peek()? != ':' {
                return Err(self.error(ParseErrorKind::ExpectedColon));
            }
            self.advance(':');

            let value = self.read_value()?;
            compound.insert(key, value);

            if self.separator('}')? {
                return Ok(compound);
            }
        }
    }

    fn read_key(&mut self) -> Result<String> {
        self.skip_whitespace();
        let start = self.pos;
        let key = match self.peek()? {
            '"' | '\'' => self.read_quoted()?,
            _ => self.read_unquoted().to_owned(),
        };

        if key.is_empty() {
            return Err(self.error_at(ParseErrorKind::EmptyKey, start));
        }

        Ok(key)
    }

    fn read_list(&mut self) -> Result<List> {
        let mut elements = vec![];
        let mut element_type = TagType::End;

        if self.open('[', ']')? {
            return Ok(List::new());
        }

        loop {
            self.skip_whitespace();
            let start = self.pos;
            let value = self.read_value()?;

            if element_type == TagType::End {
                element_type = value.tag_type();
            } else if value.tag_type() != element_type {
                return Err(self.error_at(
                    ParseErrorKind::MixedList {
                        expected: element_type,
                        found: value.tag_type(),
                    },
                    start,
                ));
            }
            elements.push(value);

            if self.separator(']')? {
                return Ok(List::from_raw(element_type, elements));
            }
        }
    }

    /// Whether the cursor is at `[B;`, `[I;` or `[L;`.
    fn at_array_prefix(&self) -> bool {
        matches!(self.rest().as_bytes(), [b'[', b'B' | b'I' | b'L', b';', ..])
    }

    fn read_array(&mut self) -> Result<Tag> {
        let (array, element) = match self.rest().as_bytes()[1] {
            b'B' => (TagType::ByteArray, TagType::Byte),
            b'I' => (TagType::IntArray, TagType::Int),
            _ => (TagType::LongArray, TagType::Long),
        };
        // Skip over `[X`, leaving the `;` for `open` to consume.
        self.pos += 2;

        let mut values = vec![];

        if !self.open(';', ']')? {
            loop {
                self.skip_whitespace();
                let start = self.pos;
                let value = self.read_value()?;

                if value.tag_type() != element {
                    return Err(self.error_at(
                        ParseErrorKind::WrongArrayElement {
                            array,
                            found: value.tag_type(),
                        },
                        start,
                    ));
                }
                values.push(value);

                if self.separator(']')? {
                    break;
                }
            }
        }

        Ok(match array {
            TagType::ByteArray => Tag::ByteArray(values.iter().filter_map(Tag::to_byte).collect()),
            TagType::IntArray => Tag::IntArray(values.iter().filter_map(Tag::to_int).collect()),
            _ => Tag::LongArray(values.iter().filter_map(Tag::to_long).collect()),
        })
    }

    fn read_typed_value(&mut self) -> Result<Tag> {
        self.skip_whitespace();
        if matches!(self.peek()?, '"' | '\'') {
            return self.read_quoted().map(Tag::String);
        }

        let start = self.pos;
        let token = self.read_unquoted();
        if token.is_empty() {
            return Err(self.error_at(ParseErrorKind::ExpectedValue, start));
        }

        Ok(classify(token))
    }

    fn read_unquoted(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !is_unquoted_char(c))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn read_quoted(&mut self) -> Result<String> {
        let quote = self.peek()?;
        self.advance(quote);

        let mut result = String::new();
        loop {
            let c = self.peek()?;
            self.advance(c);

            match c {
                '\\' => {
                    let escaped = self.peek()?;
                    if escaped != quote && escaped != '\\' {
                        return Err(self.error(ParseErrorKind::InvalidEscape(escaped)));
                    }
                    self.advance(escaped);
                    result.push(escaped);
                }
                c if c == quote => return Ok(result),
                c => result.push(c),
            }
        }
    }
}
