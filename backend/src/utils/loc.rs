//! Offset to line/character conversion for diagnostics.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// A 1-based line and character position inside a text buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, character {}", self.line, self.character)
    }
}

#[derive(Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum OffsetError {
    #[error("offset ({offset}) larger than input length ({length})")]
    #[diagnostic(
        code(webutil::loc::out_of_range),
        help("offsets are zero-based and may point at most one past the end of the input")
    )]
    OutOfRange { offset: usize, length: usize },
}

/// Locate the character at `offset` (counted in characters, not bytes).
///
/// A line feed counts toward the line it opens, so an offset pointing at
/// one reports the first character of the next line.
///
/// `offset == length` is allowed and addresses the position just past the
/// last character, which is where parsers report unexpected end of input.
pub fn locate(buffer: &str, offset: usize) -> Result<Position, OffsetError> {
    let length = buffer.chars().count();
    if offset > length {
        return Err(OffsetError::OutOfRange { offset, length });
    }
    Ok(scan(buffer, offset))
}

/// Character position of `byte_offset`, clamped to the end of `buffer`.
pub fn position_at_byte(buffer: &str, byte_offset: usize) -> Position {
    let byte_offset = byte_offset.min(buffer.len());
    let index = if byte_offset == buffer.len() {
        buffer.chars().count()
    } else {
        buffer
            .char_indices()
            .take_while(|&(start, _)| start <= byte_offset)
            .count()
            - 1
    };
    scan(buffer, index)
}

// `offset` must be at most the character count of `buffer`.
fn scan(buffer: &str, offset: usize) -> Position {
    let mut line = 1;
    let mut character = 0;
    for (index, ch) in buffer.chars().enumerate() {
        if ch == '\n' {
            line += 1;
            character = 0;
            if index == offset {
                return Position { line, character: 1 };
            }
            continue;
        }
        character += 1;
        if index == offset {
            return Position { line, character };
        }
    }

    Position {
        line,
        character: character + 1,
    }
}

/// Same as [`locate`], but `byte_offset` is a UTF-8 byte index.
///
/// An offset that falls inside a multi-byte character resolves to that
/// character.
pub fn locate_byte(buffer: &str, byte_offset: usize) -> Result<Position, OffsetError> {
    if byte_offset > buffer.len() {
        return Err(OffsetError::OutOfRange {
            offset: byte_offset,
            length: buffer.len(),
        });
    }

    Ok(position_at_byte(buffer, byte_offset))
}

/// Convert a 1-based (line, column) pair, with the column counted in bytes,
/// back into a byte offset. Positions past the end clamp to `src.len()`.
pub fn byte_offset_from_linecol(src: &str, line: usize, col: usize) -> usize {
    let mut offset = 0usize;
    for (i, l) in src.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            offset += col.saturating_sub(1);
            return offset.min(src.len());
        }
        offset += l.len();
    }
    src.len()
}

/// Convert 1-based (line, column, width) into an absolute `SourceSpan`.
pub fn span_from_linecol(
    src: &str,
    line: usize,
    col: usize,
    width: usize,
) -> miette::SourceSpan {
    let offset = byte_offset_from_linecol(src, line, col);
    miette::SourceSpan::from((offset, width.min(src.len() - offset)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, character: usize) -> Position {
        Position { line, character }
    }

    #[test]
    fn second_line() {
        assert_eq!(locate("abc\ndef", 5), Ok(pos(2, 2)));
    }

    #[test]
    fn first_character() {
        assert_eq!(locate("hello", 0), Ok(pos(1, 1)));
    }

    #[test]
    fn line_feed_at_offset_opens_the_next_line() {
        assert_eq!(locate("abc\ndef", 3), Ok(pos(2, 1)));
        assert_eq!(locate("abc\ndef", 4), Ok(pos(2, 1)));
        assert_eq!(locate("a\n\nb", 2), Ok(pos(3, 1)));
        assert_eq!(locate("\n", 0), Ok(pos(2, 1)));
    }

    #[test]
    fn end_of_input() {
        assert_eq!(locate("abc", 3), Ok(pos(1, 4)));
        assert_eq!(locate("abc\n", 4), Ok(pos(2, 1)));
        assert_eq!(locate("", 0), Ok(pos(1, 1)));
    }

    #[test]
    fn past_the_end_is_an_error() {
        for buf in ["a", "hello", "abc\ndef", "\n\n"] {
            let length = buf.chars().count();
            let err = locate(buf, length + 1).unwrap_err();
            assert_eq!(
                err,
                OffsetError::OutOfRange {
                    offset: length + 1,
                    length
                }
            );
        }
        assert_eq!(
            locate("hello", 9).unwrap_err().to_string(),
            "offset (9) larger than input length (5)"
        );
    }

    #[test]
    fn every_valid_offset_is_one_based() {
        for buf in ["", "x", "ab\n\ncd\n", "\n", "héllo\nwörld", "\r\n\r\n"] {
            for offset in 0..=buf.chars().count() {
                let p = locate(buf, offset).unwrap();
                assert!(p.line >= 1 && p.character >= 1, "{buf:?} @ {offset}");
            }
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 'é' and 'ö' are two bytes each
        let src = "héllo\nwörld";
        assert_eq!(locate(src, 2), Ok(pos(1, 3)));
        assert_eq!(locate(src, 8), Ok(pos(2, 3)));
    }

    #[test]
    fn byte_offsets_resolve_to_characters() {
        let src = "héllo\nwörld";
        // 'l' after 'é' starts at byte 3
        assert_eq!(locate_byte(src, 3), Ok(pos(1, 3)));
        // byte 2 is the second half of 'é'
        assert_eq!(locate_byte(src, 2), Ok(pos(1, 2)));
        // 'r' in the second line
        let r = src.find('r').unwrap();
        assert_eq!(locate_byte(src, r), Ok(pos(2, 3)));
        assert_eq!(locate_byte(src, src.len()), Ok(pos(2, 6)));
        assert!(locate_byte(src, src.len() + 1).is_err());
    }

    #[test]
    fn byte_position_clamps_to_the_end() {
        let src = "ab\ncd";
        assert_eq!(position_at_byte(src, 4), pos(2, 2));
        assert_eq!(position_at_byte(src, src.len()), pos(2, 3));
        assert_eq!(position_at_byte(src, 1_000), pos(2, 3));
    }

    #[test]
    fn linecol_round_trip_to_bytes() {
        let src = "{\n  \"a\": 1,\n  oops\n}";
        let offset = byte_offset_from_linecol(src, 3, 3);
        assert_eq!(&src[offset..offset + 4], "oops");
        assert_eq!(byte_offset_from_linecol(src, 99, 1), src.len());
    }

    #[test]
    fn span_is_clamped_to_source() {
        let span = span_from_linecol("ab", 1, 2, 10);
        assert_eq!(span.offset(), 1);
        assert_eq!(span.len(), 1);
    }

    #[test]
    fn position_display() {
        assert_eq!(pos(3, 7).to_string(), "line 3, character 7");
    }
}
