/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

use memchr::memchr_iter;
use memchr::memrchr;

/// A position in the parsed document.
///
/// This struct is returned from the
/// [location()](crate::SaxParser::location) method and gives you
/// the position of the scanner cursor after the last parse.
///
/// Lines are counted from one, so an empty document is on line 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    /// Byte position in the input buffer.
    pub bytes: usize,
    /// Current line. Lines are separated by the newline character.
    pub line: usize,
    /// How many bytes after the last newline character.
    pub column: usize,
}

impl Location {
    /// Creates a new location at the beginning of a document.
    pub fn new() -> Self {
        Location {
            bytes: 0,
            line: 1,
            column: 0,
        }
    }

    /// Moves the position over the given consumed bytes.
    ///
    /// Every newline in the slice bumps the line exactly once.
    pub(super) fn advance(&mut self, consumed: &[u8]) {
        self.bytes += consumed.len();
        match memrchr(b'\n', consumed) {
            Some(last) => {
                self.line += memchr_iter(b'\n', &consumed[..=last]).count();
                self.column = consumed.len() - last - 1;
            }
            None => self.column += consumed.len(),
        }
    }

    /// Skips bytes which are not part of the text, like the byte order mark.
    pub(super) fn skip(&mut self, nr_bytes: usize) {
        self.bytes += nr_bytes;
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "byte: {}, line: {}, column: {}",
            self.bytes, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_lines() {
        let mut location = Location::new();
        location.advance(b"<a>");
        assert_eq!(location.line, 1);
        assert_eq!(location.column, 3);
        location.advance(b"\n\n  x");
        assert_eq!(location.line, 3);
        assert_eq!(location.column, 3);
        assert_eq!(location.bytes, 8);
        location.advance(b"\n");
        assert_eq!(location.line, 4);
        assert_eq!(location.column, 0);
        location.advance(b"ab\r\ncd\r\n\r\nxyz");
        assert_eq!(location.line, 7);
        assert_eq!(location.column, 3);
    }

    #[test]
    fn skip_keeps_line() {
        let mut location = Location::new();
        location.skip(3);
        assert_eq!(location.bytes, 3);
        assert_eq!(location.line, 1);
        assert_eq!(location.column, 0);
        assert_eq!(location.to_string(), "byte: 3, line: 1, column: 0");
    }
}
