/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use memchr::memchr;
use memchr::memchr2;
use memchr::memchr3;
use memchr::memmem;

use super::states::Mode;

/// One lexeme recognized at the cursor.
///
/// `start..end` is the byte range of the whole lexeme in the input buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) start: usize,
    pub(super) end: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum TokenKind {
    Whitespace,
    /// A run of text, its meaning depends on the mode.
    Text,
    Newline,
    Doctype,
    PrologStart,
    PrologEnd,
    /// `encoding="..."` inside a prolog, carries the value range.
    Encoding {
        start: usize,
        end: usize,
    },
    CommentStart,
    CommentEnd,
    CDataStart,
    CDataEnd,
    TagOpen,
    /// `>` and an optional line terminator.
    TagClose,
    Slash,
    Equals,
    Name,
    Quote(u8),
    /// A single character the current mode has no rule for.
    Other,
}

const DOCTYPE: &[u8] = b"<!DOCTYPE";
const CDATA_START: &[u8] = b"<![CDATA[";
const CDATA_END: &[u8] = b"]]>";
const COMMENT_START: &[u8] = b"<!--";
const COMMENT_END: &[u8] = b"-->";
const PROLOG_START: &[u8] = b"<?";
const PROLOG_END: &[u8] = b"?>";
const ENCODING: &[u8] = b"encoding";

macro_rules! whitespace {
    () => {
        b' ' | b'\t' | b'\r' | b'\n'
    };
}

fn is_name_start(c: u8) -> bool {
    matches!(c, b':' | b'A'..=b'Z' | b'a'..=b'z' | b'_' | 0x80..=0xff)
}

fn is_name_char(c: u8) -> bool {
    is_name_start(c) || matches!(c, b'0'..=b'9' | b'.' | b'-')
}

/// Length of the UTF-8 sequence starting with the given byte.
///
/// Stray continuation and invalid bytes are treated as single characters.
fn utf8_len(c: u8) -> usize {
    match c {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

fn span_while(bytes: &[u8], pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[pos..]
        .iter()
        .position(|&c| !pred(c))
        .map_or(bytes.len(), |n| pos + n)
}

/// Recognizes the lexeme at `pos` for the given mode.
///
/// This function never mutates anything; the caller decides whether the
/// token is consumed. The input must have at least one byte left at `pos`.
pub(super) fn scan(bytes: &[u8], pos: usize, mode: Mode) -> Token {
    let rest = &bytes[pos..];
    let (kind, len) = match mode {
        Mode::Initial => scan_initial(rest),
        Mode::Content => scan_content(rest),
        Mode::Element => scan_tag(rest, false),
        Mode::Attributes => scan_tag(rest, true),
        Mode::AttributeValue => match rest[0] {
            whitespace!() => (TokenKind::Whitespace, span_whitespace(rest)),
            q @ (b'"' | b'\'') => (TokenKind::Quote(q), 1),
            c => (TokenKind::Other, other_len(rest, c)),
        },
        Mode::AttrValueStr { .. } => match rest[0] {
            b'\n' => (TokenKind::Newline, 1),
            b'\r' if rest[1..].starts_with(b"\n") => (TokenKind::Newline, 2),
            q @ (b'"' | b'\'') => (TokenKind::Quote(q), 1),
            _ => (TokenKind::Text, value_text_len(rest)),
        },
        Mode::CDataSection => scan_until(rest, CDATA_END, TokenKind::CDataEnd),
        Mode::Comment => scan_until(rest, COMMENT_END, TokenKind::CommentEnd),
        Mode::Prolog => scan_prolog(rest),
    };
    let (kind, len) = match kind {
        TokenKind::Encoding { start, end } => (
            TokenKind::Encoding {
                start: pos + start,
                end: pos + end,
            },
            len,
        ),
        _ => (kind, len),
    };
    Token {
        kind,
        start: pos,
        end: pos + len,
    }
}

fn span_whitespace(rest: &[u8]) -> usize {
    span_while(rest, 0, |c| matches!(c, whitespace!()))
}

fn other_len(rest: &[u8], c: u8) -> usize {
    std::cmp::min(utf8_len(c), rest.len())
}

/// Text inside an attribute value runs up to a quote or a line terminator.
fn value_text_len(rest: &[u8]) -> usize {
    let len = memchr3(b'"', b'\'', b'\n', rest).unwrap_or(rest.len());
    if rest[..len].ends_with(b"\r") && rest[len..].starts_with(b"\n") {
        len - 1
    } else {
        len
    }
}

fn scan_initial(rest: &[u8]) -> (TokenKind, usize) {
    match rest[0] {
        whitespace!() => (TokenKind::Whitespace, span_whitespace(rest)),
        b'<' => {
            if rest.starts_with(DOCTYPE) {
                (TokenKind::Doctype, doctype_len(rest))
            } else if rest.starts_with(COMMENT_START) {
                (TokenKind::CommentStart, COMMENT_START.len())
            } else if rest.starts_with(PROLOG_START) {
                (TokenKind::PrologStart, PROLOG_START.len())
            } else {
                (TokenKind::TagOpen, 1)
            }
        }
        c => (TokenKind::Other, other_len(rest, c)),
    }
}

fn scan_content(rest: &[u8]) -> (TokenKind, usize) {
    if rest[0] != b'<' {
        return (TokenKind::Text, memchr(b'<', rest).unwrap_or(rest.len()));
    }
    if rest.starts_with(CDATA_START) {
        (TokenKind::CDataStart, CDATA_START.len())
    } else if rest.starts_with(COMMENT_START) {
        (TokenKind::CommentStart, COMMENT_START.len())
    } else if rest.starts_with(PROLOG_START) {
        (TokenKind::PrologStart, PROLOG_START.len())
    } else {
        (TokenKind::TagOpen, 1)
    }
}

fn scan_tag(rest: &[u8], in_attributes: bool) -> (TokenKind, usize) {
    match rest[0] {
        whitespace!() => (TokenKind::Whitespace, span_whitespace(rest)),
        b'/' => (TokenKind::Slash, 1),
        b'=' if in_attributes => (TokenKind::Equals, 1),
        b'>' => {
            let len = if rest[1..].starts_with(b"\r\n") {
                3
            } else if rest[1..].starts_with(b"\n") {
                2
            } else {
                1
            };
            (TokenKind::TagClose, len)
        }
        c if is_name_start(c) => (TokenKind::Name, span_while(rest, 1, is_name_char)),
        c => (TokenKind::Other, other_len(rest, c)),
    }
}

fn scan_until(rest: &[u8], end_marker: &[u8], end_kind: TokenKind) -> (TokenKind, usize) {
    if rest.starts_with(end_marker) {
        return (end_kind, end_marker.len());
    }
    (
        TokenKind::Text,
        memmem::find(rest, end_marker).unwrap_or(rest.len()),
    )
}

fn scan_prolog(rest: &[u8]) -> (TokenKind, usize) {
    if rest.starts_with(PROLOG_END) {
        return (TokenKind::PrologEnd, PROLOG_END.len());
    }
    if rest.starts_with(ENCODING) {
        if let Some(token) = encoding_declaration(rest) {
            return token;
        }
    }
    // Skip to the next byte which may start something interesting
    let len = memchr2(b'?', b'e', &rest[1..]).map_or(rest.len(), |n| n + 1);
    (TokenKind::Text, len)
}

/// Matches `encoding` S? `=` S? quote value quote.
fn encoding_declaration(rest: &[u8]) -> Option<(TokenKind, usize)> {
    let is_space = |c: u8| matches!(c, whitespace!());
    let mut pos = span_while(rest, ENCODING.len(), is_space);
    if rest.get(pos) != Some(&b'=') {
        return None;
    }
    pos = span_while(rest, pos + 1, is_space);
    let quote = *rest.get(pos)?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let start = pos + 1;
    let end = start + memchr(quote, &rest[start..])?;
    Some((TokenKind::Encoding { start, end }, end + 1))
}

/// Length of a document type declaration, including an internal subset.
fn doctype_len(rest: &[u8]) -> usize {
    let mut depth = 0usize;
    for (i, &c) in rest.iter().enumerate().skip(DOCTYPE.len()) {
        match c {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b'>' if depth == 0 => return i + 1,
            _ => (),
        }
    }
    rest.len()
}
