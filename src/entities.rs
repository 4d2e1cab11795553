/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::borrow::Cow;

use memchr::memchr;

use crate::SaxError;

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const APOS: &str = "&apos;";
    pub const QUOT: &str = "&quot;";
}

/// How far after the '&' the terminating ';' is searched.
const MAX_ENTITY_LEN: usize = 10;

fn predefined_entity(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"quot" => Some('"'),
        b"gt" => Some('>'),
        b"lt" => Some('<'),
        b"apos" => Some('\''),
        _ => None,
    }
}

fn is_valid_xml_char(c: u32) -> bool {
    matches!(c, 0x09 | 0x0a | 0x0d | 0x20..=0xd7ff | 0xe000..=0xfffd | 0x10000..=0x10ffff)
}

fn char_reference(body: &[u8]) -> Option<char> {
    let value = match body {
        [b'x', hex @ ..] if !hex.is_empty() && hex.iter().all(u8::is_ascii_hexdigit) => {
            u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?
        }
        [b'0'..=b'9', ..] => std::str::from_utf8(body).ok()?.parse::<u32>().ok()?,
        _ => return None,
    };
    if !is_valid_xml_char(value) {
        return None;
    }
    char::from_u32(value)
}

/// Destination of [decode_into()].
///
/// Plain text and decoded references arrive separately, so a sink can keep
/// the document bytes apart from the characters produced by references.
pub(crate) trait DecodeSink {
    fn push_text(&mut self, text: &[u8]);

    fn push_char(&mut self, c: char);
}

impl DecodeSink for Vec<u8> {
    fn push_text(&mut self, text: &[u8]) {
        self.extend_from_slice(text);
    }

    fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
}

/// Replaces entity references in a run of raw text and appends the result.
///
/// Only the five predefined entities are known, plus numeric character
/// references when `char_references` is set. An unknown or unterminated
/// reference is reported via `report`, its '&' is dropped and the rest of
/// the run is copied as plain text.
pub(crate) fn decode_into(
    raw: &[u8],
    out: &mut impl DecodeSink,
    char_references: bool,
    report: &mut impl FnMut(SaxError),
) {
    let mut pos = 0;
    while let Some(offset) = memchr(b'&', &raw[pos..]) {
        out.push_text(&raw[pos..pos + offset]);
        let amp = pos + offset;
        let window_end = std::cmp::min(raw.len(), amp + 1 + MAX_ENTITY_LEN);
        let window = &raw[amp + 1..window_end];
        let terminated = memchr(b';', window);
        let name = match terminated {
            Some(end) => &window[..end],
            None => window,
        };

        if let Some(end) = terminated {
            if let Some(c) = predefined_entity(name) {
                out.push_char(c);
                pos = amp + end + 2;
                continue;
            }
            if char_references && name.first() == Some(&b'#') {
                if let Some(c) = char_reference(&name[1..]) {
                    out.push_char(c);
                    pos = amp + end + 2;
                    continue;
                }
                report(SaxError::InvalidCharReference(
                    String::from_utf8_lossy(name).into_owned(),
                ));
                pos = amp + 1;
                continue;
            }
        }

        report(SaxError::InvalidEntity(
            String::from_utf8_lossy(name).into_owned(),
        ));
        pos = amp + 1;
    }
    out.push_text(&raw[pos..]);
}

pub fn escaped_size(s: &str) -> usize {
    let mut size = 0;
    for c in s.chars() {
        match c {
            '<' => size += predefined::LT.len(),
            '>' => size += predefined::GT.len(),
            '&' => size += predefined::AMP.len(),
            '\'' => size += predefined::APOS.len(),
            '"' => size += predefined::QUOT.len(),
            _ => size += c.len_utf8(),
        }
    }

    size
}

/// Replaces the five markup characters with their predefined entities.
///
/// Returns the input untouched when there is nothing to escape.
pub fn escape(s: &str) -> Cow<'_, str> {
    let size = escaped_size(s);
    if size == s.len() {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(size);
    for c in s.chars() {
        match c {
            '<' => escaped.push_str(predefined::LT),
            '>' => escaped.push_str(predefined::GT),
            '&' => escaped.push_str(predefined::AMP),
            '\'' => escaped.push_str(predefined::APOS),
            '"' => escaped.push_str(predefined::QUOT),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Decodes entity references in a string.
///
/// Convenience wrapper for callers outside of the parser, problems are
/// collected into the returned vector instead of a handler.
pub fn unescape(s: &str) -> (String, Vec<SaxError>) {
    let mut out = Vec::with_capacity(s.len());
    let mut errors = Vec::new();
    decode_into(s.as_bytes(), &mut out, true, &mut |err| errors.push(err));
    (String::from_utf8_lossy(&out).into_owned(), errors)
}
