/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::entities::DecodeSink;

/// Character data or an attribute value being collected.
///
/// Bytes copied from the document stay in `raw`, in the document encoding.
/// Decoded references are already characters, so they are kept apart with
/// their offset into `raw` and are never passed through a transcoder.
#[derive(Debug, Default)]
pub(super) struct TextBuffer {
    raw: Vec<u8>,
    references: Vec<(usize, char)>,
}

impl TextBuffer {
    pub(super) fn new() -> Self {
        TextBuffer::default()
    }

    pub(super) fn clear(&mut self) {
        self.raw.clear();
        self.references.clear();
    }

    pub(super) fn is_empty(&self) -> bool {
        self.raw.is_empty() && self.references.is_empty()
    }

    pub(super) fn push_byte(&mut self, c: u8) {
        self.raw.push(c);
    }

    /// Removes leading and trailing ASCII whitespace of the document text.
    ///
    /// Whitespace next to a reference at either end is left alone.
    pub(super) fn trim(&mut self) {
        let head_end = self.references.first().map_or(self.raw.len(), |r| r.0);
        let lead = self.raw[..head_end]
            .iter()
            .take_while(|c| c.is_ascii_whitespace())
            .count();
        let tail_start = self.references.last().map_or(lead, |r| r.0);
        let trail = self.raw[tail_start..]
            .iter()
            .rev()
            .take_while(|c| c.is_ascii_whitespace())
            .count();
        self.raw.truncate(self.raw.len() - trail);
        self.raw.drain(..lead);
        for reference in self.references.iter_mut() {
            reference.0 -= lead;
        }
    }

    /// Runs of document bytes, each followed by the reference decoded
    /// after it. The last run has no reference.
    pub(super) fn pieces(&self) -> impl Iterator<Item = (&[u8], Option<char>)> {
        let mut last = 0;
        self.references
            .iter()
            .map(|&(offset, c)| (offset, Some(c)))
            .chain(std::iter::once((self.raw.len(), None)))
            .map(move |(offset, c)| {
                let run = &self.raw[last..offset];
                last = offset;
                (run, c)
            })
    }
}

impl DecodeSink for TextBuffer {
    fn push_text(&mut self, text: &[u8]) {
        self.raw.extend_from_slice(text);
    }

    fn push_char(&mut self, c: char) {
        self.references.push((self.raw.len(), c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(buffer: &TextBuffer) -> Vec<(&[u8], Option<char>)> {
        buffer.pieces().collect()
    }

    #[test]
    fn references_split_runs() {
        let mut buffer = TextBuffer::new();
        buffer.push_text(b"caf");
        buffer.push_char('é');
        buffer.push_char('€');
        buffer.push_text(b"!");
        assert_eq!(
            runs(&buffer),
            vec![
                (&b"caf"[..], Some('é')),
                (&b""[..], Some('€')),
                (&b"!"[..], None),
            ]
        );
    }

    #[test]
    fn trim_document_whitespace() {
        let mut buffer = TextBuffer::new();
        buffer.push_text(b"\n  a ");
        buffer.push_char('&');
        buffer.push_text(b" b \t");
        buffer.trim();
        assert_eq!(
            runs(&buffer),
            vec![(&b"a "[..], Some('&')), (&b" b"[..], None)]
        );

        buffer.clear();
        buffer.push_text(b" \n ");
        buffer.trim();
        assert!(buffer.is_empty());
    }
}
