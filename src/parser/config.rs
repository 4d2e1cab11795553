/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// Settings of a [SaxParser](super::SaxParser) instance.
///
/// ```
/// use xmlsax::{ParserConfig, SaxParser};
///
/// let parser = SaxParser::with_config(ParserConfig::new().debug(true));
/// assert!(parser.config().debug);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParserConfig {
    /// Trace scanner transitions and emitted events through the `log`
    /// crate, and call the [DebugHooks](super::DebugHooks) around each parse.
    pub debug: bool,

    /// Replace `&#NNN;` and `&#xHH;` references with their characters.
    ///
    /// When disabled, numeric references are reported as invalid entities
    /// like any other unknown name.
    pub decode_char_references: bool,
}

impl ParserConfig {
    pub fn new() -> Self {
        ParserConfig {
            debug: false,
            decode_char_references: true,
        }
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn decode_char_references(mut self, decode: bool) -> Self {
        self.decode_char_references = decode;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig::new()
    }
}
