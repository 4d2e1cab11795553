/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod attributes;
mod config;
mod error;
mod events;
mod location;
mod scanner;
mod states;
mod text;

use log::debug;
use log::trace;

pub use attributes::Attributes;
pub use config::ParserConfig;
pub use error::ErrorKind;
pub use error::SaxError;
pub use events::EventRecorder;
pub use events::SaxEvent;
pub use location::Location;

use scanner::Token;
use scanner::TokenKind;
use states::Action;
use states::Mode;
use states::Next;
use text::TextBuffer;

use crate::entities;
use crate::entities::DecodeSink;
use crate::transcode::EncodingTranscoder;
use crate::transcode::TranscodeError;
use crate::transcode::Transcoder;

/// Receiver of the parse events.
///
/// Every method has an empty default implementation, so a handler only
/// needs to implement the events it is interested in. Events are delivered
/// synchronously and in document order.
pub trait SaxHandler {
    fn start_document(&mut self) {}

    fn end_document(&mut self) {}

    /// A start tag or an empty element tag.
    ///
    /// Attribute values have their references replaced and are converted
    /// to UTF-8 if the document declared another encoding.
    fn start_element(&mut self, _name: &str, _attributes: &Attributes) {}

    /// An end tag, or the end of an empty element tag.
    fn end_element(&mut self, _name: &str) {}

    /// Character data between two tags.
    ///
    /// Leading and trailing whitespace is trimmed, and whitespace-only
    /// blocks are not delivered at all. CDATA sections are merged into the
    /// surrounding character data without reference replacement.
    fn characters(&mut self, _text: &str) {}

    /// A problem found in the document.
    ///
    /// Parsing always continues after an error.
    fn error(&mut self, _file_name: &str, _line: usize, _error: &SaxError) {}
}

/// Tracing setup and teardown around a parse.
///
/// These are only called when [ParserConfig::debug] is enabled.
pub trait DebugHooks {
    fn debug_start(&mut self) {}

    fn debug_end(&mut self) {}
}

/// Debug hooks which do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDebugHooks;

impl DebugHooks for NoDebugHooks {}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Scratch state of one parse, reset at the start of every parse call.
struct ParserState {
    file_name: String,
    location: Location,
    mode: Mode,
    element_name: String,
    is_end_tag: bool,
    is_self_closing: bool,
    attributes: Attributes,
    attr_name: String,
    attr_value: TextBuffer,
    character_data: TextBuffer,
    open_elements: Vec<String>,
    declared_encoding: Option<String>,
    comment_return: Mode,
    cdata_return: Mode,
    prolog_return: Mode,
}

impl ParserState {
    fn new() -> Self {
        ParserState {
            file_name: String::new(),
            location: Location::new(),
            mode: Mode::Initial,
            element_name: String::new(),
            is_end_tag: false,
            is_self_closing: false,
            attributes: Attributes::new(),
            attr_name: String::new(),
            attr_value: TextBuffer::new(),
            character_data: TextBuffer::new(),
            open_elements: Vec::new(),
            declared_encoding: None,
            comment_return: Mode::Initial,
            cdata_return: Mode::Content,
            prolog_return: Mode::Initial,
        }
    }

    fn reset(&mut self, file_name: &str) {
        self.file_name.clear();
        self.file_name.push_str(file_name);
        self.location = Location::new();
        self.mode = Mode::Initial;
        self.element_name.clear();
        self.is_end_tag = false;
        self.is_self_closing = false;
        self.attributes.clear();
        self.attr_name.clear();
        self.attr_value.clear();
        self.character_data.clear();
        self.open_elements.clear();
        self.declared_encoding = None;
        self.comment_return = Mode::Initial;
        self.cdata_return = Mode::Content;
        self.prolog_return = Mode::Initial;
    }

    fn report(&self, handler: &mut impl SaxHandler, error: SaxError) {
        handler.error(&self.file_name, self.location.line, &error);
    }

    fn enter(&mut self, mode: Mode) {
        match mode {
            Mode::Comment => self.comment_return = self.mode,
            Mode::CDataSection => self.cdata_return = self.mode,
            Mode::Prolog => self.prolog_return = self.mode,
            _ => (),
        }
        self.mode = mode;
    }

    fn resume(&mut self) {
        self.mode = match self.mode {
            Mode::Comment => self.comment_return,
            Mode::CDataSection => self.cdata_return,
            Mode::Prolog => self.prolog_return,
            mode => mode,
        };
    }

    /// Converts collected text into deliverable UTF-8.
    ///
    /// Only the runs copied from the document go through the transcoder,
    /// decoded references are UTF-8 already. A failed transcoding is
    /// reported, and the whole value is passed on untranscoded.
    fn to_text(
        &self,
        buffer: &TextBuffer,
        handler: &mut impl SaxHandler,
        transcoder: &mut impl Transcoder,
    ) -> String {
        let raw = match &self.declared_encoding {
            None => join_pieces(buffer),
            Some(encoding) => match transcode_pieces(buffer, encoding, transcoder) {
                Ok(text) => text,
                Err(source) => {
                    let raw = join_pieces(buffer);
                    self.report(
                        handler,
                        SaxError::Transcode {
                            text: String::from_utf8_lossy(&raw).into_owned(),
                            encoding: encoding.clone(),
                            source,
                        },
                    );
                    raw
                }
            },
        };
        match String::from_utf8(raw) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    fn flush_characters(
        &mut self,
        config: &ParserConfig,
        handler: &mut impl SaxHandler,
        transcoder: &mut impl Transcoder,
    ) {
        self.character_data.trim();
        if !self.character_data.is_empty() {
            let text = self.to_text(&self.character_data, handler, transcoder);
            // References may decode to whitespace too
            let text = text.trim_matches(|c: char| c.is_ascii_whitespace());
            if !text.is_empty() {
                if config.debug {
                    debug!("characters({:?})", text);
                }
                handler.characters(text);
            }
        }
        self.character_data.clear();
    }

    fn begin_tag(&mut self) {
        self.element_name.clear();
        self.is_end_tag = false;
        self.is_self_closing = false;
        self.attributes.clear();
        self.attr_name.clear();
        self.attr_value.clear();
    }

    fn complete_tag(&mut self, config: &ParserConfig, handler: &mut impl SaxHandler) {
        let name = std::mem::take(&mut self.element_name);
        if !self.is_end_tag {
            self.open_elements.push(name.clone());
            if config.debug {
                debug!("start_element({}) {:?}", name, self.attributes);
            }
            handler.start_element(&name, &self.attributes);
        }
        if self.is_end_tag || self.is_self_closing {
            match self.open_elements.last().cloned() {
                None => self.report(
                    handler,
                    SaxError::ClosingTagWithoutOpening { name: name.clone() },
                ),
                // The mismatched element stays open
                Some(expected) if self.is_end_tag && expected != name => {
                    self.report(
                        handler,
                        SaxError::ClosingTagMismatch {
                            name: name.clone(),
                            expected,
                        },
                    );
                }
                Some(_) => {
                    self.open_elements.pop();
                }
            }
            if config.debug {
                debug!("end_element({})", name);
            }
            handler.end_element(&name);
        }
        self.element_name = name;
    }

    fn append_decoded(
        &mut self,
        raw: &[u8],
        to_value: bool,
        config: &ParserConfig,
        handler: &mut impl SaxHandler,
    ) {
        let file_name = &self.file_name;
        let line = self.location.line;
        let out = if to_value {
            &mut self.attr_value
        } else {
            &mut self.character_data
        };
        entities::decode_into(raw, out, config.decode_char_references, &mut |err| {
            handler.error(file_name, line, &err)
        });
    }

    fn apply(
        &mut self,
        action: Action,
        token: &Token,
        bytes: &[u8],
        config: &ParserConfig,
        handler: &mut impl SaxHandler,
        transcoder: &mut impl Transcoder,
    ) {
        let lexeme = &bytes[token.start..token.end];
        match action {
            Action::Skip => (),
            Action::UnexpectedCharacter => {
                let c = String::from_utf8_lossy(lexeme).into_owned();
                self.report(handler, SaxError::UnexpectedCharacter(c));
            }
            Action::BeginTag => {
                if self.mode == Mode::Content {
                    self.flush_characters(config, handler, transcoder);
                }
                self.begin_tag();
            }
            Action::MarkEndTag => self.is_end_tag = true,
            Action::SetElementName => {
                self.element_name = String::from_utf8_lossy(lexeme).into_owned();
            }
            Action::MarkSelfClosing => self.is_self_closing = true,
            Action::SetAttributeName => {
                self.attr_name = String::from_utf8_lossy(lexeme).into_owned();
            }
            Action::OpenValue => self.attr_value.clear(),
            Action::AppendValue => self.append_decoded(lexeme, true, config, handler),
            Action::AppendValueLiteral => self.attr_value.push_text(lexeme),
            Action::AppendValueSpace => self.attr_value.push_byte(b' '),
            Action::CloseValue => {
                let value = self.to_text(&self.attr_value, handler, transcoder);
                self.attr_value.clear();
                let name = std::mem::take(&mut self.attr_name);
                self.attributes.insert(name, value);
            }
            Action::MissingQuote => {
                let attribute = self.attr_name.clone();
                self.report(handler, SaxError::MissingQuote { attribute });
            }
            Action::CompleteTag => self.complete_tag(config, handler),
            Action::AppendText => self.append_decoded(lexeme, false, config, handler),
            Action::AppendRawText => self.character_data.push_text(lexeme),
            Action::SetEncoding => {
                if let TokenKind::Encoding { start, end } = token.kind {
                    let encoding = String::from_utf8_lossy(&bytes[start..end]);
                    self.declared_encoding = if encoding == "UTF-8" {
                        None
                    } else {
                        Some(encoding.into_owned())
                    };
                }
            }
        }
    }
}

fn join_pieces(buffer: &TextBuffer) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    for (run, reference) in buffer.pieces() {
        out.push_text(run);
        if let Some(c) = reference {
            out.push_char(c);
        }
    }
    out
}

fn transcode_pieces(
    buffer: &TextBuffer,
    encoding: &str,
    transcoder: &mut impl Transcoder,
) -> Result<Vec<u8>, TranscodeError> {
    let mut out: Vec<u8> = Vec::new();
    let mut run_bytes = Vec::new();
    for (run, reference) in buffer.pieces() {
        if !run.is_empty() {
            run_bytes.clear();
            run_bytes.extend_from_slice(run);
            transcoder.transcode(&mut run_bytes, encoding)?;
            out.extend_from_slice(&run_bytes);
        }
        if let Some(c) = reference {
            out.push_char(c);
        }
    }
    Ok(out)
}

/// SAX (Simple API for XML) based XML tokenizer.
///
/// The parser walks over a complete document in one pass and calls the
/// [SaxHandler] methods for the structure it finds. It does not build a
/// tree, and it never stops at an error: problems are reported through
/// [SaxHandler::error()] and the scanner continues after the offending
/// input.
///
/// Open tags are tracked on a stack, so mismatched or missing end tags are
/// reported too.
///
/// # Examples
///
/// ```
/// use xmlsax::{Attributes, SaxError, SaxHandler, SaxParser};
///
/// // Example handler which prints the document outline
/// struct Outline {
///     depth: usize,
/// }
///
/// impl SaxHandler for Outline {
///     fn start_element(&mut self, name: &str, _attributes: &Attributes) {
///         println!("{:indent$}{}", "", name, indent = self.depth * 2);
///         self.depth += 1;
///     }
///
///     fn end_element(&mut self, _name: &str) {
///         self.depth -= 1;
///     }
///
///     fn error(&mut self, file_name: &str, line: usize, error: &SaxError) {
///         eprintln!("{}:{}: {}", file_name, line, error);
///     }
/// }
///
/// let mut parser = SaxParser::new();
/// parser.parse_document("doc.xml", b"<doc><item/><item/></doc>", &mut Outline { depth: 0 });
/// assert_eq!(parser.line_nr(), 1);
/// ```
pub struct SaxParser {
    config: ParserConfig,
    state: ParserState,
}

impl SaxParser {
    /// Creates a new parser instance with the default configuration.
    ///
    /// The instance can be reused for any number of documents.
    pub fn new() -> SaxParser {
        SaxParser::with_config(ParserConfig::new())
    }

    pub fn with_config(config: ParserConfig) -> SaxParser {
        SaxParser {
            config,
            state: ParserState::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    /// Parses a complete document.
    ///
    /// `file_name` is only used in the error reports. If the prolog declares
    /// an encoding other than `UTF-8`, every character data block and
    /// attribute value is passed through `transcoder` before delivery.
    ///
    /// An empty buffer produces no events at all, but it still resets the
    /// state seen through [line_nr()](Self::line_nr),
    /// [file_name()](Self::file_name) and
    /// [declared_encoding()](Self::declared_encoding).
    pub fn parse(
        &mut self,
        file_name: &str,
        text: &[u8],
        handler: &mut impl SaxHandler,
        hooks: &mut impl DebugHooks,
        transcoder: &mut impl Transcoder,
    ) {
        let config = self.config;
        let state = &mut self.state;
        state.reset(file_name);
        if text.is_empty() {
            return;
        }

        let mut pos = 0;
        if text.starts_with(UTF8_BOM) {
            pos = UTF8_BOM.len();
            state.location.skip(pos);
        }

        if config.debug {
            hooks.debug_start();
            debug!("start_document({})", file_name);
        }
        handler.start_document();

        while pos < text.len() {
            let token = scanner::scan(text, pos, state.mode);
            let transition = states::transition(state.mode, token.kind);
            if config.debug {
                trace!(
                    "{}:{} {:?} {:?} -> {:?}",
                    file_name, state.location.line, state.mode, token.kind, transition.action
                );
            }
            state.apply(
                transition.action,
                &token,
                text,
                &config,
                handler,
                transcoder,
            );
            match transition.next {
                Next::Stay => (),
                Next::Enter(mode) => state.enter(mode),
                Next::Resume => state.resume(),
            }
            if transition.consume {
                state.location.advance(&text[token.start..token.end]);
                pos = token.end;
            }
        }

        if config.debug {
            debug!("end_document({})", file_name);
        }
        handler.end_document();
        if config.debug {
            hooks.debug_end();
        }

        if let Some(expected) = state.open_elements.last() {
            state.report(
                handler,
                SaxError::UnexpectedEndOfFile {
                    expected: expected.clone(),
                },
            );
        }
    }

    /// Parses a complete document without debug hooks.
    ///
    /// Declared encodings are converted with [EncodingTranscoder].
    pub fn parse_document(&mut self, file_name: &str, text: &[u8], handler: &mut impl SaxHandler) {
        self.parse(
            file_name,
            text,
            handler,
            &mut NoDebugHooks,
            &mut EncodingTranscoder,
        );
    }

    /// Line number reached by the last parse.
    pub fn line_nr(&self) -> usize {
        self.state.location.line
    }

    /// File name given to the last parse.
    pub fn file_name(&self) -> &str {
        &self.state.file_name
    }

    pub fn location(&self) -> Location {
        self.state.location
    }

    /// Encoding declared by the last parsed document, if not UTF-8.
    pub fn declared_encoding(&self) -> Option<&str> {
        self.state.declared_encoding.as_deref()
    }
}

impl Default for SaxParser {
    fn default() -> Self {
        Self::new()
    }
}
