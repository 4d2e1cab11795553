/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use thiserror::Error;

use crate::transcode::TranscodeError;

/// Category of a reported problem.
///
/// None of these stop the parser, it always skips the offending input and
/// continues with the rest of the document. The categories let the caller
/// decide which problems are worth escalating.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A character which is not allowed in the current lexical mode.
    Lexical,
    /// Unmatched or mismatched end tags, unclosed tags at the end of input.
    Structural,
    /// An attribute value without quotes.
    AttributeSyntax,
    /// An unrecognized entity or character reference.
    Content,
    /// Declared encoding could not be converted to UTF-8.
    Transcoding,
}

/// A problem found in the document, delivered to
/// [SaxHandler::error()](super::SaxHandler::error).
///
/// The `Display` implementation gives the human readable message.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SaxError {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(String),

    #[error("closing tag '{name}' without matching opening tag")]
    ClosingTagWithoutOpening { name: String },

    #[error("closing tag '{name}' does not match the opening tag '{expected}'")]
    ClosingTagMismatch { name: String, expected: String },

    #[error("end of file reached while expecting closing tag '{expected}'")]
    UnexpectedEndOfFile { expected: String },

    #[error("missing quote for the value of attribute '{attribute}'")]
    MissingQuote { attribute: String },

    #[error("invalid character entity '&{0};' found")]
    InvalidEntity(String),

    #[error("invalid character reference '&{0};' found")]
    InvalidCharReference(String),

    #[error("failed to transcode string '{text}' from encoding '{encoding}' to UTF-8")]
    Transcode {
        text: String,
        encoding: String,
        #[source]
        source: TranscodeError,
    },
}

impl SaxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SaxError::UnexpectedCharacter(_) => ErrorKind::Lexical,
            SaxError::ClosingTagWithoutOpening { .. }
            | SaxError::ClosingTagMismatch { .. }
            | SaxError::UnexpectedEndOfFile { .. } => ErrorKind::Structural,
            SaxError::MissingQuote { .. } => ErrorKind::AttributeSyntax,
            SaxError::InvalidEntity(_) | SaxError::InvalidCharReference(_) => ErrorKind::Content,
            SaxError::Transcode { .. } => ErrorKind::Transcoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = SaxError::ClosingTagMismatch {
            name: "b".into(),
            expected: "a".into(),
        };
        assert_eq!(
            err.to_string(),
            "closing tag 'b' does not match the opening tag 'a'"
        );
        assert_eq!(err.kind(), ErrorKind::Structural);

        let err = SaxError::InvalidEntity("nbsp".into());
        assert_eq!(err.to_string(), "invalid character entity '&nbsp;' found");
        assert_eq!(err.kind(), ErrorKind::Content);

        let err = SaxError::UnexpectedEndOfFile {
            expected: "root".into(),
        };
        assert_eq!(
            err.to_string(),
            "end of file reached while expecting closing tag 'root'"
        );
    }
}
