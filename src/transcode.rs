/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use encoding_rs::Encoding;
use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TranscodeError {
    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("malformed input for encoding '{0}'")]
    Malformed(String),
}

/// Converts text from a declared document encoding to UTF-8.
///
/// The parser calls this for the document text in every character data block
/// and attribute value when the prolog declares an encoding other than
/// `UTF-8`. Text produced by entity and character references is already
/// UTF-8 and is not passed in, so a value may arrive in several runs. The
/// run must be converted in place. On failure the parser reports a
/// [Transcode](crate::SaxError::Transcode) error and delivers the whole
/// value untranscoded.
pub trait Transcoder {
    fn transcode(&mut self, text: &mut Vec<u8>, encoding: &str) -> Result<(), TranscodeError>;
}

/// Transcoder for every encoding label known to the WHATWG encoding standard.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodingTranscoder;

impl Transcoder for EncodingTranscoder {
    fn transcode(&mut self, text: &mut Vec<u8>, encoding: &str) -> Result<(), TranscodeError> {
        let Some(encoding) = Encoding::for_label(encoding.as_bytes()) else {
            return Err(TranscodeError::UnknownEncoding(encoding.to_string()));
        };
        let (decoded, had_errors) = encoding.decode_without_bom_handling(text);
        if had_errors {
            return Err(TranscodeError::Malformed(encoding.name().to_string()));
        }
        let decoded = decoded.into_owned();
        *text = decoded.into_bytes();
        Ok(())
    }
}

/// Transcoder which accepts no encodings at all.
///
/// Useful for strict consumers which only want UTF-8 documents: every
/// declared encoding is reported as an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8Only;

impl Transcoder for Utf8Only {
    fn transcode(&mut self, _text: &mut Vec<u8>, encoding: &str) -> Result<(), TranscodeError> {
        Err(TranscodeError::UnknownEncoding(encoding.to_string()))
    }
}
