/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub mod entities;
mod parser;
mod transcode;

pub use parser::Attributes;
pub use parser::DebugHooks;
pub use parser::ErrorKind;
pub use parser::EventRecorder;
pub use parser::Location;
pub use parser::NoDebugHooks;
pub use parser::ParserConfig;
pub use parser::SaxError;
pub use parser::SaxEvent;
pub use parser::SaxHandler;
pub use parser::SaxParser;

pub use transcode::EncodingTranscoder;
pub use transcode::TranscodeError;
pub use transcode::Transcoder;
pub use transcode::Utf8Only;
