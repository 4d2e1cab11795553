/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::Attributes;
use super::SaxError;
use super::SaxHandler;

/// An owned copy of one handler callback.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SaxEvent {
    StartDocument,
    EndDocument,
    StartElement {
        name: String,
        attributes: Attributes,
    },
    EndElement(String),
    Characters(String),
    Error {
        file_name: String,
        line: usize,
        error: SaxError,
    },
}

/// A handler which records every callback in document order.
///
/// ```
/// use xmlsax::{EventRecorder, SaxEvent, SaxParser};
///
/// let mut recorder = EventRecorder::new();
/// SaxParser::new().parse_document("doc.xml", b"<a>hi</a>", &mut recorder);
/// assert_eq!(recorder.events()[2], SaxEvent::Characters("hi".into()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Vec<SaxEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        EventRecorder { events: Vec::new() }
    }

    pub fn events(&self) -> &[SaxEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SaxEvent> {
        self.events
    }

    /// Reported problems, without the other events.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &SaxError)> {
        self.events.iter().filter_map(|event| match event {
            SaxEvent::Error { line, error, .. } => Some((*line, error)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl SaxHandler for EventRecorder {
    fn start_document(&mut self) {
        self.events.push(SaxEvent::StartDocument);
    }

    fn end_document(&mut self) {
        self.events.push(SaxEvent::EndDocument);
    }

    fn start_element(&mut self, name: &str, attributes: &Attributes) {
        self.events.push(SaxEvent::StartElement {
            name: name.to_string(),
            attributes: attributes.clone(),
        });
    }

    fn end_element(&mut self, name: &str) {
        self.events.push(SaxEvent::EndElement(name.to_string()));
    }

    fn characters(&mut self, text: &str) {
        self.events.push(SaxEvent::Characters(text.to_string()));
    }

    fn error(&mut self, file_name: &str, line: usize, error: &SaxError) {
        self.events.push(SaxEvent::Error {
            file_name: file_name.to_string(),
            line,
            error: error.clone(),
        });
    }
}
