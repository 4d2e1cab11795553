/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::scanner::TokenKind;

/// Lexical mode of the scanner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Mode {
    /// Before the first element.
    Initial,
    /// Between and inside elements, collecting character data.
    Content,
    /// Right after a '<'.
    Element,
    /// After the element name.
    Attributes,
    /// After an '=', waiting for the opening quote.
    AttributeValue,
    /// Inside a quoted attribute value, opened with `quote`.
    AttrValueStr { quote: u8 },
    CDataSection,
    Prolog,
    Comment,
}

/// What the parser does with a recognized token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Action {
    Skip,
    UnexpectedCharacter,
    /// Flush pending character data and start a new tag.
    BeginTag,
    MarkEndTag,
    SetElementName,
    MarkSelfClosing,
    SetAttributeName,
    OpenValue,
    /// Append text to the value, replacing references.
    AppendValue,
    /// Append the token bytes to the value verbatim.
    AppendValueLiteral,
    AppendValueSpace,
    CloseValue,
    MissingQuote,
    CompleteTag,
    /// Append text to the character data, replacing references.
    AppendText,
    AppendRawText,
    SetEncoding,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Next {
    Stay,
    Enter(Mode),
    /// Go back to the mode saved when the current nested mode was entered.
    Resume,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Transition {
    pub(super) action: Action,
    pub(super) next: Next,
    /// False when the token must be scanned again in the next mode.
    pub(super) consume: bool,
}

impl Transition {
    fn new(action: Action, next: Next) -> Self {
        Transition {
            action,
            next,
            consume: true,
        }
    }

    fn stay(action: Action) -> Self {
        Transition::new(action, Next::Stay)
    }

    fn enter(action: Action, mode: Mode) -> Self {
        Transition::new(action, Next::Enter(mode))
    }
}

/// The mode automaton: maps a mode and the token recognized in it to an
/// action and the following mode.
pub(super) fn transition(mode: Mode, token: TokenKind) -> Transition {
    use Action::*;
    use super::scanner::TokenKind as T;

    match (mode, token) {
        (Mode::Initial, T::Whitespace | T::Doctype) => Transition::stay(Skip),
        (Mode::Initial | Mode::Content, T::PrologStart) => Transition::enter(Skip, Mode::Prolog),
        (Mode::Initial | Mode::Content, T::CommentStart) => {
            Transition::enter(Skip, Mode::Comment)
        }
        (Mode::Initial | Mode::Content, T::TagOpen) => Transition::enter(BeginTag, Mode::Element),

        (Mode::Content, T::Text) => Transition::stay(AppendText),
        (Mode::Content, T::CDataStart) => Transition::enter(Skip, Mode::CDataSection),

        (Mode::Element | Mode::Attributes, T::Whitespace) => Transition::stay(Skip),
        (Mode::Element | Mode::Attributes, T::TagClose) => {
            Transition::enter(CompleteTag, Mode::Content)
        }
        (Mode::Element, T::Slash) => Transition::stay(MarkEndTag),
        (Mode::Element, T::Name) => Transition::enter(SetElementName, Mode::Attributes),

        (Mode::Attributes, T::Slash) => Transition::stay(MarkSelfClosing),
        (Mode::Attributes, T::Name) => Transition::stay(SetAttributeName),
        (Mode::Attributes, T::Equals) => Transition::enter(Skip, Mode::AttributeValue),

        (Mode::AttributeValue, T::Whitespace) => Transition::stay(Skip),
        (Mode::AttributeValue, T::Quote(quote)) => {
            Transition::enter(OpenValue, Mode::AttrValueStr { quote })
        }
        (Mode::AttributeValue, _) => Transition {
            action: MissingQuote,
            next: Next::Enter(Mode::Attributes),
            consume: false,
        },

        (Mode::AttrValueStr { quote }, T::Quote(q)) if q == quote => {
            Transition::enter(CloseValue, Mode::Attributes)
        }
        (Mode::AttrValueStr { .. }, T::Quote(_)) => Transition::stay(AppendValueLiteral),
        (Mode::AttrValueStr { .. }, T::Newline) => Transition::stay(AppendValueSpace),
        (Mode::AttrValueStr { .. }, T::Text) => Transition::stay(AppendValue),

        (Mode::CDataSection, T::Text) => Transition::stay(AppendRawText),
        (Mode::CDataSection, T::CDataEnd) => Transition::new(Skip, Next::Resume),

        (Mode::Prolog, T::Encoding { .. }) => Transition::stay(SetEncoding),
        (Mode::Prolog, T::PrologEnd) => Transition::new(Skip, Next::Resume),
        (Mode::Prolog, _) => Transition::stay(Skip),

        (Mode::Comment, T::CommentEnd) => Transition::new(Skip, Next::Resume),
        (Mode::Comment, _) => Transition::stay(Skip),

        _ => Transition::stay(UnexpectedCharacter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_flow() {
        let t = transition(Mode::Content, TokenKind::TagOpen);
        assert_eq!(t.action, Action::BeginTag);
        assert_eq!(t.next, Next::Enter(Mode::Element));

        let t = transition(Mode::Element, TokenKind::Name);
        assert_eq!(t.next, Next::Enter(Mode::Attributes));

        let t = transition(Mode::Attributes, TokenKind::TagClose);
        assert_eq!(t.action, Action::CompleteTag);
        assert_eq!(t.next, Next::Enter(Mode::Content));
    }

    #[test]
    fn quotes() {
        let t = transition(Mode::AttributeValue, TokenKind::Quote(b'\''));
        assert_eq!(t.next, Next::Enter(Mode::AttrValueStr { quote: b'\'' }));

        let mode = Mode::AttrValueStr { quote: b'"' };
        assert_eq!(
            transition(mode, TokenKind::Quote(b'\'')).action,
            Action::AppendValueLiteral
        );
        assert_eq!(
            transition(mode, TokenKind::Quote(b'"')).action,
            Action::CloseValue
        );
    }

    #[test]
    fn missing_quote_reconsumes() {
        let t = transition(Mode::AttributeValue, TokenKind::Other);
        assert_eq!(t.action, Action::MissingQuote);
        assert_eq!(t.next, Next::Enter(Mode::Attributes));
        assert!(!t.consume);
    }

    #[test]
    fn unexpected() {
        assert_eq!(
            transition(Mode::Initial, TokenKind::Other).action,
            Action::UnexpectedCharacter
        );
        assert_eq!(
            transition(Mode::Element, TokenKind::Other).action,
            Action::UnexpectedCharacter
        );
        assert_eq!(
            transition(Mode::Attributes, TokenKind::Other).action,
            Action::UnexpectedCharacter
        );
    }

    #[test]
    fn nested_modes_resume() {
        for (mode, token) in [
            (Mode::Comment, TokenKind::CommentEnd),
            (Mode::CDataSection, TokenKind::CDataEnd),
            (Mode::Prolog, TokenKind::PrologEnd),
        ] {
            assert_eq!(transition(mode, token).next, Next::Resume);
        }
    }
}
