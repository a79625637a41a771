// this_file: src/parser.rs

//! The syntactic driver: turns a stream of [`Lexeme`]s into flat
//! [`BasicEvent`]s, tracking open containers on an explicit stack rather
//! than the native call stack.

use crate::config::ParserOptions;
use crate::error::{Error, IncompleteReason};
use crate::event::{BasicEvent, EventKind, EventValue};
use crate::lexer::{Lexeme, Lexer};
use crate::number::parse_number;
use crate::string_decode;
use std::io::Read;

/// State of an array whose `[` has already been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayState {
    /// Just saw `[`; either a value or `]` comes next.
    ExpectFirstOrClose,
    /// Just saw `,`; only a value is acceptable (no trailing comma).
    ExpectValueAfterComma,
    /// Just finished a value; either `,` or `]` comes next.
    ExpectCommaOrClose,
}

/// State of an object whose `{` has already been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    /// Just saw `{`; either a key or `}` comes next.
    ExpectKeyOrClose,
    /// Just saw `,`; only a key is acceptable (no trailing comma).
    ExpectKeyAfterComma,
    /// Just emitted a key; a `:` must follow.
    ExpectColon,
    /// Just consumed `:`; a value comes next.
    ExpectValue,
    /// Just finished a value; either `,` or `}` comes next.
    ExpectCommaOrClose,
}

/// One entry on the driver's explicit container stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Array(ArrayState),
    Object(ObjectState),
}

/// Parses a byte stream into a flat sequence of [`BasicEvent`]s.
///
/// This is the innermost layer of the pipeline — no path tracking, no
/// value materialization, just a faithful token-by-token walk of the
/// grammar. [`crate::path::parse`] and [`crate::builder::ObjectBuilder`]
/// are built on top of it.
pub struct Parser<R> {
    lexer: Lexer<R>,
    stack: Vec<Frame>,
    options: ParserOptions,
    done: bool,
    produced_a_value: bool,
}

impl<R: Read> Parser<R> {
    /// Creates a new parser over `reader` with the given options.
    pub fn new(reader: R, options: ParserOptions) -> Self {
        Parser {
            lexer: Lexer::new(reader, options.buf_size, options.allow_comments),
            stack: Vec::new(),
            options,
            done: false,
            produced_a_value: false,
        }
    }

    fn next_required_lexeme(&mut self) -> Result<Lexeme, Error> {
        match self.lexer.next_lexeme()? {
            Some(l) => Ok(l),
            None => {
                if self.stack.is_empty() {
                    Err(Error::Incomplete(IncompleteReason::Eof))
                } else {
                    Err(Error::Incomplete(IncompleteReason::UnclosedContainer))
                }
            }
        }
    }

    fn scalar_event(lexeme: &Lexeme) -> Result<BasicEvent, Error> {
        match lexeme.text.as_str() {
            "null" => Ok(BasicEvent::new(EventKind::Null, EventValue::None)),
            "true" => Ok(BasicEvent::new(EventKind::Boolean, EventValue::Bool(true))),
            "false" => Ok(BasicEvent::new(EventKind::Boolean, EventValue::Bool(false))),
            text if text.starts_with('"') => {
                let body = &text[1..text.len() - 1];
                let decoded = string_decode::decode(body);
                Ok(BasicEvent::new(EventKind::String, EventValue::Text(decoded)))
            }
            text => {
                let number = parse_number(text, lexeme.offset)?;
                Ok(BasicEvent::new(EventKind::Number, EventValue::Number(number)))
            }
        }
    }

    fn key_event(lexeme: &Lexeme) -> Result<BasicEvent, Error> {
        if !lexeme.text.starts_with('"') {
            return Err(Error::malformed(
                "expected a string key",
                lexeme.text.clone(),
                lexeme.offset,
            ));
        }
        let body = &lexeme.text[1..lexeme.text.len() - 1];
        let decoded = string_decode::decode(body);
        Ok(BasicEvent::new(EventKind::MapKey, EventValue::Text(decoded)))
    }

    /// Parses exactly the lexeme that opens a value position (not inside
    /// an already-pending key/colon state), pushing a new frame for `[`
    /// or `{` and returning the corresponding event for anything else.
    fn open_value(&mut self, lexeme: &Lexeme) -> Result<BasicEvent, Error> {
        match lexeme.text.as_str() {
            "[" => {
                if self.stack.len() >= self.options.max_depth {
                    return Err(Error::malformed("maximum nesting depth exceeded", "[", lexeme.offset));
                }
                self.stack.push(Frame::Array(ArrayState::ExpectFirstOrClose));
                Ok(BasicEvent::new(EventKind::StartArray, EventValue::None))
            }
            "{" => {
                if self.stack.len() >= self.options.max_depth {
                    return Err(Error::malformed("maximum nesting depth exceeded", "{", lexeme.offset));
                }
                self.stack.push(Frame::Object(ObjectState::ExpectKeyOrClose));
                Ok(BasicEvent::new(EventKind::StartMap, EventValue::None))
            }
            "]" | "}" | "," | ":" => Err(Error::malformed(
                "unexpected token, expected a value",
                lexeme.text.clone(),
                lexeme.offset,
            )),
            _ => Self::scalar_event(lexeme),
        }
    }

    /// Advances the driver's state machine after a value (scalar or a
    /// just-closed container) has been fully produced at the top of the
    /// stack's current frame.
    fn after_value(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            match frame {
                Frame::Array(state) => *state = ArrayState::ExpectCommaOrClose,
                Frame::Object(state) => *state = ObjectState::ExpectCommaOrClose,
            }
        }
    }

    fn step(&mut self) -> Result<Option<BasicEvent>, Error> {
        if self.done {
            return Ok(None);
        }

        match self.stack.last().copied() {
            None => {
                if self.produced_a_value {
                    if !self.options.multiple_values {
                        match self.lexer.next_lexeme()? {
                            None => {
                                self.done = true;
                                return Ok(None);
                            }
                            Some(extra) => {
                                return Err(Error::malformed_at("Additional data", extra.offset));
                            }
                        }
                    }
                    match self.lexer.next_lexeme()? {
                        None => {
                            self.done = true;
                            Ok(None)
                        }
                        Some(lexeme) => {
                            let event = self.open_value(&lexeme)?;
                            if !event.kind.is_start() {
                                self.produced_a_value = true;
                            }
                            Ok(Some(event))
                        }
                    }
                } else {
                    let lexeme = self.next_required_lexeme()?;
                    let event = self.open_value(&lexeme)?;
                    if !event.kind.is_start() {
                        self.produced_a_value = true;
                    }
                    Ok(Some(event))
                }
            }

            Some(Frame::Array(ArrayState::ExpectFirstOrClose)) => {
                let lexeme = self.next_required_lexeme()?;
                if lexeme.text == "]" {
                    self.stack.pop();
                    self.after_value();
                    if self.stack.is_empty() {
                        self.produced_a_value = true;
                    }
                    return Ok(Some(BasicEvent::new(EventKind::EndArray, EventValue::None)));
                }
                let event = self.open_value(&lexeme)?;
                if !event.kind.is_start() {
                    if let Some(Frame::Array(state)) = self.stack.last_mut() {
                        *state = ArrayState::ExpectCommaOrClose;
                    }
                }
                Ok(Some(event))
            }

            Some(Frame::Array(ArrayState::ExpectValueAfterComma)) => {
                let lexeme = self.next_required_lexeme()?;
                let event = self.open_value(&lexeme)?;
                if !event.kind.is_start() {
                    if let Some(Frame::Array(state)) = self.stack.last_mut() {
                        *state = ArrayState::ExpectCommaOrClose;
                    }
                }
                Ok(Some(event))
            }

            Some(Frame::Array(ArrayState::ExpectCommaOrClose)) => {
                let lexeme = self.next_required_lexeme()?;
                match lexeme.text.as_str() {
                    "]" => {
                        self.stack.pop();
                        self.after_value();
                        if self.stack.is_empty() {
                            self.produced_a_value = true;
                        }
                        Ok(Some(BasicEvent::new(EventKind::EndArray, EventValue::None)))
                    }
                    "," => {
                        if let Some(Frame::Array(state)) = self.stack.last_mut() {
                            *state = ArrayState::ExpectValueAfterComma;
                        }
                        self.step()
                    }
                    _ => Err(Error::malformed(
                        "expected ',' or ']'",
                        lexeme.text,
                        lexeme.offset,
                    )),
                }
            }

            Some(Frame::Object(ObjectState::ExpectKeyOrClose)) => {
                let lexeme = self.next_required_lexeme()?;
                if lexeme.text == "}" {
                    self.stack.pop();
                    self.after_value();
                    if self.stack.is_empty() {
                        self.produced_a_value = true;
                    }
                    return Ok(Some(BasicEvent::new(EventKind::EndMap, EventValue::None)));
                }
                let event = Self::key_event(&lexeme)?;
                if let Some(Frame::Object(state)) = self.stack.last_mut() {
                    *state = ObjectState::ExpectColon;
                }
                Ok(Some(event))
            }

            Some(Frame::Object(ObjectState::ExpectKeyAfterComma)) => {
                let lexeme = self.next_required_lexeme()?;
                let event = Self::key_event(&lexeme)?;
                if let Some(Frame::Object(state)) = self.stack.last_mut() {
                    *state = ObjectState::ExpectColon;
                }
                Ok(Some(event))
            }

            Some(Frame::Object(ObjectState::ExpectColon)) => {
                let lexeme = self.next_required_lexeme()?;
                if lexeme.text != ":" {
                    return Err(Error::malformed("expected ':'", lexeme.text, lexeme.offset));
                }
                if let Some(Frame::Object(state)) = self.stack.last_mut() {
                    *state = ObjectState::ExpectValue;
                }
                self.step()
            }

            Some(Frame::Object(ObjectState::ExpectValue)) => {
                let lexeme = self.next_required_lexeme()?;
                let event = self.open_value(&lexeme)?;
                if !event.kind.is_start() {
                    if let Some(Frame::Object(state)) = self.stack.last_mut() {
                        *state = ObjectState::ExpectCommaOrClose;
                    }
                }
                Ok(Some(event))
            }

            Some(Frame::Object(ObjectState::ExpectCommaOrClose)) => {
                let lexeme = self.next_required_lexeme()?;
                match lexeme.text.as_str() {
                    "}" => {
                        self.stack.pop();
                        self.after_value();
                        if self.stack.is_empty() {
                            self.produced_a_value = true;
                        }
                        Ok(Some(BasicEvent::new(EventKind::EndMap, EventValue::None)))
                    }
                    "," => {
                        if let Some(Frame::Object(state)) = self.stack.last_mut() {
                            *state = ObjectState::ExpectKeyAfterComma;
                        }
                        self.step()
                    }
                    _ => Err(Error::malformed(
                        "expected ',' or '}'",
                        lexeme.text,
                        lexeme.offset,
                    )),
                }
            }
        }
    }
}

impl<R: Read> Iterator for Parser<R> {
    type Item = Result<BasicEvent, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.step() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => None,
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Parses `reader` into a flat iterator of [`BasicEvent`]s using default
/// [`ParserOptions`].
pub fn basic_parse<R: Read>(reader: R) -> Parser<R> {
    Parser::new(reader, ParserOptions::default())
}

/// Parses `reader` into a flat iterator of [`BasicEvent`]s with explicit
/// options.
pub fn basic_parse_with_options<R: Read>(reader: R, options: ParserOptions) -> Parser<R> {
    Parser::new(reader, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn events(input: &str) -> Vec<BasicEvent> {
        basic_parse(Cursor::new(input.as_bytes().to_vec()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn try_events(input: &str) -> Result<Vec<BasicEvent>, Error> {
        basic_parse(Cursor::new(input.as_bytes().to_vec())).collect()
    }

    #[test]
    fn scalar_document() {
        assert_eq!(events("null"), vec![BasicEvent::new(EventKind::Null, EventValue::None)]);
        assert_eq!(
            events("true"),
            vec![BasicEvent::new(EventKind::Boolean, EventValue::Bool(true))]
        );
        assert_eq!(
            events("42"),
            vec![BasicEvent::new(
                EventKind::Number,
                EventValue::Number(crate::value::Number::Integer(42))
            )]
        );
    }

    #[test]
    fn empty_array_and_object() {
        assert_eq!(
            events("[]"),
            vec![
                BasicEvent::new(EventKind::StartArray, EventValue::None),
                BasicEvent::new(EventKind::EndArray, EventValue::None),
            ]
        );
        assert_eq!(
            events("{}"),
            vec![
                BasicEvent::new(EventKind::StartMap, EventValue::None),
                BasicEvent::new(EventKind::EndMap, EventValue::None),
            ]
        );
    }

    #[test]
    fn nested_structure() {
        let evs = events(r#"{"a":[1,2],"b":null}"#);
        let kinds: Vec<EventKind> = evs.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::StartMap,
                EventKind::MapKey,
                EventKind::StartArray,
                EventKind::Number,
                EventKind::Number,
                EventKind::EndArray,
                EventKind::MapKey,
                EventKind::Null,
                EventKind::EndMap,
            ]
        );
    }

    #[test]
    fn trailing_comma_in_array_is_malformed() {
        assert!(try_events("[1,2,]").is_err());
    }

    #[test]
    fn trailing_comma_in_object_is_malformed() {
        assert!(try_events(r#"{"a":1,}"#).is_err());
    }

    #[test]
    fn trailing_data_is_malformed() {
        let err = try_events("1 2").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn multiple_values_option_allows_trailing_data() {
        let opts = ParserOptions::new().with_multiple_values(true);
        let evs: Vec<_> = basic_parse_with_options(Cursor::new(b"1 2 3".to_vec()), opts)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(evs.len(), 3);
    }

    #[test]
    fn truncated_document_is_incomplete() {
        let err = try_events(r#"{"a":"#).unwrap_err();
        assert!(err.is_incomplete());
    }

    #[test]
    fn non_string_key_is_malformed() {
        assert!(try_events("{1:2}").is_err());
    }

    #[test]
    fn max_depth_is_enforced() {
        let opts = ParserOptions::new().with_max_depth(2);
        let doc = "[[[1]]]";
        let err: Result<Vec<_>, _> =
            basic_parse_with_options(Cursor::new(doc.as_bytes().to_vec()), opts).collect();
        assert!(err.unwrap_err().is_malformed());
    }
}
