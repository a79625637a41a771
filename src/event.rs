// this_file: src/event.rs

//! The basic and prefixed event types that flow through the pipeline.

use crate::value::Number;

/// The closed set of event kinds a [`crate::parser::Parser`] can produce.
///
/// Exact spellings are the public contract: callers may match on these to
/// drive their own consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number literal.
    Number,
    /// A string literal.
    String,
    /// An object key, emitted before the corresponding value event.
    MapKey,
    /// The `{` that opens an object.
    StartMap,
    /// The `}` that closes an object.
    EndMap,
    /// The `[` that opens an array.
    StartArray,
    /// The `]` that closes an array.
    EndArray,
}

impl EventKind {
    /// Returns `true` for `StartMap` and `StartArray`.
    #[inline(always)]
    pub fn is_start(&self) -> bool {
        matches!(self, EventKind::StartMap | EventKind::StartArray)
    }

    /// Returns `true` for `EndMap` and `EndArray`.
    #[inline(always)]
    pub fn is_end(&self) -> bool {
        matches!(self, EventKind::EndMap | EventKind::EndArray)
    }

    /// Returns `true` for the scalar kinds (`Null`, `Boolean`, `Number`,
    /// `String`) — i.e. everything that is neither structural nor a key.
    #[inline(always)]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            EventKind::Null | EventKind::Boolean | EventKind::Number | EventKind::String
        )
    }
}

/// The value carried alongside an [`EventKind`].
///
/// Structural events (`StartMap`, `EndMap`, `StartArray`, `EndArray`) and
/// `Null` carry [`EventValue::None`]; `MapKey` and `String` both carry
/// decoded text, matching the reference parser's "string / map_key ->
/// decoded text" rule.
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    /// No payload (structural events, and `null`).
    None,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar.
    Number(Number),
    /// Decoded text, for both `string` values and `map_key` events.
    Text(String),
}

impl EventValue {
    /// Borrows the text payload, if there is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EventValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A flat `(kind, value)` token with no path context.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicEvent {
    /// The kind of event.
    pub kind: EventKind,
    /// The event's payload.
    pub value: EventValue,
}

impl BasicEvent {
    /// Builds a new basic event.
    pub fn new(kind: EventKind, value: EventValue) -> Self {
        BasicEvent { kind, value }
    }
}

/// A [`BasicEvent`] annotated with the dotted path to its containing
/// context.
///
/// Object members use the current key as a segment; array elements use the
/// literal segment `item`; at the top level the prefix is the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixedEvent {
    /// Dot-joined path to the context *containing* this event.
    pub prefix: String,
    /// The kind of event.
    pub kind: EventKind,
    /// The event's payload.
    pub value: EventValue,
}

impl PrefixedEvent {
    /// Builds a new prefixed event.
    pub fn new(prefix: String, kind: EventKind, value: EventValue) -> Self {
        PrefixedEvent { prefix, kind, value }
    }
}
