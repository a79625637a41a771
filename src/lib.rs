// this_file: src/lib.rs
#![warn(missing_docs, rust_2018_idioms, unused_lifetimes, unused_qualifications)]

//! An incremental, pull-based JSON parser for documents that may exceed
//! available memory or arrive as a stream.
//!
//! The pipeline has three layers, each built directly on the one below:
//!
//! - [`basic_parse`] yields flat [`BasicEvent`]s with no path context —
//!   the cheapest way to walk a document when you only care about its
//!   shape.
//! - [`parse`] annotates each event with the dotted path to its containing
//!   context (`"docs.item.name"`), letting a consumer recognize *which*
//!   part of the document it is looking at without hand-tracking depth.
//! - [`items`] runs a prefix pattern against a [`parse`] stream and
//!   materializes a [`Value`] for every matching subtree, which is the
//!   usual entry point for extracting specific records out of a large
//!   document without holding the whole thing in memory.
//!
//! All three return ordinary iterators of `Result<_, Error>`; once an
//! iterator yields an `Err` it is spent and should not be polled again.
//!
//! ```
//! use streamjson::{items, parse, basic_parse};
//! use std::io::Cursor;
//!
//! let doc = br#"{"docs":[{"n":1},{"n":2}]}"#;
//!
//! let values: Vec<_> = items(parse(basic_parse(Cursor::new(doc.to_vec()))), "docs.item")
//!     .collect::<Result<Vec<_>>>()
//!     .unwrap();
//! assert_eq!(values.len(), 2);
//! ```

/// Parser and lexer configuration ([`ParserOptions`]).
pub mod config;

/// Error taxonomy ([`Error`], [`IncompleteReason`]) and the crate's
/// [`Result`] alias.
pub mod error;

/// Flat and path-prefixed event types ([`BasicEvent`], [`PrefixedEvent`],
/// [`EventKind`], [`EventValue`]).
pub mod event;

/// Streaming byte-level lexer ([`lexer::Lexer`], [`lexer::Lexeme`]).
pub mod lexer;

/// Numeric lexeme classification ([`number::parse_number`]).
pub mod number;

/// The syntactic driver: flat parsing with an explicit container stack
/// ([`parser::Parser`], [`basic_parse`]).
pub mod parser;

/// Path tracking over a flat event stream ([`path::PathTracker`],
/// [`parse`]).
pub mod path;

/// Reconstructing [`Value`] trees from an event stream
/// ([`builder::ObjectBuilder`]).
pub mod builder;

/// Selective materialization by path pattern ([`selector::ItemSelector`],
/// [`items`]).
pub mod selector;

/// String escape decoding ([`string_decode::decode`]).
pub mod string_decode;

/// The materialized value tree ([`Value`], [`Number`]).
pub mod value;

pub use builder::ObjectBuilder;
pub use config::ParserOptions;
pub use error::{Error, IncompleteReason, Result};
pub use event::{BasicEvent, EventKind, EventValue, PrefixedEvent};
pub use lexer::{Lexeme, Lexer};
pub use parser::{basic_parse, basic_parse_with_options, Parser};
pub use path::{path_track, PathTracker};
pub use selector::{items, ItemSelector};
pub use value::{Number, Value};

/// Parses `reader` into path-prefixed events, using default
/// [`ParserOptions`].
///
/// Equivalent to `path_track(basic_parse(reader))`.
pub fn parse<R: std::io::Read>(reader: R) -> PathTracker<Parser<R>> {
    path_track(basic_parse(reader))
}

/// Parses `reader` into path-prefixed events with explicit options.
pub fn parse_with_options<R: std::io::Read>(
    reader: R,
    options: ParserOptions,
) -> PathTracker<Parser<R>> {
    path_track(basic_parse_with_options(reader, options))
}
