// this_file: src/error/mod.rs

//! Error taxonomy for the streaming JSON parser.
//!
//! Two kinds only, matching what a caller needs to branch on: the input
//! ended before the document did ([`Error::Incomplete`]), or the input is
//! simply not valid JSON ([`Error::Malformed`]). Nothing is recoverable by
//! this crate itself — once a stage yields an `Err`, the iterator that
//! produced it is considered spent.

mod result;
mod types;

pub use result::Result;
pub use types::{Error, IncompleteReason};
