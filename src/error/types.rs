// this_file: src/error/types.rs

use thiserror::Error;

/// The reason an [`Error::Incomplete`] was raised.
///
/// Distinguishing these lets a caller tell "the document simply hasn't
/// arrived yet" (all four variants) from a grammar violation, without
/// having to pattern-match on the error's `Display` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteReason {
    /// The byte source was exhausted before any value was parsed at all,
    /// or before a value that had already started could finish.
    Eof,
    /// The input ended inside a string literal or an escape sequence.
    UnterminatedString,
    /// The input ended inside a `/* ... */` comment.
    UnterminatedComment,
    /// The input ended with one or more `[`/`{` still unmatched.
    UnclosedContainer,
}

impl std::fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IncompleteReason::Eof => "incomplete or empty JSON data",
            IncompleteReason::UnterminatedString => "unterminated string at end of input",
            IncompleteReason::UnterminatedComment => "unterminated comment at end of input",
            IncompleteReason::UnclosedContainer => "unclosed array or object at end of input",
        };
        f.write_str(text)
    }
}

/// Error types that can occur while parsing a streamed JSON document.
///
/// The taxonomy is deliberately two-shaped, matching the distinction a
/// caller actually needs to act on: [`Error::Incomplete`] means "there may
/// be more input coming", while [`Error::Malformed`] means "the document is
/// wrong and the iterator that produced this error is now spent".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The byte source ended before the document (or the lexeme currently
    /// being scanned) was complete.
    #[error("{0}")]
    Incomplete(IncompleteReason),

    /// The input violates JSON grammar or lexical rules.
    ///
    /// `lexeme` holds the offending lexeme's raw text when one was
    /// available at the point of failure; `offset` is its absolute byte
    /// offset from the start of the stream.
    #[error("{message} at offset {offset}")]
    Malformed {
        /// Human-readable description of what went wrong.
        message: String,
        /// The offending lexeme, if the failure occurred while looking at
        /// one (absent for e.g. invalid UTF-8 discovered mid-scan).
        lexeme: Option<String>,
        /// Absolute byte offset of the failure.
        offset: u64,
    },
}

impl Error {
    /// Builds a [`Error::Malformed`] carrying the given lexeme and offset.
    pub fn malformed(message: impl Into<String>, lexeme: impl Into<String>, offset: u64) -> Self {
        Error::Malformed {
            message: message.into(),
            lexeme: Some(lexeme.into()),
            offset,
        }
    }

    /// Builds a [`Error::Malformed`] with no specific offending lexeme.
    pub fn malformed_at(message: impl Into<String>, offset: u64) -> Self {
        Error::Malformed {
            message: message.into(),
            lexeme: None,
            offset,
        }
    }

    /// Returns `true` if this is an [`Error::Incomplete`].
    #[inline(always)]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Error::Incomplete(_))
    }

    /// Returns `true` if this is an [`Error::Malformed`].
    #[inline(always)]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Malformed { .. })
    }

    /// The absolute byte offset of the failure, when available.
    ///
    /// `Incomplete` errors carry no offset: by definition the stream ended
    /// before a position could be pinned down any more precisely than "at
    /// end of input".
    pub fn offset(&self) -> Option<u64> {
        match self {
            Error::Incomplete(_) => None,
            Error::Malformed { offset, .. } => Some(*offset),
        }
    }
}
