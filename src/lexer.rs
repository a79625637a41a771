// this_file: src/lexer.rs

//! Streaming lexer: tokenizes UTF-8 JSON across a moving byte buffer,
//! handling lexemes that straddle refill boundaries.

use crate::error::{Error, IncompleteReason};
use std::io::Read;

/// A single lexical token: either a structural character, a complete
/// quoted string (quotes included, escapes raw), or a bareword that must be
/// a JSON number or one of the keywords `true`/`false`/`null`.
///
/// `offset` is the absolute byte position of `text`'s first byte within the
/// full input stream, not within the lexer's current buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// Absolute byte offset of this lexeme's first byte.
    pub offset: u64,
    /// The lexeme's raw text.
    pub text: String,
}

const STRUCTURAL: &[u8] = b"{}[],:";

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_bareword_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')
}

/// Tokenizes a byte stream into [`Lexeme`]s.
///
/// The lexer operates entirely in terms of bytes. Every byte it branches on
/// (whitespace, `{ } [ ] , :`, `"`, `\`, and the bareword class
/// `[A-Za-z0-9+\-.eE]`) is ASCII, so a refill that lands in the middle of a
/// multi-byte UTF-8 sequence is harmless: the continuation bytes (always
/// `>= 0x80`) never match any of those branches, and the full lexeme is
/// only decoded to UTF-8 once it is complete. A lexeme that turns out not
/// to be valid UTF-8 fails with [`Error::Malformed`].
pub struct Lexer<R> {
    reader: R,
    buf: Vec<u8>,
    pos: usize,
    discarded: u64,
    buf_size: usize,
    allow_comments: bool,
    eof: bool,
}

impl<R: Read> Lexer<R> {
    /// Creates a new lexer reading from `reader` in chunks of `buf_size`
    /// bytes.
    pub fn new(reader: R, buf_size: usize, allow_comments: bool) -> Self {
        Lexer {
            reader,
            buf: Vec::new(),
            pos: 0,
            discarded: 0,
            buf_size: buf_size.max(1),
            allow_comments,
            eof: false,
        }
    }

    /// Absolute offset of the next unread byte.
    fn current_offset(&self) -> u64 {
        self.discarded + self.pos as u64
    }

    /// Reads up to `buf_size` more bytes from the source, returning the
    /// number of bytes actually read (`0` at EOF).
    fn refill(&mut self) -> Result<usize, Error> {
        if self.eof {
            return Ok(0);
        }
        let start = self.buf.len();
        self.buf.resize(start + self.buf_size, 0);
        let read = self
            .reader
            .read(&mut self.buf[start..])
            .map_err(|_| Error::malformed_at("I/O error reading JSON source", self.current_offset()))?;
        self.buf.truncate(start + read);
        if read == 0 {
            self.eof = true;
        }
        Ok(read)
    }

    /// Drops fully-consumed bytes from the head of the buffer, updating the
    /// running `discarded` counter so offsets stay absolute.
    fn compact(&mut self) {
        if self.pos == 0 {
            return;
        }
        if self.pos >= self.buf_size || self.pos == self.buf.len() {
            self.buf.drain(..self.pos);
            self.discarded += self.pos as u64;
            self.pos = 0;
        }
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, Error> {
        loop {
            if self.pos < self.buf.len() {
                return Ok(Some(self.buf[self.pos]));
            }
            if self.refill()? == 0 {
                return Ok(None);
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), Error> {
        loop {
            match self.peek_byte()? {
                Some(b) if is_whitespace(b) => {
                    self.pos += 1;
                }
                Some(b'/') if self.allow_comments => {
                    if !self.try_skip_comment()? {
                        return Ok(());
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Attempts to skip a `//` or `/* */` comment starting at the current
    /// position. Returns `true` if a comment was consumed, `false` if the
    /// `/` was not actually the start of one (left untouched for the
    /// caller to fail on as an ordinary lexeme).
    fn try_skip_comment(&mut self) -> Result<bool, Error> {
        let start_offset = self.current_offset();
        let slash_pos = self.pos;
        self.pos += 1;
        match self.peek_byte()? {
            Some(b'/') => {
                self.pos += 1;
                loop {
                    match self.peek_byte()? {
                        None => return Ok(true), // EOF ends a line comment cleanly
                        Some(b'\n') => {
                            self.pos += 1;
                            return Ok(true);
                        }
                        Some(_) => self.pos += 1,
                    }
                }
            }
            Some(b'*') => {
                self.pos += 1;
                loop {
                    match self.peek_byte()? {
                        None => {
                            return Err(Error::Incomplete(IncompleteReason::UnterminatedComment))
                        }
                        Some(b'*') => {
                            self.pos += 1;
                            if self.peek_byte()? == Some(b'/') {
                                self.pos += 1;
                                return Ok(true);
                            }
                        }
                        Some(_) => self.pos += 1,
                    }
                }
            }
            _ => {
                // Not a comment after all; rewind so the caller sees the `/`.
                self.pos = slash_pos;
                let _ = start_offset;
                Ok(false)
            }
        }
    }

    fn scan_string(&mut self) -> Result<Lexeme, Error> {
        let offset = self.current_offset();
        let start = self.pos;
        self.pos += 1; // opening quote

        loop {
            match self.peek_byte()? {
                None => return Err(Error::Incomplete(IncompleteReason::UnterminatedString)),
                Some(b'\\') => {
                    self.pos += 1;
                    if self.peek_byte()?.is_none() {
                        return Err(Error::Incomplete(IncompleteReason::UnterminatedString));
                    }
                    self.pos += 1;
                }
                Some(b'"') => {
                    self.pos += 1;
                    let bytes = &self.buf[start..self.pos];
                    let text = std::str::from_utf8(bytes)
                        .map_err(|_| Error::malformed_at("invalid UTF-8 in string", offset))?
                        .to_string();
                    return Ok(Lexeme { offset, text });
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scan_bareword(&mut self) -> Result<Lexeme, Error> {
        let offset = self.current_offset();
        let start = self.pos;
        loop {
            if self.pos >= self.buf.len() {
                if self.refill()? == 0 {
                    break;
                }
                continue;
            }
            if is_bareword_byte(self.buf[self.pos]) {
                self.pos += 1;
            } else {
                break;
            }
        }
        let bytes = &self.buf[start..self.pos];
        let text = std::str::from_utf8(bytes)
            .map_err(|_| Error::malformed_at("invalid UTF-8", offset))?
            .to_string();
        Ok(Lexeme { offset, text })
    }

    /// Returns the next lexeme, or `Ok(None)` at a clean end of input
    /// (whitespace/comments only remaining, no lexeme in flight).
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>, Error> {
        self.compact();
        self.skip_whitespace_and_comments()?;

        let byte = match self.peek_byte()? {
            None => return Ok(None),
            Some(b) => b,
        };

        if STRUCTURAL.contains(&byte) {
            let offset = self.current_offset();
            self.pos += 1;
            return Ok(Some(Lexeme {
                offset,
                text: (byte as char).to_string(),
            }));
        }

        if byte == b'"' {
            return self.scan_string().map(Some);
        }

        self.scan_bareword().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lex_all(input: &str, buf_size: usize) -> Vec<Lexeme> {
        let mut lexer = Lexer::new(Cursor::new(input.as_bytes().to_vec()), buf_size, false);
        let mut out = Vec::new();
        while let Some(lexeme) = lexer.next_lexeme().unwrap() {
            out.push(lexeme);
        }
        out
    }

    #[test]
    fn structural_chars_each_become_a_lexeme() {
        let lexemes = lex_all("{}[],:", 64);
        let texts: Vec<&str> = lexemes.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["{", "}", "[", "]", ",", ":"]);
    }

    #[test]
    fn strings_keep_quotes_and_escapes_verbatim() {
        let lexemes = lex_all(r#"  "a\"b"  "#, 64);
        assert_eq!(lexemes.len(), 1);
        assert_eq!(lexemes[0].text, r#""a\"b""#);
    }

    #[test]
    fn barewords_capture_numbers_and_keywords() {
        let lexemes = lex_all("null true false -1.0e+2", 64);
        let texts: Vec<&str> = lexemes.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["null", "true", "false", "-1.0e+2"]);
    }

    #[test]
    fn offsets_are_absolute_and_increasing() {
        let lexemes = lex_all(r#"{"a":1}"#, 64);
        let offsets: Vec<u64> = lexemes.iter().map(|l| l.offset).collect();
        assert_eq!(offsets, vec![0, 1, 4, 5, 6]);
    }

    #[test]
    fn boundary_independence_for_buf_size() {
        let doc = r#"{"docs":[{"n":null,"b":false,"i":0,"d":0.5}]}"#;
        let baseline = lex_all(doc, 4096);
        for buf_size in 1..=doc.len() + 1 {
            let lexemes = lex_all(doc, buf_size);
            assert_eq!(lexemes, baseline, "mismatch at buf_size={buf_size}");
        }
    }

    #[test]
    fn keyword_straddling_refill_boundary_is_recognized() {
        // "false" is 5 bytes; force a refill right in the middle of it.
        let lexemes = lex_all("false", 2);
        assert_eq!(lexemes.len(), 1);
        assert_eq!(lexemes[0].text, "false");
    }

    #[test]
    fn truncated_string_is_incomplete() {
        let mut lexer = Lexer::new(Cursor::new(b"\"abc".to_vec()), 64, false);
        let err = lexer.next_lexeme().unwrap_err();
        assert!(err.is_incomplete());
    }

    #[test]
    fn truncated_escape_is_incomplete() {
        let mut lexer = Lexer::new(Cursor::new(b"\"abc\\".to_vec()), 64, false);
        let err = lexer.next_lexeme().unwrap_err();
        assert!(err.is_incomplete());
    }

    #[test]
    fn empty_input_is_clean_eof() {
        let mut lexer = Lexer::new(Cursor::new(Vec::new()), 64, false);
        assert_eq!(lexer.next_lexeme().unwrap(), None);
    }

    #[test]
    fn multibyte_utf8_straddling_refill_is_not_corrupted() {
        // 'с' (U+0441) is 2 bytes in UTF-8; force the refill boundary to
        // fall inside it by using a 1-byte buffer.
        let doc = "\"с\"";
        let lexemes = lex_all(doc, 1);
        assert_eq!(lexemes.len(), 1);
        assert_eq!(lexemes[0].text, doc);
    }

    #[test]
    fn comments_are_skipped_when_allowed() {
        let mut lexer = Lexer::new(
            Cursor::new(b"// leading\n1 /* mid */ 2".to_vec()),
            64,
            true,
        );
        let mut texts = Vec::new();
        while let Some(l) = lexer.next_lexeme().unwrap() {
            texts.push(l.text);
        }
        assert_eq!(texts, vec!["1", "2"]);
    }

    #[test]
    fn unterminated_block_comment_is_incomplete() {
        let mut lexer = Lexer::new(Cursor::new(b"/* never closes".to_vec()), 64, true);
        let err = lexer.next_lexeme().unwrap_err();
        assert!(err.is_incomplete());
    }
}
