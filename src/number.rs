// this_file: src/number.rs

//! Classifies a numeric lexeme as an integer or an arbitrary-precision
//! decimal.

use crate::error::Error;
use crate::value::Number;
use bigdecimal::BigDecimal;
use std::str::FromStr;

/// Parses a numeric lexeme into a [`Number`].
///
/// Integer parsing is attempted first; on failure the text is parsed as an
/// arbitrary-precision decimal. Any other failure is reported as
/// [`Error::Malformed`] at `offset`.
///
/// A leading `+` is rejected even though the lexer's bareword character
/// class accepts it (it is needed for exponents like `1e+2`): JSON numbers
/// permit a sign only as a leading `-`.
pub fn parse_number(text: &str, offset: u64) -> Result<Number, Error> {
    if text.starts_with('+') {
        return Err(Error::malformed("invalid number", text, offset));
    }

    if let Ok(i) = i64::from_str(text) {
        return Ok(Number::Integer(i));
    }

    BigDecimal::from_str(text)
        .map(Number::Decimal)
        .map_err(|_| Error::malformed("invalid number", text, offset))
}
