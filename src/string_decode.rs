// this_file: src/string_decode.rs

//! Decodes JSON string escapes.

/// Decodes the escapes in `text`, which must be the *body* of a string
/// lexeme (quotes already stripped).
///
/// Fast path: a string with no backslash is returned unchanged (borrowed,
/// no allocation beyond the final owned copy the caller needs). Escapes
/// `\b \f \n \r \t \" \\ \/` map to their usual characters; `\uXXXX` maps to
/// the code point `XXXX`, combining a high/low UTF-16 surrogate pair
/// (`\uD8xx\uDCyy`) into a single code point. Any other `\c` passes `c`
/// through literally rather than failing — this decoder is lenient by
/// design, matching the reference parser's behavior.
pub fn decode(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('u') => {
                let high = match read_hex4(&mut chars) {
                    Some(v) => v,
                    None => continue,
                };
                if (0xD800..=0xDBFF).contains(&high) {
                    // Possible high surrogate: try to combine with a
                    // following \uDCxx low surrogate.
                    let mut lookahead = chars.clone();
                    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
                        if let Some(low) = read_hex4(&mut lookahead) {
                            if (0xDC00..=0xDFFF).contains(&low) {
                                chars = lookahead;
                                let combined = 0x10000
                                    + ((high - 0xD800) << 10)
                                    + (low - 0xDC00);
                                push_code_point(&mut out, combined);
                                continue;
                            }
                        }
                    }
                    push_code_point(&mut out, high);
                } else {
                    push_code_point(&mut out, high);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

fn read_hex4(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u32> {
    let mut value: u32 = 0;
    for _ in 0..4 {
        let digit = chars.next()?.to_digit(16)?;
        value = value * 16 + digit;
    }
    Some(value)
}

fn push_code_point(out: &mut String, code_point: u32) {
    match char::from_u32(code_point) {
        Some(c) => out.push(c),
        None => out.push(char::REPLACEMENT_CHARACTER),
    }
}
