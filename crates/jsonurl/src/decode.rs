//! On-the-fly decoding of `%HH` percent escapes and the `+`→space rule.
//!
//! Percent-encoded bytes are accumulated across consecutive `%HH` triplets
//! and validated as a unit with [`core::str::from_utf8`], which already
//! rejects overlong encodings, surrogate code points, and code points above
//! U+10FFFF — the three checks spec.md §4.2 calls for by name. This mirrors
//! the accumulate-then-decode-then-reset shape of the teacher's
//! `UnicodeEscapeBuffer` (`escape_buffer.rs`), adapted from "four hex
//! digits → one `char`" to "N `%HH` triplets → a validated run of `char`s".

use alloc::{string::String, vec::Vec};

use crate::{
    char_iter::CharIterator,
    error::{ParseError, SyntaxError},
};

fn hex_digit(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| d as u8)
}

/// Consumes one contiguous run of `%HH` triplets starting at the current
/// position (the caller has already confirmed `chars.peek() == Some('%')`),
/// decodes the accumulated bytes as UTF-8, and appends the resulting
/// characters to `out`.
fn decode_percent_run(chars: &mut CharIterator, out: &mut String) -> Result<(), ParseError> {
    let mut bytes: Vec<u8> = Vec::new();
    while chars.peek() == Some('%') {
        let err_pos = chars.position();
        chars.advance()?; // consume '%'
        let hi = chars.peek().and_then(hex_digit).ok_or_else(|| {
            syntax_error(SyntaxError::InvalidPercentEncoding, err_pos)
        })?;
        chars.advance()?;
        let lo = chars.peek().and_then(hex_digit).ok_or_else(|| {
            syntax_error(SyntaxError::InvalidPercentEncoding, err_pos)
        })?;
        chars.advance()?;
        bytes.push((hi << 4) | lo);
    }
    let pos = chars.position();
    let decoded = core::str::from_utf8(&bytes)
        .map_err(|_| syntax_error(SyntaxError::InvalidUtf8, pos))?;
    out.push_str(decoded);
    Ok(())
}

fn syntax_error(source: SyntaxError, (position, line, column): (usize, usize, usize)) -> ParseError {
    ParseError::Syntax {
        source,
        position,
        line,
        column,
    }
}

/// Decodes exactly one lexical unit of literal content at the current
/// position — a `+` (→ space), a `%HH` run, or a single already-valid
/// character — and appends it to `out`. The caller is responsible for
/// deciding, from the *raw*, undecoded character, whether the current
/// position should instead be treated as the end of the token; this
/// function must only be called once that decision has been made, so that
/// decoded reserved characters are never reclassified as structure
/// (spec.md §4.2).
pub(crate) fn decode_one(chars: &mut CharIterator, out: &mut String) -> Result<(), ParseError> {
    match chars.peek() {
        Some('+') => {
            chars.advance()?;
            out.push(' ');
        }
        Some('%') => decode_percent_run(chars, out)?,
        Some(c) => {
            chars.advance()?;
            out.push(c);
        }
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseLimits;

    fn decode_all(text: &str) -> Result<String, ParseError> {
        let mut chars = CharIterator::new(text, ParseLimits::default());
        let mut out = String::new();
        while chars.peek().is_some() {
            decode_one(&mut chars, &mut out)?;
        }
        Ok(out)
    }

    #[test]
    fn plus_decodes_to_space() {
        assert_eq!(decode_all("a+b").unwrap(), "a b");
    }

    #[test]
    fn percent_decodes_multibyte_utf8() {
        // U+00A2 CENT SIGN is 0xC2 0xA2 in UTF-8.
        assert_eq!(decode_all("hello%C2%A2world").unwrap(), "hello\u{A2}world");
    }

    #[test]
    fn rejects_overlong_encoding() {
        // 0xC0 0x80 is an overlong encoding of NUL.
        assert!(decode_all("%C0%80").is_err());
    }

    #[test]
    fn rejects_surrogate_encoding() {
        // 0xED 0xA0 0x80 encodes U+D800, a lone high surrogate.
        assert!(decode_all("%ED%A0%80").is_err());
    }

    #[test]
    fn rejects_truncated_percent_escape() {
        assert!(decode_all("%4").is_err());
        assert!(decode_all("%").is_err());
    }

    #[test]
    fn passthrough_unreserved() {
        assert_eq!(decode_all("Abc-._~123").unwrap(), "Abc-._~123");
    }
}
