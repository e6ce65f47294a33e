//! The serializer: accepts primitive writes, composite open/close, and
//! key/value separators, and delegates value writes to type-aware encoding
//! helpers (spec.md §4.7, C7).
//!
//! No teacher analogue (the teacher is parse-only). Grounded on the
//! teacher's general style elsewhere in this crate — explicit per-frame
//! state flags rather than a visitor, one write method per primitive kind —
//! and on `value.rs`'s escaping-helper shape ("write, then report whether
//! anything was written", reused here for `SKIP_NULLS`'s return value).
//! All percent-escaping is the mirror image of [`crate::decode::decode_one`].

use alloc::string::String;

use crate::{
    error::{SerializeError, SyntaxError},
    event::CompositeKind,
    number::{NumberText, parse_number_str},
    options::JsonUrlOptions,
    parser::is_structural,
};

/// An output sink for encoded JSON→URL text.
///
/// A blanket-simple trait so callers can target a `String`, a pre-sized
/// buffer, or a writer adapter without this crate depending on `std::io`.
pub trait Accumulator {
    /// Appends `s` verbatim.
    fn push_str(&mut self, s: &str);
    /// Appends one character verbatim.
    fn push(&mut self, c: char);
}

/// The default [`Accumulator`], appending into an owned [`String`].
#[derive(Debug, Default, Clone)]
pub struct StringAccumulator(pub String);

impl Accumulator for StringAccumulator {
    fn push_str(&mut self, s: &str) {
        self.0.push_str(s);
    }

    fn push(&mut self, c: char) {
        self.0.push(c);
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: CompositeKind,
    top_level: bool,
    /// Whether any key or value has been written into this composite yet —
    /// decides whether the next write needs a leading separator, and
    /// whether `end_*` should fall back to the empty-composite form.
    wrote_any: bool,
}

/// Builds JSON→URL text one primitive/composite operation at a time
/// (spec.md §4.7, §6's `TextBuilder`).
///
/// Tracks, per open composite, whether a separator is needed before the
/// next entry (spec.md's "state-machine invariant": `valueSeparator` is
/// neither required nor forbidden to call explicitly — the convenience
/// `add_*` methods insert it automatically).
#[derive(Debug)]
pub struct TextBuilder<A: Accumulator> {
    out: A,
    options: JsonUrlOptions,
    stack: alloc::vec::Vec<Frame>,
    /// Surrogate-pairing state for [`TextBuilder::add_code_point`].
    pending_high_surrogate: Option<u16>,
}

impl<A: Accumulator> TextBuilder<A> {
    /// Creates a builder writing into `out` under `options`.
    #[must_use]
    pub fn new(out: A, options: JsonUrlOptions) -> Self {
        Self {
            out,
            options,
            stack: alloc::vec::Vec::new(),
            pending_high_surrogate: None,
        }
    }

    /// Consumes the builder, returning the accumulated output.
    #[must_use]
    pub fn build(self) -> A {
        self.out
    }

    fn wfu_here(&self) -> bool {
        self.options.wfu_composite && self.stack.last().is_some_and(|f| f.top_level)
    }

    /// Writes the separator preceding the next key or element of the
    /// current composite, if one is needed, and marks the composite
    /// non-empty. A no-op (and an error) outside any open composite — the
    /// single top-level scalar never needs a separator.
    fn before_entry(&mut self) {
        let wfu = self.wfu_here();
        if let Some(frame) = self.stack.last_mut() {
            if frame.wrote_any {
                self.out.push(if wfu { '&' } else { ',' });
            }
            frame.wrote_any = true;
        }
    }

    /// `valueSeparator` (spec.md §6) — explicit low-level separator write,
    /// for callers who do not use the `add_*` convenience wrappers.
    pub fn value_separator(&mut self) -> Result<(), SerializeError> {
        let wfu = self.wfu_here();
        self.out.push(if wfu { '&' } else { ',' });
        Ok(())
    }

    /// `nameSeparator` (spec.md §6) — the `:`/`=` between a key and its
    /// value.
    pub fn name_separator(&mut self) -> Result<(), SerializeError> {
        let wfu = self.wfu_here();
        self.out.push(if wfu { '=' } else { ':' });
        Ok(())
    }

    /// Opens an array.
    pub fn begin_array(&mut self) -> Result<(), SerializeError> {
        self.before_entry();
        let top_level = self.stack.is_empty();
        self.out.push('(');
        self.stack.push(Frame {
            kind: CompositeKind::Array,
            top_level,
            wrote_any: false,
        });
        Ok(())
    }

    /// Closes the innermost array.
    pub fn end_array(&mut self) -> Result<(), SerializeError> {
        self.end_composite(CompositeKind::Array)
    }

    /// Opens an object.
    pub fn begin_object(&mut self) -> Result<(), SerializeError> {
        self.before_entry();
        let top_level = self.stack.is_empty();
        self.out.push('(');
        self.stack.push(Frame {
            kind: CompositeKind::Object,
            top_level,
            wrote_any: false,
        });
        Ok(())
    }

    /// Closes the innermost object.
    pub fn end_object(&mut self) -> Result<(), SerializeError> {
        self.end_composite(CompositeKind::Object)
    }

    fn end_composite(&mut self, expected: CompositeKind) -> Result<(), SerializeError> {
        let frame = self
            .stack
            .pop()
            .ok_or(SerializeError(SyntaxError::ExpectedStructuralChar))?;
        debug_assert_eq!(frame.kind, expected, "mismatched begin/end composite call");
        if !frame.wrote_any {
            // Empty composite: `()` is ambiguous between array and object
            // and defaults to reading back as an array; `NO_EMPTY_COMPOSITE`
            // forces the unambiguous object spelling.
            if expected == CompositeKind::Object && self.options.no_empty_composite {
                self.out.push_str(":)");
                return Ok(());
            }
        }
        self.out.push(')');
        Ok(())
    }

    /// Writes an object key.
    pub fn add_key(&mut self, key: &str) -> Result<(), SerializeError> {
        self.before_entry();
        self.write_literal(key, true)?;
        self.name_separator()
    }

    /// Writes a string value.
    pub fn add_string(&mut self, s: &str) -> Result<(), SerializeError> {
        self.before_entry();
        self.write_literal(s, false)
    }

    /// Writes a number value.
    pub fn add_number(&mut self, n: &NumberText) -> Result<(), SerializeError> {
        self.before_entry();
        // A scanned `NumberText`'s own text already matches the number
        // grammar exactly, so it never needs quoting/escaping.
        self.out.push_str(n.as_str());
        Ok(())
    }

    /// Writes a boolean value.
    pub fn add_bool(&mut self, b: bool) -> Result<(), SerializeError> {
        self.before_entry();
        self.out.push_str(if b { "true" } else { "false" });
        Ok(())
    }

    /// Writes a null value. Returns `false` (without writing anything) when
    /// `SKIP_NULLS` is set and this null is an array element or object
    /// value — callers use the return value to decide whether a separator
    /// is still owed to a following entry.
    pub fn add_null(&mut self) -> Result<bool, SerializeError> {
        if self.options.skip_nulls && self.stack.last().is_some() {
            return Ok(false);
        }
        self.before_entry();
        if self.options.coerce_null_to_empty_string {
            self.write_literal("", false)?;
        } else {
            self.out.push_str("null");
        }
        Ok(true)
    }

    /// Appends one UTF-16 code unit of an in-progress string's content,
    /// pairing surrogates and percent/`!`-escaping the resulting scalar
    /// value (spec.md §4.7's "code-point writer"). Unlike [`Self::add_string`],
    /// this does not decide quoting/disambiguation for the string as a
    /// whole — it is the low-level primitive `add_string` is built from,
    /// for callers driving a string's content one code unit at a time.
    pub fn add_code_point(&mut self, cp: u32) -> Result<(), SerializeError> {
        if let Some(high) = self.pending_high_surrogate {
            let low = u16::try_from(cp).map_err(|_| SerializeError(SyntaxError::LoneSurrogate))?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(SerializeError(SyntaxError::LoneSurrogate));
            }
            self.pending_high_surrogate = None;
            let combined =
                0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            let c =
                char::from_u32(combined).ok_or(SerializeError(SyntaxError::MalformedUtf16))?;
            self.write_scalar_char(c, false);
            return Ok(());
        }

        if let Ok(unit) = u16::try_from(cp) {
            if (0xD800..=0xDBFF).contains(&unit) {
                self.pending_high_surrogate = Some(unit);
                return Ok(());
            }
            if (0xDC00..=0xDFFF).contains(&unit) {
                return Err(SerializeError(SyntaxError::LoneSurrogate));
            }
        }
        let c = char::from_u32(cp).ok_or(SerializeError(SyntaxError::MalformedUtf16))?;
        self.write_scalar_char(c, false);
        Ok(())
    }

    /// Writes `text` as a single literal token, disambiguating it from a
    /// number/`true`/`false`/`null`/structural-separator reading when
    /// necessary (spec.md §4.7's second and third bullets). `is_key`
    /// selects the key-vs-value empty-token option.
    fn write_literal(&mut self, text: &str, is_key: bool) -> Result<(), SerializeError> {
        if text.is_empty() {
            let allowed = if is_key {
                self.options.empty_unquoted_key
            } else {
                self.options.empty_unquoted_value
            };
            if allowed {
                // Zero characters written.
            } else if self.options.aqf {
                self.out.push_str("!e");
            } else {
                self.out.push_str("''");
            }
            return Ok(());
        }

        let ambiguous = !self.options.implied_string_literals
            && (matches!(text, "true" | "false" | "null")
                || parse_number_str(text).is_some()
                || text.contains(':')
                || text.contains('='));

        if !ambiguous {
            for c in text.chars() {
                self.write_scalar_char(c, false);
            }
            return Ok(());
        }

        if self.options.aqf {
            // A single `!`-escape anywhere in the token is enough: it makes
            // the parser treat the whole bareword as a string unconditionally
            // (see `RawLiteral::Bare`'s `escaped` flag), so disambiguation
            // falls out of normal per-character escaping whenever the text
            // contains a character that already needs one (e.g. `+`). Only
            // force an escape onto the first character when nothing else
            // would have triggered one.
            let wfu = self.wfu_here();
            let mut chars = text.chars();
            if !text.chars().any(|c| needs_aqf_escape(c, wfu)) {
                if let Some(first) = chars.next() {
                    self.out.push('!');
                    self.out.push(first);
                }
            }
            for c in chars {
                self.write_scalar_char(c, false);
            }
        } else {
            self.out.push('\'');
            for c in text.chars() {
                self.write_scalar_char(c, true);
            }
            self.out.push('\'');
        }
        Ok(())
    }

    /// Writes one already-decoded scalar value, percent-encoding (or, under
    /// AQF, `!`-escaping) it if it is not a URI-unreserved character.
    /// `in_quotes` additionally escapes `'` (spec.md §4.2: "a `'` inside
    /// must be percent-encoded").
    fn write_scalar_char(&mut self, c: char, in_quotes: bool) {
        let wfu = self.wfu_here();
        if c == ' ' {
            self.out.push('+');
            return;
        }
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~') {
            self.out.push(c);
            return;
        }
        if in_quotes && c == '\'' {
            self.percent_encode_char(c);
            return;
        }
        if !in_quotes && self.options.aqf && needs_aqf_escape(c, wfu) {
            self.out.push('!');
            self.out.push(c);
            return;
        }
        self.percent_encode_char(c);
    }

    fn percent_encode_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        for byte in c.encode_utf8(&mut buf).as_bytes() {
            self.out.push('%');
            self.out.push(hex_digit(byte >> 4));
            self.out.push(hex_digit(byte & 0x0F));
        }
    }
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16)
        .unwrap_or('0')
        .to_ascii_uppercase()
}

/// Characters that an AQF writer escapes with `!` rather than percent-encoding:
/// the structural grammar characters, plus `+` and `%` themselves, since both
/// have a reserved decode-time meaning (space, percent-run) that a literal
/// occurrence would otherwise be misread as.
fn needs_aqf_escape(c: char, wfu: bool) -> bool {
    is_structural(c, wfu) || matches!(c, '+' | '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(options: JsonUrlOptions) -> TextBuilder<StringAccumulator> {
        TextBuilder::new(StringAccumulator::default(), options)
    }

    #[test]
    fn scenario_a_array_skip_nulls() {
        let mut b = builder(JsonUrlOptions {
            skip_nulls: true,
            ..JsonUrlOptions::default()
        });
        b.begin_array().unwrap();
        b.add_string("hello").unwrap();
        b.add_null().unwrap();
        b.add_string("world").unwrap();
        b.end_array().unwrap();
        assert_eq!(b.build().0, "(hello,world)");
    }

    #[test]
    fn scenario_b_empty_object_no_empty_composite() {
        let mut b = builder(JsonUrlOptions {
            no_empty_composite: true,
            ..JsonUrlOptions::default()
        });
        b.begin_object().unwrap();
        b.end_object().unwrap();
        assert_eq!(b.build().0, "(:)");
    }

    #[test]
    fn scenario_c_implied_string_literals_aqf_ambiguous_number() {
        let mut b = builder(JsonUrlOptions {
            implied_string_literals: true,
            aqf: true,
            ..JsonUrlOptions::default()
        });
        b.add_string("1e+3").unwrap();
        assert_eq!(b.build().0, "1e!+3");
    }

    #[test]
    fn scenario_d_percent_encodes_multibyte() {
        let mut b = builder(JsonUrlOptions::default());
        b.add_string("hello\u{A2}world").unwrap();
        assert_eq!(b.build().0, "hello%C2%A2world");
    }

    #[test]
    fn scenario_e_empty_string_aqf() {
        let mut b = builder(JsonUrlOptions {
            aqf: true,
            ..JsonUrlOptions::default()
        });
        b.add_string("").unwrap();
        assert_eq!(b.build().0, "!e");
    }

    #[test]
    fn quotes_string_that_looks_like_a_number() {
        let mut b = builder(JsonUrlOptions::default());
        b.add_string("42").unwrap();
        assert_eq!(b.build().0, "'42'");
    }

    #[test]
    fn quotes_string_equal_to_reserved_word() {
        let mut b = builder(JsonUrlOptions::default());
        b.add_string("true").unwrap();
        assert_eq!(b.build().0, "'true'");
    }

    #[test]
    fn aqf_ambiguous_number_with_no_natural_escape_forces_first_char_prefix() {
        let mut b = builder(JsonUrlOptions {
            aqf: true,
            ..JsonUrlOptions::default()
        });
        b.add_string("42").unwrap();
        assert_eq!(b.build().0, "!42");
    }

    #[test]
    fn aqf_literal_percent_sign_is_bang_escaped() {
        let mut b = builder(JsonUrlOptions {
            aqf: true,
            ..JsonUrlOptions::default()
        });
        b.add_string("50%").unwrap();
        assert_eq!(b.build().0, "50!%");
    }

    #[test]
    fn nested_object_round_trips_structurally() {
        let mut b = builder(JsonUrlOptions::default());
        b.begin_object().unwrap();
        b.add_key("a").unwrap();
        b.add_number(&parse_number_str("1").unwrap()).unwrap();
        b.end_object().unwrap();
        assert_eq!(b.build().0, "(a:1)");
    }
}
