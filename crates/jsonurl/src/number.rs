//! Number literal scanning, classification, and the big-math overflow
//! policy (spec.md §4.3, §4.10).
//!
//! Grounded on the teacher's `DecimalInteger`/`DecimalPoint`/
//! `DecimalFraction`/`DecimalExponent*` lex states in `parser.rs`, which
//! track a running `String` buffer while scanning a number token. This
//! module keeps that span-tracking shape but — per spec.md Design Notes §9
//! ("avoid parse-then-catch") — never eagerly parses to `f64`; it records
//! digit-count/exponent-kind facts while scanning and classifies
//! deterministically from those facts, parsing exactly once into whichever
//! representation is chosen.

use alloc::string::String;
use core::ops::Range;

use crate::{
    char_iter::CharIterator,
    error::{ParseError, SyntaxError},
};

/// Whether and how an exponent was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExponentKind {
    /// No exponent part.
    None,
    /// `e123` / `E123` — no explicit sign.
    Bare,
    /// `e+123` / `E+123`.
    Positive,
    /// `e-123` / `E-123`.
    Negative,
}

/// An immutable descriptor of a parsed numeric literal, with index spans
/// (byte offsets into `text`) for the integer, fractional, and exponent
/// parts.
///
/// Invariants (spec.md §3): if the fractional span is empty,
/// `has_fractional() == false`; if the exponent span is empty, `exp_kind ==
/// ExponentKind::None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberText {
    text: String,
    negative: bool,
    int_span: Range<usize>,
    frac_span: Range<usize>,
    exp_span: Range<usize>,
    exp_kind: ExponentKind,
}

impl NumberText {
    /// The full literal text, exactly as scanned (no sign normalization).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[must_use]
    pub fn integer_part(&self) -> &str {
        &self.text[self.int_span.clone()]
    }

    #[must_use]
    pub fn fractional_part(&self) -> &str {
        &self.text[self.frac_span.clone()]
    }

    #[must_use]
    pub fn exponent_part(&self) -> &str {
        &self.text[self.exp_span.clone()]
    }

    #[must_use]
    pub fn has_fractional(&self) -> bool {
        !self.frac_span.is_empty()
    }

    #[must_use]
    pub fn exponent_kind(&self) -> ExponentKind {
        self.exp_kind
    }

    /// `isNumber` — always `true` for a successfully scanned `NumberText`;
    /// kept as a named predicate per spec.md §4.3's public predicate list.
    #[must_use]
    pub fn is_number(&self) -> bool {
        true
    }

    /// `isNonFractional` — no fractional part and an exponent that, if
    /// present, does not make the value fractional (i.e. not negative).
    #[must_use]
    pub fn is_non_fractional(&self) -> bool {
        !self.has_fractional() && !matches!(self.exp_kind, ExponentKind::Negative)
    }

    /// `isLong` — would classify as a 64-bit signed integer under the
    /// default boundary (digit count + positive exponent magnitude <= 18,
    /// spec.md §4.3 rule 1).
    #[must_use]
    pub fn is_long(&self) -> bool {
        self.is_non_fractional() && self.long_digit_budget() <= 18
    }

    fn int_digit_count(&self) -> usize {
        let digits = self.integer_part();
        if digits == "0" {
            1
        } else {
            digits.len()
        }
    }

    fn exponent_magnitude(&self) -> usize {
        if matches!(self.exp_kind, ExponentKind::Negative | ExponentKind::None) {
            0
        } else {
            self.exponent_part().parse::<usize>().unwrap_or(usize::MAX)
        }
    }

    fn long_digit_budget(&self) -> usize {
        self.int_digit_count().saturating_add(self.exponent_magnitude())
    }
}

/// Preset magnitude boundaries beyond which a value is promoted to
/// arbitrary precision (spec.md §4.3 rule 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BigMathBoundary {
    Bits32,
    Bits64,
    Bits128,
}

impl BigMathBoundary {
    /// Maximum significant-digit count a `f64`/`i64`-range value may have
    /// before this boundary considers it "big". Compared digit-wise
    /// against the literal's digit count, never by parsing the literal
    /// into a number first (spec.md §4.3: "Boundary values are literal
    /// strings compared digit-wise to avoid premature parsing").
    fn max_digits(self) -> usize {
        match self {
            Self::Bits32 => 9,
            Self::Bits64 => 18,
            Self::Bits128 => 38,
        }
    }
}

/// What happens when a number exceeds its big-math boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    Infinity,
    Double,
    BigDecimal,
    Error,
}

/// Boundary + fallback governing arbitrary-precision promotion.
///
/// The default (`Bits64` + `BigDecimal`) resolves spec.md's Open Question
/// (a): both the integer-overflow path and the floating-point-overflow
/// path promote to `BigDecimal` past 18 significant digits, giving one
/// coherent cross-binding contract instead of leaving `Infinity`
/// unsupported on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigMathPolicy {
    pub boundary: BigMathBoundary,
    pub overflow: OverflowPolicy,
}

impl Default for BigMathPolicy {
    fn default() -> Self {
        Self {
            boundary: BigMathBoundary::Bits64,
            overflow: OverflowPolicy::BigDecimal,
        }
    }
}

/// The classified numeric value of a [`NumberText`].
#[derive(Debug, Clone, PartialEq)]
pub enum NumberValue {
    Long(i64),
    Double(f64),
    /// Arbitrary-precision integer, represented as its exact decimal text
    /// (lossless; no bignum arithmetic is performed by this crate).
    BigInt(String),
    /// Arbitrary-precision decimal, represented as its exact decimal text.
    BigDecimal(String),
    Infinity,
}

impl NumberText {
    /// Builds the integer digit string this literal denotes once a
    /// positive/bare exponent has been applied — i.e. `1e2` becomes `100`,
    /// not left as the raw `"1e2"` text `i64::from_str` would reject.
    /// Only meaningful when `is_non_fractional()` holds.
    fn expanded_integer_digits(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        let mut digits = String::from(sign);
        digits.push_str(self.integer_part());
        for _ in 0..self.exponent_magnitude() {
            digits.push('0');
        }
        digits
    }

    /// Classifies this literal per spec.md §4.3's three rules, using
    /// `policy` to decide arbitrary-precision promotion.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when `policy.overflow` is [`OverflowPolicy::Error`]
    /// and the literal overflows `policy.boundary`.
    pub fn classify(&self, policy: BigMathPolicy) -> Result<NumberValue, SyntaxError> {
        if self.is_non_fractional() {
            if self.long_digit_budget() <= 18 {
                // Safe to parse: digit budget guarantees no i64 overflow.
                if let Ok(v) = self.expanded_integer_digits().parse::<i64>() {
                    return Ok(NumberValue::Long(v));
                }
                // A literal like "007" with no exponent still has a small
                // digit budget but `0`-prefixed multi-digit integers are
                // not valid per the grammar, so this should not happen in
                // practice; fall through to the overflow policy.
            }
            return self.promote(policy);
        }

        if self.int_digit_count() <= policy.boundary.max_digits() {
            if let Ok(v) = self.text.parse::<f64>() {
                return Ok(NumberValue::Double(v));
            }
        }
        self.promote(policy)
    }

    fn promote(&self, policy: BigMathPolicy) -> Result<NumberValue, SyntaxError> {
        match policy.overflow {
            OverflowPolicy::Infinity => Ok(NumberValue::Infinity),
            OverflowPolicy::Double => Ok(NumberValue::Double(
                self.text.parse::<f64>().unwrap_or(f64::INFINITY),
            )),
            OverflowPolicy::BigDecimal if self.has_fractional() || self.exponent_magnitude() > 0 => {
                Ok(NumberValue::BigDecimal(self.text.clone()))
            }
            OverflowPolicy::BigDecimal => Ok(NumberValue::BigInt(self.text.clone())),
            OverflowPolicy::Error => Err(SyntaxError::NumberOverflow),
        }
    }
}

/// Scans a number literal starting at the current position per the ABNF
/// grammar:
///
/// ```abnf
/// number = [ "-" ] int [ frac ] [ exp ]
/// int    = "0" / ( nzd *digit )
/// frac   = "." 1*digit
/// exp    = ("e"/"E") ["+"/"-"] 1*digit
/// ```
///
/// The caller must have already confirmed the token looks like a number
/// (leading `-` or an ASCII digit).
pub(crate) fn scan_number(chars: &mut CharIterator) -> Result<NumberText, ParseError> {
    let mut text = String::new();
    let start_pos = chars.position();

    let negative = if chars.peek() == Some('-') {
        text.push('-');
        chars.advance()?;
        true
    } else {
        false
    };

    let int_start = text.len();
    match chars.peek() {
        Some('0') => {
            text.push('0');
            chars.advance()?;
        }
        Some(c) if c.is_ascii_digit() => {
            while let Some(c) = chars.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    chars.advance()?;
                } else {
                    break;
                }
            }
        }
        _ => return Err(err(SyntaxError::ExpectedLiteral, start_pos)),
    }
    let int_span = int_start..text.len();

    let frac_start = text.len();
    let mut frac_span = frac_start..frac_start;
    if chars.peek() == Some('.') {
        let dot_pos = chars.position();
        text.push('.');
        chars.advance()?;
        let digits_start = text.len();
        while let Some(c) = chars.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                chars.advance()?;
            } else {
                break;
            }
        }
        if text.len() == digits_start {
            return Err(err(SyntaxError::UnexpectedCharacter('.'), dot_pos));
        }
        // frac_span covers the digits only (the '.' is not part of it),
        // matching spec.md's "fractional span" definition.
        frac_span = digits_start..text.len();
    }

    let exp_start = text.len();
    let mut exp_span = exp_start..exp_start;
    let mut exp_kind = ExponentKind::None;
    if matches!(chars.peek(), Some('e' | 'E')) {
        let e_pos = chars.position();
        text.push(chars.peek().unwrap());
        chars.advance()?;
        exp_kind = match chars.peek() {
            Some('+') => {
                text.push('+');
                chars.advance()?;
                ExponentKind::Positive
            }
            Some('-') => {
                text.push('-');
                chars.advance()?;
                ExponentKind::Negative
            }
            _ => ExponentKind::Bare,
        };
        let digits_start = text.len();
        while let Some(c) = chars.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                chars.advance()?;
            } else {
                break;
            }
        }
        if text.len() == digits_start {
            return Err(err(SyntaxError::UnexpectedCharacter('e'), e_pos));
        }
        exp_span = digits_start..text.len();
    }

    Ok(NumberText {
        text,
        negative,
        int_span,
        frac_span,
        exp_span,
        exp_kind,
    })
}

/// Classifies an already-decoded token (a bareword the parser scanned as
/// generic literal text) as a number, per spec.md §4.4's reclassification
/// rule: a bare token is a `ValueNumber` only if its *entire* text matches
/// the number grammar, not merely a leading prefix of it.
pub(crate) fn parse_number_str(s: &str) -> Option<NumberText> {
    let mut chars = CharIterator::new(s, crate::ParseLimits::default());
    let number = scan_number(&mut chars).ok()?;
    if chars.peek().is_some() {
        return None;
    }
    Some(number)
}

fn err(source: SyntaxError, (position, line, column): (usize, usize, usize)) -> ParseError {
    ParseError::Syntax {
        source,
        position,
        line,
        column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseLimits;

    fn scan(text: &str) -> NumberText {
        let mut chars = CharIterator::new(text, ParseLimits::default());
        scan_number(&mut chars).unwrap()
    }

    #[test]
    fn classifies_small_integer_as_long() {
        let n = scan("42");
        assert!(n.is_long());
        assert_eq!(
            n.classify(BigMathPolicy::default()).unwrap(),
            NumberValue::Long(42)
        );
    }

    #[test]
    fn classifies_positive_exponent_integer_as_long() {
        let n = scan("1e+2");
        assert!(n.is_long());
        assert_eq!(
            n.classify(BigMathPolicy::default()).unwrap(),
            NumberValue::Long(100)
        );
    }

    #[test]
    fn classifies_fraction_as_double() {
        let n = scan("3.14");
        assert!(n.has_fractional());
        assert_eq!(
            n.classify(BigMathPolicy::default()).unwrap(),
            NumberValue::Double(3.14)
        );
    }

    #[test]
    fn classifies_negative_exponent_as_double() {
        let n = scan("1e-2");
        assert!(!n.is_non_fractional());
        assert_eq!(
            n.classify(BigMathPolicy::default()).unwrap(),
            NumberValue::Double(0.01)
        );
    }

    #[test]
    fn promotes_long_digit_run_to_bigint() {
        let n = scan("123456789012345678901234567890");
        assert!(!n.is_long());
        assert_eq!(
            n.classify(BigMathPolicy::default()).unwrap(),
            NumberValue::BigInt("123456789012345678901234567890".into())
        );
    }

    #[test]
    fn rejects_bare_dot() {
        let mut chars = CharIterator::new("1.", ParseLimits::default());
        assert!(scan_number(&mut chars).is_err());
    }

    #[test]
    fn rejects_bare_exponent() {
        let mut chars = CharIterator::new("1e", ParseLimits::default());
        assert!(scan_number(&mut chars).is_err());
    }

    #[test]
    fn parse_number_str_rejects_trailing_garbage() {
        assert!(parse_number_str("42").is_some());
        assert!(parse_number_str("42abc").is_none());
    }

    #[test]
    fn negative_numbers() {
        let n = scan("-7");
        assert!(n.is_negative());
        assert_eq!(
            n.classify(BigMathPolicy::default()).unwrap(),
            NumberValue::Long(-7)
        );
    }

    #[test]
    fn error_policy_raises_instead_of_silently_falling_back() {
        let n = scan("123456789012345678901234567890");
        let policy = BigMathPolicy {
            boundary: BigMathBoundary::Bits64,
            overflow: OverflowPolicy::Error,
        };
        assert_eq!(n.classify(policy), Err(SyntaxError::NumberOverflow));
    }
}
