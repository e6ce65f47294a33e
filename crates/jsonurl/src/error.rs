//! Error types produced by the parser and serializer.

use alloc::string::String;

use thiserror::Error;

/// The kind of resource limit a parse exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// The input exceeded [`crate::ParseLimits::max_parse_chars`].
    MaxParseChars,
    /// Composite nesting exceeded [`crate::ParseLimits::max_parse_depth`].
    MaxParseDepth,
    /// The number of emitted values exceeded
    /// [`crate::ParseLimits::max_parse_values`].
    MaxParseValues,
}

impl core::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::MaxParseChars => "maxParseChars",
            Self::MaxParseDepth => "maxParseDepth",
            Self::MaxParseValues => "maxParseValues",
        };
        f.write_str(s)
    }
}

/// A single-line description of a malformed-input failure, independent of
/// where in the grammar it was detected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unterminated quoted string")]
    UnterminatedString,
    #[error("invalid percent-encoded sequence")]
    InvalidPercentEncoding,
    #[error("invalid UTF-8 byte sequence")]
    InvalidUtf8,
    #[error("empty text is not allowed here")]
    EmptyNotAllowed,
    #[error("extra text after a complete value")]
    ExtraText,
    #[error("expected a literal value")]
    ExpectedLiteral,
    #[error("expected an array")]
    ExpectedArray,
    #[error("expected an object")]
    ExpectedObject,
    #[error("expected a structural character")]
    ExpectedStructuralChar,
    #[error("expected an object value")]
    ExpectedObjectValue,
    #[error("unexpected end of input inside a composite")]
    UnexpectedEndOfComposite,
    #[error("reserved literal used without escape")]
    ReservedLiteral,
    #[error("number magnitude exceeds the configured big-math boundary")]
    NumberOverflow,
    #[error("{0}")]
    Custom(String),

    // Serializer-only variants (spec.md §4.8: "Serialization errors use the
    // same SyntaxError category").
    #[error("value class is not supported by this factory")]
    UnsupportedClass,
    #[error("malformed UTF-16 input")]
    MalformedUtf16,
    #[error("object keys must be strings")]
    NonStringKey,
    #[error("lone surrogate code point")]
    LoneSurrogate,
}

/// An error produced while parsing JSON→URL text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A malformed-input error, annotated with its character position.
    #[error("{source} at character {position} ({line}:{column})")]
    Syntax {
        #[source]
        source: SyntaxError,
        /// Absolute character offset from the start of input.
        position: usize,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        column: usize,
    },
    /// A resource limit was exceeded.
    #[error("limit {kind} exceeded at character {position} ({line}:{column})")]
    Limit {
        kind: LimitKind,
        position: usize,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::Syntax { position, .. } | Self::Limit { position, .. } => *position,
        }
    }
}

/// An error produced while serializing a value to JSON→URL text.
///
/// Reuses [`SyntaxError`] per spec.md §7 ("Serialization errors use the
/// same SyntaxError category").
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SerializeError(#[from] pub SyntaxError);
