//! Configuration options and resource limits for the JSON→URL parser and
//! serializer.
#![allow(clippy::struct_excessive_bools)]

/// Configuration lattice shared by the parser and the serializer.
///
/// Each field enables one independently-toggleable effect from spec.md §3.
/// Fields that a given side (parse vs. serialize) does not consume are
/// simply left unread on that side; this mirrors spec.md's framing of a
/// single "Option set" rather than two unrelated configuration types.
///
/// # Examples
///
/// ```rust
/// use jsonurl::JsonUrlOptions;
///
/// let options = JsonUrlOptions {
///     aqf: true,
///     skip_nulls: true,
///     ..Default::default()
/// };
/// assert!(options.aqf);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonUrlOptions {
    /// `!`-escape dialect: `!e`/`!t`/`!f`/`!n`/`!(`/`!!` escapes replace
    /// percent-encoding and quoting for structural characters; quotes
    /// become ordinary literal characters.
    ///
    /// # Default
    ///
    /// `false`
    pub aqf: bool,

    /// Inside composites, `&` separates entries and `=` separates key from
    /// value (form-URL-encoded style) in addition to `,` and `:`.
    ///
    /// # Default
    ///
    /// `false`
    pub wfu_composite: bool,

    /// Every bare token is a string; `true`/`false`/`null` and numbers are
    /// not specially recognized.
    ///
    /// # Default
    ///
    /// `false`
    pub implied_string_literals: bool,

    /// Allow a zero-length bare token as an object key.
    ///
    /// # Default
    ///
    /// `false`
    pub empty_unquoted_key: bool,

    /// Allow a zero-length bare token as a value.
    ///
    /// # Default
    ///
    /// `false`
    pub empty_unquoted_value: bool,

    /// On serialization, rewrite `null` to an empty string.
    ///
    /// # Default
    ///
    /// `false`
    pub coerce_null_to_empty_string: bool,

    /// On serialization, omit null-valued array and object entries.
    ///
    /// # Default
    ///
    /// `false`
    pub skip_nulls: bool,

    /// On serialization, write an empty object as `(:)` rather than `()`.
    ///
    /// # Default
    ///
    /// `false`
    pub no_empty_composite: bool,
}

/// Resource caps applied while parsing untrusted input.
///
/// # Examples
///
/// ```rust
/// use jsonurl::ParseLimits;
///
/// let limits = ParseLimits::builder().max_parse_depth(8).build();
/// assert_eq!(limits.max_parse_depth, 8);
/// assert_eq!(limits.max_parse_chars, ParseLimits::default().max_parse_chars);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum number of characters the parser will scan.
    pub max_parse_chars: usize,
    /// Maximum composite nesting depth.
    pub max_parse_depth: usize,
    /// Maximum number of values (scalars and composites) the parser will
    /// emit.
    pub max_parse_values: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_parse_chars: 65_536,
            max_parse_depth: 32,
            max_parse_values: 4_096,
        }
    }
}

impl ParseLimits {
    /// Starts a [`ParseLimitsBuilder`] seeded with the default limits.
    #[must_use]
    pub fn builder() -> ParseLimitsBuilder {
        ParseLimitsBuilder(Self::default())
    }
}

/// Builder for [`ParseLimits`] (spec.md §4.5: "A builder pattern is
/// recommended for limits").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimitsBuilder(ParseLimits);

impl ParseLimitsBuilder {
    #[must_use]
    pub fn max_parse_chars(mut self, value: usize) -> Self {
        self.0.max_parse_chars = value;
        self
    }

    #[must_use]
    pub fn max_parse_depth(mut self, value: usize) -> Self {
        self.0.max_parse_depth = value;
        self
    }

    #[must_use]
    pub fn max_parse_values(mut self, value: usize) -> Self {
        self.0.max_parse_values = value;
        self
    }

    #[must_use]
    pub fn build(self) -> ParseLimits {
        self.0
    }
}
