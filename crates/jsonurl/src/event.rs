//! Parser events (spec.md §4.9, C9).

use crate::number::NumberText;

/// Which kind of composite a `Start`/`End` event pair brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Array,
    Object,
}

/// One unit of parse progress, returned from [`crate::Parser::next`].
///
/// Borrows from the parser's internal buffers: a `ValueString` or
/// `KeyName`'s payload is only valid until the next call to `next`. This is
/// the idiomatic-Rust rendition of spec.md §4.9's "payload valid until the
/// next call" lifecycle note — rather than a getter method whose return
/// value happens to be documented as short-lived, the borrow checker makes
/// that contract a compile error to violate.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    StartArray,
    EndArray,
    StartObject,
    EndObject,
    /// An object key. Always immediately followed by the key's value.
    KeyName(&'a str),
    ValueString(&'a str),
    ValueNumber(&'a NumberText),
    ValueTrue,
    ValueFalse,
    ValueNull,
    /// A bare zero-length token used as a value (only possible when
    /// `empty_unquoted_value` is set).
    ValueEmptyLiteral,
    /// `()` or `(:)` — a composite with no elements.
    ValueEmptyComposite(CompositeKind),
    /// An omitted value inside a wire-separator composite, e.g. the
    /// missing middle entry in `a&&b` under `wfu_composite`.
    ValueMissing,
    /// The input was fully consumed and produced exactly one top-level
    /// value. No further calls to `next` are valid after this.
    EndStream,
}

impl Event<'_> {
    /// `true` for `StartArray`/`StartObject`.
    #[must_use]
    pub fn is_start(&self) -> bool {
        matches!(self, Self::StartArray | Self::StartObject)
    }

    /// `true` for `EndArray`/`EndObject`.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::EndArray | Self::EndObject)
    }
}
