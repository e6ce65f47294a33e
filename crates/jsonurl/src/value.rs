//! A default, owned in-memory tree (`Value`) and its [`crate::factory::ValueFactory`]
//! implementation.
//!
//! Grounded on the teacher's `StdFactory`/`Value` pairing in `factory.rs` and
//! `value.rs`: a plain recursive enum plus a factory that boxes children into
//! `Vec`/`BTreeMap`-shaped builders. Callers who want a different in-memory
//! representation (e.g. an existing object-model library) implement
//! [`crate::factory::ValueFactory`] directly instead of using this type.

use alloc::{string::String, vec::Vec};

use crate::{
    event::CompositeKind,
    factory::ValueFactory,
    number::{BigMathPolicy, NumberText, NumberValue},
};

/// An owned JSON→URL value tree.
///
/// Mirrors spec.md §9's variant list (`Null, Bool, Number, String, Array,
/// Object, EmptyComposite`), plus the sentinels this crate's parser can also
/// emit (`EmptyLiteral`, `Missing`) so that `StdFactory` never needs to
/// collapse a distinct event into a lossy approximation of another.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    Null,
    Bool(bool),
    Number(NumberValue),
    String(String),
    Array(Vec<Value>),
    /// An object preserves insertion order (spec.md makes no ordering
    /// guarantee, but an order-preserving default is least surprising for
    /// round-tripping).
    Object(Vec<(String, Value)>),
    /// `()` (or `(:)`) with no declared kind recoverable from the text
    /// alone in the array case — kept as its own variant rather than
    /// collapsed into `Array(vec![])`, since an empty *object* also parses
    /// to this event and the two are textually ambiguous without a
    /// `NO_EMPTY_COMPOSITE` marker.
    EmptyComposite(CompositeKind),
    /// A bare empty token used as a value (`!e` under AQF, `''` otherwise).
    EmptyLiteral,
}

/// The default [`ValueFactory`], producing an owned [`Value`] tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFactory;

impl ValueFactory for StdFactory {
    type Any = Value;
    type ArrayBuilder = Vec<Value>;
    type ObjectBuilder = Vec<(String, Value)>;

    fn new_array_builder(&self) -> Self::ArrayBuilder {
        Vec::new()
    }

    fn new_object_builder(&self) -> Self::ObjectBuilder {
        Vec::new()
    }

    fn add(&self, builder: &mut Self::ArrayBuilder, value: Self::Any) {
        builder.push(value);
    }

    fn put(&self, builder: &mut Self::ObjectBuilder, key: String, value: Self::Any) {
        builder.push((key, value));
    }

    fn finalize_array(&self, builder: Self::ArrayBuilder) -> Self::Any {
        Value::Array(builder)
    }

    fn finalize_object(&self, builder: Self::ObjectBuilder) -> Self::Any {
        Value::Object(builder)
    }

    fn value_true(&self) -> Self::Any {
        Value::Bool(true)
    }

    fn value_false(&self) -> Self::Any {
        Value::Bool(false)
    }

    fn value_null(&self) -> Self::Any {
        Value::Null
    }

    fn value_empty_composite(&self, kind: CompositeKind) -> Self::Any {
        Value::EmptyComposite(kind)
    }

    fn value_empty_literal(&self) -> Self::Any {
        Value::EmptyLiteral
    }

    fn value_string(&self, s: &str) -> Self::Any {
        Value::String(String::from(s))
    }

    fn value_number(&self, n: &NumberText) -> Self::Any {
        Value::Number(
            n.classify(BigMathPolicy::default())
                .expect("default policy's overflow is BigDecimal, which never errors"),
        )
    }
}
