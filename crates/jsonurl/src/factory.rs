//! The value-factory trait and the event-replay driver that binds a
//! [`crate::Parser`]'s event stream to a caller-supplied factory (spec.md
//! §4.6, C6).
//!
//! Grounded on the teacher's `JsonFactory` trait (`factory.rs`) and
//! `event_stack.rs`'s replay-events-into-factory loop, adapted from
//! path-component bookkeeping to the plain two-stack design spec.md §4.6
//! describes directly: a key stack and a builder stack, each frame tagged
//! array or object. The teacher's `NonNull`-pointer zipper
//! (`value_zipper.rs`) has no counterpart here — see `DESIGN.md`.

use alloc::{string::String, vec::Vec};

use crate::{
    JsonUrlOptions, ParseLimits, Parser,
    error::{ParseError, SyntaxError},
    event::{CompositeKind, Event},
};

/// A caller-implemented bridge from parse events to an in-memory value tree.
///
/// `Any` is the factory's single value type; `ArrayBuilder`/`ObjectBuilder`
/// are mutable accumulators that exist only while a composite is open.
pub trait ValueFactory {
    type Any;
    type ArrayBuilder;
    type ObjectBuilder;

    fn new_array_builder(&self) -> Self::ArrayBuilder;
    fn new_object_builder(&self) -> Self::ObjectBuilder;

    fn add(&self, builder: &mut Self::ArrayBuilder, value: Self::Any);
    fn put(&self, builder: &mut Self::ObjectBuilder, key: String, value: Self::Any);

    fn finalize_array(&self, builder: Self::ArrayBuilder) -> Self::Any;
    fn finalize_object(&self, builder: Self::ObjectBuilder) -> Self::Any;

    fn value_true(&self) -> Self::Any;
    fn value_false(&self) -> Self::Any;
    fn value_null(&self) -> Self::Any;
    fn value_empty_composite(&self, kind: CompositeKind) -> Self::Any;
    fn value_empty_literal(&self) -> Self::Any;
    fn value_string(&self, s: &str) -> Self::Any;
    fn value_number(&self, n: &crate::number::NumberText) -> Self::Any;
}

enum Frame<F: ValueFactory + ?Sized> {
    Array(F::ArrayBuilder),
    Object(F::ObjectBuilder),
}

/// Pushes a completed value onto whatever sits atop the builder stack, or
/// returns it to the caller if the stack is empty (the value is the whole
/// result).
fn emit_value<F: ValueFactory + ?Sized>(
    factory: &F,
    builders: &mut Vec<Frame<F>>,
    current_key: &mut Option<String>,
    value: F::Any,
) -> Option<F::Any> {
    match builders.last_mut() {
        Some(Frame::Array(b)) => {
            factory.add(b, value);
            None
        }
        Some(Frame::Object(b)) => {
            // `KeyName` always immediately precedes its value event
            // (spec.md §4.9), so `current_key` is always populated here.
            let key = current_key.take().unwrap_or_default();
            factory.put(b, key, value);
            None
        }
        None => Some(value),
    }
}

fn finish_composite<F: ValueFactory + ?Sized>(
    factory: &F,
    builders: &mut Vec<Frame<F>>,
    current_key: &mut Option<String>,
    expected: CompositeKind,
) -> Option<F::Any> {
    let frame = builders.pop().expect("balanced start/end events");
    let finished = match (expected, frame) {
        (CompositeKind::Array, Frame::Array(b)) => factory.finalize_array(b),
        (CompositeKind::Object, Frame::Object(b)) => factory.finalize_object(b),
        _ => unreachable!("parser emits matching Start/End composite kinds"),
    };
    emit_value(factory, builders, current_key, finished)
}

/// Drives `parser` to completion, replaying its event stream into `factory`.
///
/// `implied` seeds the builder stack with an outer composite the parser
/// itself never brackets with `Start`/`End` events (spec.md §4.4, "implied
/// composites"). `missing` is consulted for `ValueMissing` events (WFU
/// objects only); its default behavior is a syntax error naming the pending
/// key.
fn drive<F: ValueFactory>(
    parser: &mut Parser,
    factory: &F,
    implied: Option<CompositeKind>,
    missing: &dyn Fn(&str) -> Option<F::Any>,
) -> Result<F::Any, ParseError> {
    let mut builders: Vec<Frame<F>> = Vec::new();
    let mut current_key: Option<String> = None;
    let mut result: Option<F::Any> = None;

    match implied {
        Some(CompositeKind::Array) => builders.push(Frame::Array(factory.new_array_builder())),
        Some(CompositeKind::Object) => builders.push(Frame::Object(factory.new_object_builder())),
        None => {}
    }

    loop {
        match parser.next()? {
            Event::StartArray => builders.push(Frame::Array(factory.new_array_builder())),
            Event::StartObject => builders.push(Frame::Object(factory.new_object_builder())),
            Event::EndArray => {
                if let Some(v) =
                    finish_composite(factory, &mut builders, &mut current_key, CompositeKind::Array)
                {
                    result = Some(v);
                }
            }
            Event::EndObject => {
                if let Some(v) = finish_composite(
                    factory,
                    &mut builders,
                    &mut current_key,
                    CompositeKind::Object,
                ) {
                    result = Some(v);
                }
            }
            Event::KeyName(k) => current_key = Some(String::from(k)),
            Event::ValueString(s) => {
                let v = factory.value_string(s);
                if let Some(v) = emit_value(factory, &mut builders, &mut current_key, v) {
                    result = Some(v);
                }
            }
            Event::ValueNumber(n) => {
                let v = factory.value_number(n);
                if let Some(v) = emit_value(factory, &mut builders, &mut current_key, v) {
                    result = Some(v);
                }
            }
            Event::ValueTrue => {
                let v = factory.value_true();
                if let Some(v) = emit_value(factory, &mut builders, &mut current_key, v) {
                    result = Some(v);
                }
            }
            Event::ValueFalse => {
                let v = factory.value_false();
                if let Some(v) = emit_value(factory, &mut builders, &mut current_key, v) {
                    result = Some(v);
                }
            }
            Event::ValueNull => {
                let v = factory.value_null();
                if let Some(v) = emit_value(factory, &mut builders, &mut current_key, v) {
                    result = Some(v);
                }
            }
            Event::ValueEmptyLiteral => {
                let v = factory.value_empty_literal();
                if let Some(v) = emit_value(factory, &mut builders, &mut current_key, v) {
                    result = Some(v);
                }
            }
            Event::ValueEmptyComposite(kind) => {
                let v = factory.value_empty_composite(kind);
                if let Some(v) = emit_value(factory, &mut builders, &mut current_key, v) {
                    result = Some(v);
                }
            }
            Event::ValueMissing => {
                let key = current_key.clone().unwrap_or_default();
                let (position, line, column) = parser.position();
                let v = missing(&key).ok_or(ParseError::Syntax {
                    source: SyntaxError::Custom(key.clone()),
                    position,
                    line,
                    column,
                })?;
                if let Some(v) = emit_value(factory, &mut builders, &mut current_key, v) {
                    result = Some(v);
                }
            }
            Event::EndStream => break,
        }
    }

    if let Some(kind) = implied {
        if let Some(frame) = builders.pop() {
            let finished = match (kind, frame) {
                (CompositeKind::Array, Frame::Array(b)) => factory.finalize_array(b),
                (CompositeKind::Object, Frame::Object(b)) => factory.finalize_object(b),
                _ => unreachable!("implied kind matches its own seeded frame"),
            };
            result = Some(finished);
        }
    }

    result.ok_or_else(|| {
        let (position, line, column) = parser.position();
        ParseError::Syntax {
            source: SyntaxError::ExpectedLiteral,
            position,
            line,
            column,
        }
    })
}

/// Entry points mirroring spec.md §6's `ValueFactoryParser`.
pub struct ValueParser;

impl ValueParser {
    /// Parses `text` as an explicit (non-implied) top-level value.
    pub fn parse<F: ValueFactory>(
        text: &str,
        factory: &F,
        options: JsonUrlOptions,
        limits: ParseLimits,
    ) -> Result<F::Any, ParseError> {
        let mut parser = Parser::new(text, options, limits);
        drive(&mut parser, factory, None, &|_| None)
    }

    /// Parses `text` as the elements of an array, optionally without outer
    /// `(` `)` brackets (`implied == true`).
    pub fn parse_array<F: ValueFactory>(
        text: &str,
        factory: &F,
        options: JsonUrlOptions,
        limits: ParseLimits,
        implied: bool,
    ) -> Result<F::Any, ParseError> {
        let mut parser = Parser::new(text, options, limits);
        if implied {
            parser.set_implied(CompositeKind::Array);
        }
        drive(
            &mut parser,
            factory,
            implied.then_some(CompositeKind::Array),
            &|_| None,
        )
    }

    /// Parses `text` as the members of an object, optionally without outer
    /// `(` `)` brackets. `missing` supplies a default for WFU entries whose
    /// key has no value.
    pub fn parse_object<F: ValueFactory>(
        text: &str,
        factory: &F,
        options: JsonUrlOptions,
        limits: ParseLimits,
        implied: bool,
        missing: &dyn Fn(&str) -> Option<F::Any>,
    ) -> Result<F::Any, ParseError> {
        let mut parser = Parser::new(text, options, limits);
        if implied {
            parser.set_implied(CompositeKind::Object);
        }
        drive(
            &mut parser,
            factory,
            implied.then_some(CompositeKind::Object),
            missing,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{StdFactory, Value};

    #[test]
    fn drives_nested_object_into_value_tree() {
        let v = ValueParser::parse(
            "(a:(b:(c:d)))",
            &StdFactory,
            JsonUrlOptions::default(),
            ParseLimits::default(),
        )
        .unwrap();
        assert_eq!(
            v,
            Value::Object(alloc::vec![(
                "a".into(),
                Value::Object(alloc::vec![(
                    "b".into(),
                    Value::Object(alloc::vec![("c".into(), Value::String("d".into()))])
                )])
            )])
        );
    }

    #[test]
    fn implied_object_with_missing_value() {
        let mut options = JsonUrlOptions::default();
        options.wfu_composite = true;
        let v = ValueParser::parse_object(
            "a=b&c",
            &StdFactory,
            options,
            ParseLimits::default(),
            true,
            &|_key| Some(Value::Null),
        )
        .unwrap();
        assert_eq!(
            v,
            Value::Object(alloc::vec![
                ("a".into(), Value::String("b".into())),
                ("c".into(), Value::Null),
            ])
        );
    }

    #[test]
    fn missing_without_provider_is_an_error() {
        let mut options = JsonUrlOptions::default();
        options.wfu_composite = true;
        let err = ValueParser::parse_object(
            "a=b&c",
            &StdFactory,
            options,
            ParseLimits::default(),
            true,
            &|_key| None,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }
}
