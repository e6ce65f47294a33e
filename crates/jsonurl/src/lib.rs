//! A parser and serializer for the JSON→URL text encoding: a URL-safe
//! textual encoding of the JSON data model using `(`, `)`, `,`, `:` as
//! structural characters, with optional `&`/`=` separators (`WFU_COMPOSITE`)
//! and an alternate `!`-escape dialect (`AQF`) in place of percent-encoding
//! and quoting.
//!
//! ```rust
//! use jsonurl::{JsonUrlOptions, ParseLimits, StdFactory, Value, ValueParser};
//!
//! let value = ValueParser::parse(
//!     "(a:1,b:(x,y))",
//!     &StdFactory,
//!     JsonUrlOptions::default(),
//!     ParseLimits::default(),
//! )
//! .unwrap();
//! assert!(matches!(value, Value::Object(_)));
//! ```
//!
//! The streaming event iterator ([`Parser`]) is available directly for
//! callers who want to drive their own tree builder rather than use
//! [`ValueParser`]/[`StdFactory`]:
//!
//! ```rust
//! use jsonurl::{CompositeKind, Event, JsonUrlOptions, ParseLimits, Parser};
//!
//! let mut parser = Parser::new("(hello,world)", JsonUrlOptions::default(), ParseLimits::default());
//! assert_eq!(parser.next().unwrap(), Event::StartArray);
//! assert_eq!(parser.next().unwrap(), Event::ValueString("hello"));
//! let _ = CompositeKind::Array;
//! ```
#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod builder;
mod char_iter;
mod decode;
mod error;
mod event;
mod factory;
mod number;
mod options;
mod parser;
mod value;

pub use builder::{Accumulator, StringAccumulator, TextBuilder};
pub use error::{LimitKind, ParseError, SerializeError, SyntaxError};
pub use event::{CompositeKind, Event};
pub use factory::{ValueFactory, ValueParser};
pub use number::{BigMathBoundary, BigMathPolicy, ExponentKind, NumberText, NumberValue, OverflowPolicy};
pub use options::{JsonUrlOptions, ParseLimits, ParseLimitsBuilder};
pub use parser::Parser;
pub use value::{StdFactory, Value};

/// Starts parsing `text` as a single top-level value (spec.md §6).
///
/// Equivalent to `Parser::new(text, options, limits)`; provided as a
/// free function matching the external-interfaces sketch.
#[must_use]
pub fn parse(text: &str, options: JsonUrlOptions, limits: ParseLimits) -> Parser {
    Parser::new(text, options, limits)
}
