//! The grammar state machine (spec.md §4.4, C4).
//!
//! Grounded on the teacher's `ParseState`/`LexState` split and its
//! `FrameStack`/`Frame` stack-of-open-containers, adapted from a
//! chunk-fed lexer to a single-pass scanner over the whole (already
//! in-memory) input, per this crate's bounded, non-chunked scope. The
//! array-vs-object disambiguation follows the "suspended first-token
//! decision" design note verbatim: after `(`, one literal token is scanned
//! generically, the following structural character decides the composite
//! kind, and the already-scanned token is replayed as a buffered event on
//! the following call to [`Parser::next`].

use alloc::string::String;

use crate::{
    JsonUrlOptions, ParseLimits,
    char_iter::CharIterator,
    decode::decode_one,
    error::{LimitKind, ParseError, SyntaxError},
    event::{CompositeKind, Event},
    number::{NumberText, parse_number_str, scan_number},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Want {
    /// Expect an object key.
    Key,
    /// Expect a value: array element, object value, or the root value.
    Value,
    /// Just read a key; expect `:` (or `=` under top-level WFU).
    KeySep,
    /// Just read a value; expect `,`/`&` or the composite's close.
    Sep,
    /// A `StartObject` was just returned; `pending_key` holds the already-
    /// scanned first key, to be emitted as its own event now.
    EmitPendingKey,
    /// A `StartArray` was just returned; `pending_value` holds the
    /// already-scanned and classified first element, to be emitted as its
    /// own event now.
    EmitPendingValue,
}

#[derive(Debug)]
struct Frame {
    kind: CompositeKind,
    /// Whether this frame is the single outermost composite of the whole
    /// parse, in which case WFU's `&`/`=` separators apply (spec.md §4.4)
    /// and, if also `implied`, no bracket exists to close.
    top_level: bool,
    implied: bool,
}

/// What the classifier decided about a scanned literal token, deferred
/// across a `next()` call boundary when it was the first token of a
/// composite whose `Start*` event had to be returned first.
#[derive(Debug, Clone)]
enum Classified {
    Str(String),
    Num(NumberText),
    True,
    False,
    Null,
    EmptyLiteral,
}

/// A single-threaded, non-suspending pull iterator over JSON→URL text.
///
/// Construct with [`Parser::new`]; call [`Parser::next`] until it returns
/// [`Event::EndStream`]. After an error, further calls are unspecified —
/// callers should stop.
///
/// Unlike the sketch in the external-interfaces overview, `Parser` carries
/// no lifetime tied to `text`: [`crate::char_iter::CharIterator`] copies the
/// input into an owned buffer up front (this crate has no chunked-input
/// mode to make zero-copy scanning worthwhile), so the only borrow in this
/// crate's public API is [`Event`]'s borrow of `&mut Parser` itself.
#[derive(Debug)]
pub struct Parser {
    chars: CharIterator,
    options: JsonUrlOptions,
    limits: ParseLimits,
    stack: alloc::vec::Vec<Frame>,
    want: Want,
    started: bool,
    done: bool,
    value_count: usize,
    current_string: String,
    current_number: Option<NumberText>,
    pending_key: Option<String>,
    pending_value: Option<Classified>,
}

impl Parser {
    #[must_use]
    pub fn new(text: &str, options: JsonUrlOptions, limits: ParseLimits) -> Self {
        Self {
            chars: CharIterator::new(text, limits),
            options,
            limits,
            stack: alloc::vec::Vec::new(),
            want: Want::Value,
            started: false,
            done: false,
            value_count: 0,
            current_string: String::new(),
            current_number: None,
            pending_key: None,
            pending_value: None,
        }
    }

    /// Selects implied-composite mode: the outermost `(` `)` is treated as
    /// absent, and the stream begins already inside an array or object of
    /// the given kind. Must be called before the first [`Parser::next`].
    pub fn set_implied(&mut self, kind: CompositeKind) {
        debug_assert!(!self.started, "set_implied called after parsing began");
        self.stack.push(Frame {
            kind,
            top_level: true,
            implied: true,
        });
        self.want = match kind {
            CompositeKind::Array => Want::Value,
            CompositeKind::Object => Want::Key,
        };
    }

    /// The current character offset, line, and column — used to annotate
    /// positionless errors raised above the parser (e.g. a missing-value
    /// provider that declines to supply a default).
    #[must_use]
    pub(crate) fn position(&self) -> (usize, usize, usize) {
        self.chars.position()
    }

    fn wfu_here(&self, top_level: bool) -> bool {
        top_level && self.options.wfu_composite
    }

    fn bump_value_count(&mut self) -> Result<(), ParseError> {
        self.value_count += 1;
        if self.value_count > self.limits.max_parse_values {
            return Err(self.chars.limit_error(LimitKind::MaxParseValues));
        }
        Ok(())
    }

    fn push_frame(&mut self, kind: CompositeKind, top_level: bool) -> Result<(), ParseError> {
        if self.stack.len() >= self.limits.max_parse_depth {
            return Err(self.chars.limit_error(LimitKind::MaxParseDepth));
        }
        self.stack.push(Frame {
            kind,
            top_level,
            implied: false,
        });
        Ok(())
    }

    /// Called once a scalar value or a composite (possibly empty) has been
    /// fully produced for whatever role it was filling. Decides what the
    /// parser should do next: finish the whole parse, or await a separator
    /// for the (now current) enclosing frame. Finishing the parse requires
    /// the input to be fully consumed (spec.md §8 scenario 9: `()a` is a
    /// syntax error at the leftover `a`, not a silently ignored suffix).
    fn complete_value(&mut self) -> Result<(), ParseError> {
        if self.stack.is_empty() {
            if self.chars.peek().is_some() {
                return Err(self.syntax(SyntaxError::ExtraText));
            }
            self.done = true;
        } else {
            self.want = Want::Sep;
        }
        Ok(())
    }

    fn syntax(&self, source: SyntaxError) -> ParseError {
        let (position, line, column) = self.chars.position();
        ParseError::Syntax {
            source,
            position,
            line,
            column,
        }
    }

    /// Advances the grammar by exactly one event.
    pub fn next(&mut self) -> Result<Event<'_>, ParseError> {
        loop {
            if self.done {
                return Ok(Event::EndStream);
            }
            self.started = true;
            if let Some(event) = self.step()? {
                // `StartArray`/`StartObject` open a composite value but
                // don't themselves count toward maxParseValues; the count
                // is charged to the values the composite goes on to hold
                // (spec.md §8 scenario 8: `(true,false,false)` with
                // maxValues=2 errors at the third value, not at the open
                // paren).
                if !matches!(event, Event::StartArray | Event::StartObject) {
                    self.bump_value_count()?;
                }
                return Ok(event);
            }
        }
    }

    /// Runs one micro-step of the automaton. Returns `Some(event)` if this
    /// step produced an event (the call to `next` should return it);
    /// `None` means a purely structural transition occurred (a separator
    /// was consumed) and the loop in `next` should continue.
    fn step(&mut self) -> Result<Option<Event<'_>>, ParseError> {
        match self.want {
            Want::Key => self.scan_key(),
            Want::Value => self.scan_value(),
            Want::KeySep => self.scan_key_sep(),
            Want::Sep => self.scan_sep(),
            Want::EmitPendingKey => self.emit_pending_key(),
            Want::EmitPendingValue => self.emit_pending_value(),
        }
    }

    fn emit_pending_key(&mut self) -> Result<Option<Event<'_>>, ParseError> {
        let key = self
            .pending_key
            .take()
            .expect("EmitPendingKey set only alongside a populated pending_key");
        self.current_string = key;
        self.want = Want::Value;
        Ok(Some(Event::KeyName(&self.current_string)))
    }

    fn emit_pending_value(&mut self) -> Result<Option<Event<'_>>, ParseError> {
        let classified = self
            .pending_value
            .take()
            .expect("EmitPendingValue set only alongside a populated pending_value");
        let event = self.store_classified(classified);
        self.complete_value()?;
        Ok(Some(event))
    }

    fn scan_key(&mut self) -> Result<Option<Event<'_>>, ParseError> {
        let top_level = self.stack.last().is_some_and(|f| f.top_level);
        if matches!(self.chars.peek(), Some(')')) {
            return Err(self.syntax(SyntaxError::ExpectedLiteral));
        }
        let raw = scan_token(&mut self.chars, self.options, top_level)?;
        let key = classify_key(raw, self.options, &self.chars)?;
        self.current_string = key;
        self.want = Want::KeySep;
        Ok(Some(Event::KeyName(&self.current_string)))
    }

    fn scan_key_sep(&mut self) -> Result<Option<Event<'_>>, ParseError> {
        let frame = self
            .stack
            .last()
            .expect("KeySep only reached with an object frame open");
        let top_level = frame.top_level;
        let implied = frame.implied;
        let wfu = self.wfu_here(top_level);

        match self.chars.peek() {
            Some(':') => {
                self.chars.advance()?;
                self.want = Want::Value;
                Ok(None)
            }
            Some('=') if wfu => {
                self.chars.advance()?;
                self.want = Want::Value;
                Ok(None)
            }
            Some('&') if wfu => {
                self.chars.advance()?;
                self.want = Want::Key;
                Ok(Some(Event::ValueMissing))
            }
            None if wfu && implied => {
                self.want = Want::Sep;
                Ok(Some(Event::ValueMissing))
            }
            _ => Err(self.syntax(SyntaxError::ExpectedStructuralChar)),
        }
    }

    fn scan_sep(&mut self) -> Result<Option<Event<'_>>, ParseError> {
        let frame_kind;
        let top_level;
        let implied;
        {
            let frame = self.stack.last().expect("Sep only reached with a frame open");
            frame_kind = frame.kind;
            top_level = frame.top_level;
            implied = frame.implied;
        }
        let wfu = self.wfu_here(top_level);

        match self.chars.peek() {
            Some(',') => {
                self.chars.advance()?;
                self.want = match frame_kind {
                    CompositeKind::Array => Want::Value,
                    CompositeKind::Object => Want::Key,
                };
                Ok(None)
            }
            Some('&') if wfu => {
                self.chars.advance()?;
                self.want = match frame_kind {
                    CompositeKind::Array => Want::Value,
                    CompositeKind::Object => Want::Key,
                };
                Ok(None)
            }
            Some(')') if !implied => {
                self.chars.advance()?;
                self.stack.pop();
                self.complete_value()?;
                Ok(Some(match frame_kind {
                    CompositeKind::Array => Event::EndArray,
                    CompositeKind::Object => Event::EndObject,
                }))
            }
            Some(')') => Err(self.syntax(SyntaxError::UnexpectedCharacter(')'))),
            None if implied => {
                // The implied frame is always the outermost (and, by
                // construction, only) frame of its kind, so popping it here
                // always empties the stack; `complete_value` marks the
                // parse done and `next`'s loop returns `EndStream` on its
                // next iteration without calling `step` again.
                self.stack.pop();
                self.complete_value()?;
                Ok(None)
            }
            None => Err(self.syntax(SyntaxError::UnexpectedEndOfComposite)),
            _ => Err(self.syntax(SyntaxError::ExpectedStructuralChar)),
        }
    }

    fn scan_value(&mut self) -> Result<Option<Event<'_>>, ParseError> {
        match self.chars.peek() {
            Some('(') => self.open_composite(self.stack.is_empty()),
            Some(')') => {
                let source = if self.stack.last().is_some_and(|f| f.kind == CompositeKind::Object)
                {
                    SyntaxError::ExpectedObjectValue
                } else {
                    SyntaxError::ExpectedLiteral
                };
                Err(self.syntax(source))
            }
            _ => {
                let top_level = self.stack.last().is_some_and(|f| f.top_level);
                let raw = scan_token(&mut self.chars, self.options, top_level)?;
                let classified = classify_value(raw, self.options, &self.chars)?;
                let event = self.store_classified(classified);
                self.complete_value()?;
                Ok(Some(event))
            }
        }
    }

    fn store_classified(&mut self, classified: Classified) -> Event<'_> {
        match classified {
            Classified::Str(s) => {
                self.current_string = s;
                Event::ValueString(&self.current_string)
            }
            Classified::Num(n) => {
                self.current_number = Some(n);
                Event::ValueNumber(self.current_number.as_ref().unwrap())
            }
            Classified::True => Event::ValueTrue,
            Classified::False => Event::ValueFalse,
            Classified::Null => Event::ValueNull,
            Classified::EmptyLiteral => Event::ValueEmptyLiteral,
        }
    }

    /// Consumes an already-peeked `(` and decides, via the spec's
    /// "suspended first-token decision", whether it opens an array or an
    /// object.
    fn open_composite(&mut self, new_top_level: bool) -> Result<Option<Event<'_>>, ParseError> {
        self.chars.advance()?; // consume '('

        match self.chars.peek() {
            None => Err(self.syntax(SyntaxError::UnexpectedEndOfComposite)),
            Some(')') => {
                self.chars.advance()?;
                self.complete_value()?;
                Ok(Some(Event::ValueEmptyComposite(CompositeKind::Array)))
            }
            Some(':') if self.chars.peek2() == Some(')') => {
                self.chars.advance()?;
                self.chars.advance()?;
                self.complete_value()?;
                Ok(Some(Event::ValueEmptyComposite(CompositeKind::Object)))
            }
            Some('(') => {
                self.push_frame(CompositeKind::Array, new_top_level)?;
                self.want = Want::Value;
                Ok(Some(Event::StartArray))
            }
            _ => {
                let raw = scan_token(&mut self.chars, self.options, new_top_level)?;
                let is_object = matches!(self.chars.peek(), Some(':'))
                    || (new_top_level
                        && self.options.wfu_composite
                        && self.chars.peek() == Some('='));

                if is_object {
                    self.chars.advance()?; // consume ':' / '='
                    self.push_frame(CompositeKind::Object, new_top_level)?;
                    let key = classify_key(raw, self.options, &self.chars)?;
                    self.pending_key = Some(key);
                    self.want = Want::EmitPendingKey;
                    Ok(Some(Event::StartObject))
                } else {
                    self.push_frame(CompositeKind::Array, new_top_level)?;
                    let classified = classify_value(raw, self.options, &self.chars)?;
                    self.pending_value = Some(classified);
                    self.want = Want::EmitPendingValue;
                    Ok(Some(Event::StartArray))
                }
            }
        }
    }
}

/// An unclassified token, lexically scanned but not yet interpreted as a
/// key or a value.
enum RawLiteral {
    /// A `'...'` quoted token (non-AQF). Never reclassified.
    Quoted(String),
    /// A bareword (or, under AQF, the single literal token form), with the
    /// raw consumed-unit count used to tell a genuinely empty token apart
    /// from one whose escapes resolved to nothing.
    Bare {
        decoded: String,
        raw_units: usize,
        /// Whether any unit was produced via a `!`-escape rather than a raw
        /// or percent-encoded character. An escaped bareword is never
        /// reclassified as a number/`true`/`false`/`null` (spec.md §8
        /// scenario 10: `1e!+2` stays `ValueString "1e+2"` under AQF even
        /// though its decoded text matches the number grammar) — Open
        /// Question (c).
        escaped: bool,
    },
}

pub(crate) fn is_structural(c: char, wfu_active: bool) -> bool {
    matches!(c, '(' | ')' | ',' | ':') || (wfu_active && matches!(c, '&' | '='))
}

fn scan_quoted(chars: &mut CharIterator) -> Result<String, ParseError> {
    chars.advance()?; // consume opening '\''
    let mut out = String::new();
    loop {
        match chars.peek() {
            None => {
                let (position, line, column) = chars.position();
                return Err(ParseError::Syntax {
                    source: SyntaxError::UnterminatedString,
                    position,
                    line,
                    column,
                });
            }
            Some('\'') => {
                chars.advance()?;
                break;
            }
            Some(_) => decode_one(chars, &mut out)?,
        }
    }
    Ok(out)
}

fn scan_bare(
    chars: &mut CharIterator,
    options: JsonUrlOptions,
    top_level: bool,
) -> Result<RawLiteral, ParseError> {
    let wfu_active = top_level && options.wfu_composite;
    let mut decoded = String::new();
    let mut raw_units = 0usize;
    let mut escaped = false;

    loop {
        match chars.peek() {
            None => break,
            Some('!') if options.aqf => {
                let bang_pos = chars.position();
                chars.advance()?; // consume '!'
                match chars.peek() {
                    Some('e') => {
                        chars.advance()?;
                    }
                    Some('t' | 'f' | 'n') => {
                        return Err(ParseError::Syntax {
                            source: SyntaxError::ReservedLiteral,
                            position: bang_pos.0,
                            line: bang_pos.1,
                            column: bang_pos.2,
                        });
                    }
                    Some(c) => {
                        chars.advance()?;
                        decoded.push(c);
                    }
                    None => {
                        return Err(ParseError::Syntax {
                            source: SyntaxError::UnexpectedEndOfInput,
                            position: bang_pos.0,
                            line: bang_pos.1,
                            column: bang_pos.2,
                        });
                    }
                }
                raw_units += 1;
                escaped = true;
            }
            Some(c) if is_structural(c, wfu_active) => break,
            Some(_) => {
                decode_one(chars, &mut decoded)?;
                raw_units += 1;
            }
        }
    }

    Ok(RawLiteral::Bare {
        decoded,
        raw_units,
        escaped,
    })
}

fn scan_token(
    chars: &mut CharIterator,
    options: JsonUrlOptions,
    top_level: bool,
) -> Result<RawLiteral, ParseError> {
    if !options.aqf && chars.peek() == Some('\'') {
        Ok(RawLiteral::Quoted(scan_quoted(chars)?))
    } else {
        scan_bare(chars, options, top_level)
    }
}

fn classify_key(
    raw: RawLiteral,
    options: JsonUrlOptions,
    chars: &CharIterator,
) -> Result<String, ParseError> {
    match raw {
        RawLiteral::Quoted(s) => Ok(s),
        RawLiteral::Bare {
            decoded, raw_units, ..
        } => {
            if raw_units == 0 && !options.empty_unquoted_key {
                let (position, line, column) = chars.position();
                return Err(ParseError::Syntax {
                    source: SyntaxError::EmptyNotAllowed,
                    position,
                    line,
                    column,
                });
            }
            Ok(decoded)
        }
    }
}

fn classify_value(
    raw: RawLiteral,
    options: JsonUrlOptions,
    chars: &CharIterator,
) -> Result<Classified, ParseError> {
    match raw {
        RawLiteral::Quoted(s) => {
            if s.is_empty() {
                Ok(Classified::EmptyLiteral)
            } else {
                Ok(Classified::Str(s))
            }
        }
        RawLiteral::Bare {
            decoded,
            raw_units,
            escaped,
        } => {
            if raw_units == 0 {
                if !options.empty_unquoted_value {
                    let (position, line, column) = chars.position();
                    return Err(ParseError::Syntax {
                        source: SyntaxError::EmptyNotAllowed,
                        position,
                        line,
                        column,
                    });
                }
                return Ok(Classified::EmptyLiteral);
            }
            if decoded.is_empty() {
                // All raw units resolved to nothing (e.g. AQF `!e`).
                return Ok(Classified::EmptyLiteral);
            }
            if options.implied_string_literals || escaped {
                return Ok(Classified::Str(decoded));
            }
            match decoded.as_str() {
                "true" => Ok(Classified::True),
                "false" => Ok(Classified::False),
                "null" => Ok(Classified::Null),
                _ => match parse_number_str(&decoded) {
                    Some(n) => Ok(Classified::Num(n)),
                    None => Ok(Classified::Str(decoded)),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsonUrlOptions, ParseLimits, error::LimitKind};

    fn events(text: &str, options: JsonUrlOptions) -> alloc::vec::Vec<alloc::string::String> {
        let mut parser = Parser::new(text, options, ParseLimits::default());
        let mut out = alloc::vec::Vec::new();
        loop {
            match parser.next().unwrap() {
                Event::EndStream => {
                    out.push(alloc::string::String::from("EndStream"));
                    break;
                }
                other => out.push(alloc::format!("{other:?}")),
            }
        }
        out
    }

    #[test]
    fn scenario_1_flat_array() {
        let out = events("(hello,World!)", JsonUrlOptions::default());
        assert_eq!(
            out,
            alloc::vec![
                "StartArray",
                "ValueString(\"hello\")",
                "ValueString(\"World!\")",
                "EndArray",
                "EndStream",
            ]
        );
    }

    #[test]
    fn scenario_2_nested_objects() {
        let out = events("(a:(b:(c:d)))", JsonUrlOptions::default());
        assert_eq!(
            out,
            alloc::vec![
                "StartObject",
                "KeyName(\"a\")",
                "StartObject",
                "KeyName(\"b\")",
                "StartObject",
                "KeyName(\"c\")",
                "ValueString(\"d\")",
                "EndObject",
                "EndObject",
                "EndObject",
                "EndStream",
            ]
        );
    }

    #[test]
    fn scenario_3_percent_decoded_value() {
        let out = events("(a:hello%C2%A2world)", JsonUrlOptions::default());
        assert_eq!(
            out,
            alloc::vec![
                "StartObject",
                "KeyName(\"a\")",
                "ValueString(\"hello¢world\")",
                "EndObject",
                "EndStream",
            ]
        );
    }

    #[test]
    fn scenario_4_wfu_implied_object() {
        let mut options = JsonUrlOptions::default();
        options.wfu_composite = true;
        let mut parser = Parser::new("a=b&c=d", options, ParseLimits::default());
        parser.set_implied(CompositeKind::Object);
        let mut out = alloc::vec::Vec::new();
        loop {
            match parser.next().unwrap() {
                Event::EndStream => break,
                other => out.push(alloc::format!("{other:?}")),
            }
        }
        assert_eq!(
            out,
            alloc::vec![
                "KeyName(\"a\")",
                "ValueString(\"b\")",
                "KeyName(\"c\")",
                "ValueString(\"d\")",
            ]
        );
    }

    #[test]
    fn scenario_5_wfu_missing_value() {
        let mut options = JsonUrlOptions::default();
        options.wfu_composite = true;
        let mut parser = Parser::new("a=b&c", options, ParseLimits::default());
        parser.set_implied(CompositeKind::Object);
        let mut out = alloc::vec::Vec::new();
        loop {
            match parser.next().unwrap() {
                Event::EndStream => break,
                other => out.push(alloc::format!("{other:?}")),
            }
        }
        assert_eq!(
            out,
            alloc::vec![
                "KeyName(\"a\")",
                "ValueString(\"b\")",
                "KeyName(\"c\")",
                "ValueMissing",
            ]
        );
    }

    #[test]
    fn scenario_6_number_literal() {
        let mut parser = Parser::new("1e+2", JsonUrlOptions::default(), ParseLimits::default());
        match parser.next().unwrap() {
            Event::ValueNumber(n) => assert_eq!(n.as_str(), "1e+2"),
            other => panic!("expected ValueNumber, got {other:?}"),
        }
        assert_eq!(parser.next().unwrap(), Event::EndStream);
    }

    #[test]
    fn scenario_7_aqf_empty_literal() {
        let mut options = JsonUrlOptions::default();
        options.aqf = true;
        let out = events("!e", options);
        assert_eq!(out, alloc::vec!["ValueEmptyLiteral", "EndStream"]);
    }

    #[test]
    fn scenario_8_value_limit_exceeded_at_third_value() {
        let limits = ParseLimits::builder().max_parse_values(2).build();
        let mut parser = Parser::new("(true,false,false)", JsonUrlOptions::default(), limits);
        assert!(matches!(parser.next().unwrap(), Event::StartArray));
        assert!(matches!(parser.next().unwrap(), Event::ValueTrue));
        assert!(matches!(parser.next().unwrap(), Event::ValueFalse));
        let err = parser.next().unwrap_err();
        assert!(matches!(
            err,
            ParseError::Limit {
                kind: LimitKind::MaxParseValues,
                ..
            }
        ));
    }

    #[test]
    fn scenario_9_extra_text_after_value_is_an_error() {
        let mut parser = Parser::new("()a", JsonUrlOptions::default(), ParseLimits::default());
        let err = parser.next().unwrap_err();
        match err {
            ParseError::Syntax {
                source: SyntaxError::ExtraText,
                position,
                ..
            } => assert_eq!(position, 2),
            other => panic!("expected ExtraText at position 2, got {other:?}"),
        }
    }

    #[test]
    fn scenario_10_aqf_escape_suppresses_number_reclassification() {
        let mut options = JsonUrlOptions::default();
        options.aqf = true;
        let mut parser = Parser::new("1e!+2", options, ParseLimits::default());
        match parser.next().unwrap() {
            Event::ValueString(s) => assert_eq!(s, "1e+2"),
            other => panic!("expected ValueString \"1e+2\", got {other:?}"),
        }
        assert_eq!(parser.next().unwrap(), Event::EndStream);
    }

    #[test]
    fn aqf_reserved_escape_is_a_syntax_error() {
        let mut options = JsonUrlOptions::default();
        options.aqf = true;
        let mut parser = Parser::new("!t", options, ParseLimits::default());
        let err = parser.next().unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax {
                source: SyntaxError::ReservedLiteral,
                ..
            }
        ));
    }

    #[test]
    fn trailing_comma_errors_at_closing_paren() {
        let mut parser = Parser::new("(a,)", JsonUrlOptions::default(), ParseLimits::default());
        assert!(matches!(parser.next().unwrap(), Event::StartArray));
        assert!(matches!(parser.next().unwrap(), Event::ValueString(_)));
        let err = parser.next().unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax {
                source: SyntaxError::ExpectedLiteral,
                ..
            }
        ));
    }
}
