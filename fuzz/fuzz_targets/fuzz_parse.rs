#![no_main]

use jsonurl::{JsonUrlOptions, ParseError, ParseLimits, Parser};
use libfuzzer_sys::fuzz_target;

/// Builds a dialect combination from the low bits of `flags`, deterministic
/// per input so a crashing case always reproduces from the same bytes.
fn options_from_flags(flags: u8) -> JsonUrlOptions {
    JsonUrlOptions {
        aqf: flags & 1 != 0,
        wfu_composite: flags & 2 != 0,
        implied_string_literals: flags & 4 != 0,
        empty_unquoted_key: flags & 8 != 0,
        empty_unquoted_value: flags & 16 != 0,
        coerce_null_to_empty_string: flags & 32 != 0,
        skip_nulls: flags & 64 != 0,
        no_empty_composite: flags & 128 != 0,
    }
}

fn run(data: &[u8]) {
    if data.is_empty() {
        return;
    }
    let (&flags, rest) = data.split_first().expect("checked non-empty above");
    let Ok(text) = core::str::from_utf8(rest) else {
        return;
    };
    let options = options_from_flags(flags);
    // Limits default is already small enough (65_536 chars, depth 32) to
    // keep a single run fast; the limits themselves are exercised by
    // whatever inputs happen to exceed them, not configured down further.
    let mut parser = Parser::new(text, options, ParseLimits::default());
    loop {
        match parser.next() {
            Ok(jsonurl::Event::EndStream) => break,
            Ok(_) => {}
            // Only the crate's own typed errors may ever escape; anything
            // else (a panic, an index-out-of-bounds) is the bug this target
            // exists to find.
            Err(ParseError::Syntax { .. } | ParseError::Limit { .. }) => break,
        }
    }
}

fuzz_target!(|data: &[u8]| run(data));
