//! The forward structural-unit scanner.
//!
//! [`forward_unit`] advances a byte-offset cursor past the next syntactically
//! meaningful unit of keyword-block source: a balanced quote/bracket group, a
//! keyword-delimited block, a statement-terminator line, a pragma line, or a
//! bare word. No syntax tree is built; each step computes an end offset
//! directly from the text.
//!
//! Recognition is driven by an ordered table of (recognizer, handler) rules
//! evaluated top to bottom - the first recognizer that matches the text at
//! the cursor decides the step. The order is load-bearing: a comma must win
//! over the word rule so argument lists step element by element, a method
//! header must win over the generic keyword rules, and so on.
//!
//! | # | shape at the cursor               | lands                                  |
//! |---|-----------------------------------|----------------------------------------|
//! | 1 | `,` + horizontal whitespace       | past the separator                     |
//! | 2 | `"` `{` `[` `(`                   | past the matching closer               |
//! | 3 | line-anchored method header       | past the first `_endmethod`            |
//! | 4 | just after `_endmethod`           | past the next `_endmethod`             |
//! | 5 | a `$` line                        | past the next `$` line                 |
//! | 6 | `_pragma(…)` line                 | past the line                          |
//! | 7 | identifier + `(`                  | past the call's closing paren          |
//! | 8 | `_proc` `_for` `_loop` `_if`      | past the first registered closer       |
//! | 9 | `_elif` / `_else`                 | at the next `_elif`/`_else`/`_endif`   |
//! | 10| just after `_then`                | at the next `_elif`/`_else`/`_endif`   |
//! | 11| word constituent                  | past the word                          |
//! | 12| anything else                     | nowhere ([`ScanStep::NoUnit`])         |
//!
//! Keyword closers are resolved by **first textual occurrence** - there is no
//! nesting counter, so a same-kind block nested inside another satisfies the
//! outer search at the inner closer. Editor behavior built on this scanner
//! relies on that, and the tests pin it down.
//!
//! The scanner never mutates anything: it takes `(&str, usize)` and returns a
//! new offset for the caller to commit (or discard).
//!
//! ```
//! use blockwise_syntax::scanner::forward_unit;
//!
//! let text = "_if a _then b _endif";
//! assert_eq!(forward_unit(text, 0, 1).unwrap(), text.len());
//!
//! // Three words, three units.
//! assert_eq!(forward_unit("alpha beta gamma", 0, 3).unwrap(), 16);
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::balanced::{Group, match_balanced};
use crate::error::ScanError;
use crate::keywords;

/// Outcome of a single scan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    /// The cursor moved past one structural unit; here is the new offset.
    Advanced(usize),
    /// No rule recognized a unit at the cursor. The cursor does not move;
    /// the caller decides whether that ends the walk or is an error.
    NoUnit,
}

macro_rules! pattern {
    ($name:ident, $re:literal) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($re).expect(concat!("invalid pattern ", $re)))
        }
    };
}

pattern!(whitespace, r"^\s+");
pattern!(separator, r"^,[ \t]*");
pattern!(method_header, r"^(?:(?:_abstract|_private|_iter)\s+)?_method\b");
pattern!(method_closer, r"(?m)^(?:\$\r?\n)?_endmethod\b");
pattern!(before_endmethod, r"\b_endmethod\z");
pattern!(statement_line, r"^\$(?:\r?\n|\z)");
pattern!(statement_search, r"(?m)^\$(?:\r?\n|\z)");
pattern!(pragma_line, r"^_pragma\([^)\r\n]*\)[ \t]*(?:\r?\n|\z)");
pattern!(call_head, r"^[A-Za-z][A-Za-z0-9_!?]*\(");
pattern!(block_opener, r"^(?:_proc|_for|_loop|_if)\b");
pattern!(endproc_search, r"\b_endproc\b");
pattern!(endloop_search, r"\b_endloop\b");
pattern!(endif_search, r"\b_endif\b");
pattern!(continuation_head, r"^(?:_elif|_else)\b");
pattern!(continuation_search, r"\b(?:_elif|_else|_endif)\b");
pattern!(before_then, r"\b_then\z");
pattern!(word, r"^[A-Za-z0-9_!?]+");

/// Search regex and error label for a registered block closer.
fn closer_boundary(closer: &str) -> (&'static Regex, &'static str) {
    match closer {
        "_endproc" => (endproc_search(), "`_endproc`"),
        "_endloop" => (endloop_search(), "`_endloop`"),
        "_endmethod" => (method_closer(), "`_endmethod`"),
        _ => (endif_search(), "`_endif`"),
    }
}

/// One step's view of the text.
///
/// `origin` is the cursor as supplied; `at` is the position the lookahead
/// rules inspect, after leading whitespace. The two lookbehind rules (just
/// after `_endmethod`, just after `_then`) test the text ending at `origin`,
/// exactly - a cursor that has drifted away from the keyword no longer
/// counts as "immediately after" it.
struct Scan<'a> {
    text: &'a str,
    origin: usize,
    at: usize,
}

impl<'a> Scan<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.at..]
    }

    fn before_origin(&self) -> &'a str {
        &self.text[..self.origin]
    }

    fn at_line_start(&self) -> bool {
        self.at == 0 || self.text.as_bytes()[self.at - 1] == b'\n'
    }
}

/// An entry in the dispatch table: a recognizer predicate and the handler
/// that computes the landing offset once the recognizer has matched.
struct Rule {
    #[allow(dead_code)]
    name: &'static str,
    recognize: fn(&Scan<'_>) -> bool,
    advance: fn(&Scan<'_>) -> Result<ScanStep, ScanError>,
}

/// The dispatch table. Order encodes precedence; first match wins.
const RULES: &[Rule] = &[
    Rule {
        name: "list separator",
        recognize: at_separator,
        advance: past_separator,
    },
    Rule {
        name: "balanced group",
        recognize: at_group,
        advance: past_group,
    },
    Rule {
        name: "method header",
        recognize: at_method_header,
        advance: past_method_block,
    },
    Rule {
        name: "method boundary",
        recognize: after_method_closer,
        advance: past_next_method_closer,
    },
    Rule {
        name: "statement terminator",
        recognize: at_statement_line,
        advance: past_next_statement,
    },
    Rule {
        name: "pragma line",
        recognize: at_pragma_line,
        advance: past_pragma_line,
    },
    Rule {
        name: "call",
        recognize: at_call,
        advance: past_call_group,
    },
    Rule {
        name: "block keyword",
        recognize: at_block_opener,
        advance: past_block,
    },
    Rule {
        name: "continuation keyword",
        recognize: at_continuation,
        advance: past_continuation,
    },
    Rule {
        name: "after _then",
        recognize: after_then,
        advance: toward_next_continuation,
    },
    Rule {
        name: "word",
        recognize: at_word,
        advance: past_word,
    },
];

fn at_separator(s: &Scan<'_>) -> bool {
    separator().is_match(s.rest())
}

fn past_separator(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    Ok(match separator().find(s.rest()) {
        Some(m) => ScanStep::Advanced(s.at + m.end()),
        None => ScanStep::NoUnit,
    })
}

fn at_group(s: &Scan<'_>) -> bool {
    s.rest().chars().next().and_then(Group::classify).is_some()
}

fn past_group(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    match_balanced(s.text, s.at).map(ScanStep::Advanced)
}

fn at_method_header(s: &Scan<'_>) -> bool {
    s.at_line_start() && method_header().is_match(s.rest())
}

fn past_method_block(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    let Some(header) = method_header().find(s.rest()) else {
        return Ok(ScanStep::NoUnit);
    };
    let from = s.at + header.end();
    match method_closer().find(&s.text[from..]) {
        Some(m) => Ok(ScanStep::Advanced(from + m.end())),
        None => Err(ScanError::BoundaryNotFound {
            expected: "`_endmethod`",
            from,
        }),
    }
}

fn after_method_closer(s: &Scan<'_>) -> bool {
    before_endmethod().is_match(s.before_origin())
}

fn past_next_method_closer(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    match method_closer().find(&s.text[s.origin..]) {
        Some(m) => Ok(ScanStep::Advanced(s.origin + m.end())),
        None => Err(ScanError::BoundaryNotFound {
            expected: "`_endmethod`",
            from: s.origin,
        }),
    }
}

fn at_statement_line(s: &Scan<'_>) -> bool {
    s.at_line_start() && statement_line().is_match(s.rest())
}

fn past_next_statement(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    let Some(here) = statement_line().find(s.rest()) else {
        return Ok(ScanStep::NoUnit);
    };
    // Skip the terminator line the cursor sits on, then run to the next one.
    let from = s.at + here.end();
    match statement_search().find(&s.text[from..]) {
        Some(m) => Ok(ScanStep::Advanced(from + m.end())),
        None => Err(ScanError::BoundaryNotFound {
            expected: "`$` terminator line",
            from,
        }),
    }
}

fn at_pragma_line(s: &Scan<'_>) -> bool {
    s.at_line_start() && pragma_line().is_match(s.rest())
}

fn past_pragma_line(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    Ok(match pragma_line().find(s.rest()) {
        Some(m) => ScanStep::Advanced(s.at + m.end()),
        None => ScanStep::NoUnit,
    })
}

fn at_call(s: &Scan<'_>) -> bool {
    call_head().is_match(s.rest())
}

fn past_call_group(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    let Some(m) = call_head().find(s.rest()) else {
        return Ok(ScanStep::NoUnit);
    };
    // The match ends on the `(`; hand the argument group to the balanced
    // matcher and land past its closer.
    let open = s.at + m.end() - 1;
    match_balanced(s.text, open).map(ScanStep::Advanced)
}

fn at_block_opener(s: &Scan<'_>) -> bool {
    block_opener().is_match(s.rest())
}

fn past_block(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    let Some(m) = block_opener().find(s.rest()) else {
        return Ok(ScanStep::NoUnit);
    };
    let Some(closer) = keywords::closer_for(m.as_str()) else {
        return Ok(ScanStep::NoUnit);
    };
    // First textual occurrence of the closer; nested same-kind blocks are
    // not counted, so an inner closer ends the search.
    let (search, label) = closer_boundary(closer);
    let from = s.at + m.end();
    match search.find(&s.text[from..]) {
        Some(c) => Ok(ScanStep::Advanced(from + c.end())),
        None => Err(ScanError::BoundaryNotFound {
            expected: label,
            from,
        }),
    }
}

fn at_continuation(s: &Scan<'_>) -> bool {
    continuation_head().is_match(s.rest())
}

fn past_continuation(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    let Some(m) = continuation_head().find(s.rest()) else {
        return Ok(ScanStep::NoUnit);
    };
    seek_continuation(s, s.at + m.end())
}

fn after_then(s: &Scan<'_>) -> bool {
    before_then().is_match(s.before_origin())
}

fn toward_next_continuation(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    seek_continuation(s, s.origin)
}

/// Lands at the *start* of the next `_elif`/`_else`/`_endif` after `from`,
/// not past it: the next step then dispatches on that keyword itself.
fn seek_continuation(s: &Scan<'_>, from: usize) -> Result<ScanStep, ScanError> {
    match continuation_search().find(&s.text[from..]) {
        Some(c) => Ok(ScanStep::Advanced(from + c.start())),
        None => Err(ScanError::BoundaryNotFound {
            expected: "`_elif`, `_else` or `_endif`",
            from,
        }),
    }
}

fn at_word(s: &Scan<'_>) -> bool {
    word().is_match(s.rest())
}

fn past_word(s: &Scan<'_>) -> Result<ScanStep, ScanError> {
    Ok(match word().find(s.rest()) {
        Some(m) => ScanStep::Advanced(s.at + m.end()),
        None => ScanStep::NoUnit,
    })
}

/// Performs one scan step from `cursor`.
///
/// Leading whitespace is skipped before the lookahead rules run; if no rule
/// then recognizes a unit, the step reports [`ScanStep::NoUnit`] and the
/// cursor is considered unmoved (the whitespace skip included).
pub fn scan_step(text: &str, cursor: usize) -> Result<ScanStep, ScanError> {
    let mut origin = cursor.min(text.len());
    // Snap forward to a character boundary; structural tokens are ASCII.
    while origin < text.len() && !text.is_char_boundary(origin) {
        origin += 1;
    }

    let mut at = origin;
    if let Some(ws) = whitespace().find(&text[at..]) {
        at += ws.end();
    }

    let scan = Scan { text, origin, at };
    for rule in RULES {
        if (rule.recognize)(&scan) {
            return (rule.advance)(&scan);
        }
    }
    Ok(ScanStep::NoUnit)
}

/// Advances `cursor` past `repeat` consecutive structural units.
///
/// The cursor never moves backward and never exceeds `text.len()`. A step
/// that recognizes nothing ends the walk early with the offset reached so
/// far; a step whose forward search finds no terminator fails with
/// [`ScanError::BoundaryNotFound`], and movement made by earlier steps is
/// not rolled back. A `repeat` of zero is a no-op.
pub fn forward_unit(text: &str, cursor: usize, repeat: usize) -> Result<usize, ScanError> {
    let mut at = cursor;
    for _ in 0..repeat {
        match scan_step(text, at)? {
            ScanStep::Advanced(next) => at = next,
            ScanStep::NoUnit => break,
        }
    }
    Ok(at)
}
