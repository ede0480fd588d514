//! # blockwise-syntax
//!
//! Lexing and structural scanning for keyword-block source - the language
//! family where blocks are delimited by paired keywords (`_method` …
//! `_endmethod`, `_if` … `_endif`) rather than braces, statements are closed
//! by a `$` line, and metadata rides on `_pragma(…)` lines.
//!
//! The crate has three moving parts:
//!
//! - [`lexer`] - a lossless [Logos]-based tokenizer. Every byte of the input
//!   lands in exactly one token, so token streams reassemble into the
//!   original text.
//! - [`balanced`] - the balanced-group matcher: given the offset of a quote
//!   or bracket opener, find the offset just past its matching closer.
//! - [`scanner`] - the forward structural-unit scanner, an ordered
//!   first-match-wins rule table that steps a cursor past one syntactic
//!   shape at a time without building a tree. This is the piece editor
//!   navigation commands call.
//!
//! The [`keywords`] table that pairs block openers with their closers is
//! public on purpose: indentation, folding, and "jump to matching block"
//! features consume it directly instead of re-deriving scanner logic.
//!
//! Everything here is pure: functions take `&str` plus byte offsets and
//! return offsets. Nothing is cached between calls and nothing does I/O;
//! committing (or discarding) a returned cursor is entirely the caller's
//! business.
//!
//! ```
//! use blockwise_syntax::{forward_unit, keywords};
//!
//! let text = "_method demo.run(x)\n  x + 1\n_endmethod";
//! assert_eq!(forward_unit(text, 0, 1).unwrap(), text.len());
//!
//! assert_eq!(keywords::closer_for("_if"), Some("_endif"));
//! ```
//!
//! [Logos]: https://docs.rs/logos

pub mod balanced;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod scanner;

pub use balanced::{Group, match_balanced};
pub use error::ScanError;
pub use scanner::{ScanStep, forward_unit, scan_step};
