//! Tokenizing keyword-block source.
//!
//! The lexer breaks source text into a flat token stream using the [Logos]
//! lexer generator. Its one hard guarantee is that **every byte of the input
//! appears in exactly one token** - nothing is skipped or discarded - so the
//! stream can always be reassembled into the original text:
//!
//! ```
//! use blockwise_syntax::lexer::lex;
//!
//! let input = "_method demo.run(x)\n";
//! let tokens = lex(input);
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! Tokens are minimal and context-free. The lexer reports that `_loop` is a
//! keyword; whether that keyword opens a block is the business of the
//! [keyword table](crate::keywords) and its consumers (fold computation, the
//! structural navigator UI). Anything the rules below don't claim falls out
//! as a single-character [`TokenKind::Glyph`].
//!
//! [Logos]: https://docs.rs/logos

use logos::Logos;

/// Token kinds produced by the Logos lexer.
///
/// The `#[logos(skip r"")]` attribute means "skip nothing": all input is
/// handled explicitly to preserve the lossless guarantee.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// Line comment, `#` to end of line
    #[regex(r"#[^\r\n]*")]
    Comment,

    /// Double-quoted string literal (single line)
    #[regex(r#""[^"\r\n]*""#)]
    Str,

    /// `$` statement terminator
    #[token("$")]
    Dollar,

    /// `,` list separator
    #[token(",")]
    Comma,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    /// Underscore-prefixed language keyword (`_method`, `_endif`, …)
    #[regex(r"_[a-z]+")]
    Keyword,

    /// Identifier, optionally ending in `?` or `!`
    #[regex(r"[A-Za-z][A-Za-z0-9_]*[!?]?")]
    Word,

    /// Integer or decimal literal
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// Run of characters not claimed by any other rule (`<<`, `.`, `>`, …)
    #[regex(r#"[^ \t\r\n#"$,()\[\]{}_A-Za-z0-9]+"#)]
    Glyph,
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            // Logos error means an unmatched character (e.g. `_` with no
            // keyword body): keep it as a Glyph token.
            Ok(kind) => kind,
            Err(()) => TokenKind::Glyph,
        };
        tokens.push(Token { kind, text });
    }

    tokens
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(kind) => kind,
            Err(()) => TokenKind::Glyph,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}
