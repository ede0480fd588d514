use blockwise_syntax::keywords::{self, BlockKind, KEYWORD_PAIRS};
use blockwise_syntax::lexer::{TokenKind, lex_with_spans};

use crate::editing::Span;

/// A foldable keyword block: opener keyword through end of closer keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldRange {
    pub opener: &'static str,
    pub kind: BlockKind,
    pub span: Span,
}

/// Computes fold ranges for every keyword block in `text`, sorted by start.
///
/// Folding pairs closers with openers through a stack, so nested same-kind
/// blocks produce properly nested ranges - folds must stay well-formed even
/// where cursor navigation settles for the first textual closer. A `_for`
/// header does not open a fold of its own; the fold starts at the `_loop`
/// that carries the body. Unterminated openers produce no range.
pub fn fold_ranges(text: &str) -> Vec<FoldRange> {
    let mut stack: Vec<(&'static str, BlockKind, usize)> = Vec::new();
    let mut folds = Vec::new();

    for (token, span) in lex_with_spans(text) {
        if token.kind != TokenKind::Keyword {
            continue;
        }
        let word = token.text;

        if word != "_for"
            && let Some(pair) = KEYWORD_PAIRS.iter().find(|p| p.opener == word)
        {
            stack.push((pair.opener, pair.kind, span.start));
        } else if keywords::is_closer(word) {
            // Pair with the nearest opener this keyword closes; anything
            // stacked above it was never terminated and is dropped.
            if let Some(pos) = stack
                .iter()
                .rposition(|(opener, _, _)| keywords::closer_for(opener) == Some(word))
            {
                let (opener, kind, start) = stack[pos];
                stack.truncate(pos);
                folds.push(FoldRange {
                    opener,
                    kind,
                    span: Span::new(start, span.end),
                });
            }
        }
    }

    folds.sort_by_key(|f| (f.span.start, f.span.end));
    folds
}
