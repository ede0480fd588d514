//! The keyword-pair table: which closing keyword terminates which opener.
//!
//! This table is deliberately public. Editor features beyond the scanner
//! (indentation, code folding, "jump to matching block") look up an opener's
//! closer here instead of re-deriving it from scanner internals.

/// The block construct a keyword pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `_method … _endmethod`, including modifier-prefixed headers.
    Method,
    /// `_proc … _endproc`.
    Proc,
    /// `_for … _endloop` and `_loop … _endloop`.
    Loop,
    /// `_if … _endif`.
    Conditional,
}

/// One opener/closer pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordPair {
    pub opener: &'static str,
    pub closer: &'static str,
    pub kind: BlockKind,
}

/// Ordered opener → closer table.
///
/// `_for` and `_loop` share a closer: a `_for` header always runs into the
/// `_loop` that carries the body, and both are terminated by `_endloop`.
pub const KEYWORD_PAIRS: &[KeywordPair] = &[
    KeywordPair {
        opener: "_method",
        closer: "_endmethod",
        kind: BlockKind::Method,
    },
    KeywordPair {
        opener: "_proc",
        closer: "_endproc",
        kind: BlockKind::Proc,
    },
    KeywordPair {
        opener: "_for",
        closer: "_endloop",
        kind: BlockKind::Loop,
    },
    KeywordPair {
        opener: "_loop",
        closer: "_endloop",
        kind: BlockKind::Loop,
    },
    KeywordPair {
        opener: "_if",
        closer: "_endif",
        kind: BlockKind::Conditional,
    },
];

/// Modifiers that may prefix a `_method` header.
pub const METHOD_MODIFIERS: &[&str] = &["_abstract", "_private", "_iter"];

/// Mid-block keywords that neither open nor close a unit.
///
/// Scanning from (or from just after) one of these resumes toward the next
/// continuation or the terminal `_endif`.
pub const CONTINUATIONS: &[&str] = &["_elif", "_else", "_then"];

/// Looks up the closing keyword for `opener`.
pub fn closer_for(opener: &str) -> Option<&'static str> {
    KEYWORD_PAIRS
        .iter()
        .find(|p| p.opener == opener)
        .map(|p| p.closer)
}

/// All openers terminated by `closer`.
pub fn openers_of(closer: &str) -> Vec<&'static str> {
    KEYWORD_PAIRS
        .iter()
        .filter(|p| p.closer == closer)
        .map(|p| p.opener)
        .collect()
}

pub fn is_opener(word: &str) -> bool {
    KEYWORD_PAIRS.iter().any(|p| p.opener == word)
}

pub fn is_closer(word: &str) -> bool {
    KEYWORD_PAIRS.iter().any(|p| p.closer == word)
}

pub fn is_continuation(word: &str) -> bool {
    CONTINUATIONS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_opener_has_a_closer() {
        for pair in KEYWORD_PAIRS {
            assert_eq!(closer_for(pair.opener), Some(pair.closer));
        }
    }

    #[test]
    fn for_and_loop_share_endloop() {
        assert_eq!(closer_for("_for"), Some("_endloop"));
        assert_eq!(closer_for("_loop"), Some("_endloop"));
        assert_eq!(openers_of("_endloop"), vec!["_for", "_loop"]);
    }

    #[test]
    fn continuations_are_not_openers() {
        for word in CONTINUATIONS {
            assert!(is_continuation(word));
            assert!(!is_opener(word));
            assert!(!is_closer(word));
        }
    }

    #[test]
    fn unknown_words_resolve_to_nothing() {
        assert_eq!(closer_for("_endmethod"), None);
        assert_eq!(closer_for("foo"), None);
        assert!(openers_of("_endwhile").is_empty());
    }
}
