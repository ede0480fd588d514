use std::sync::OnceLock;

use regex::Regex;

use blockwise_syntax::forward_unit;

/// One method definition found in a source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    /// Dotted method name as written in the header.
    pub name: String,
    /// Byte offset of the header (including any modifier keyword).
    pub offset: usize,
    /// Offset one past `_endmethod`, when the method is terminated.
    pub end: Option<usize>,
}

fn header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?m)^(?:(?:_abstract|_private|_iter)\s+)?_method\s+([A-Za-z0-9_!?]+(?:\.[A-Za-z0-9_!?]+)*)",
        )
        .expect("invalid method header pattern")
    })
}

/// Lists the method definitions in `text`, in source order.
///
/// Extents come from the structural scanner, so an unterminated method is
/// still listed - with no `end` - rather than dropped.
pub fn outline(text: &str) -> Vec<MethodEntry> {
    header()
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).expect("capture 0 always present");
            let name = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            let end = forward_unit(text, whole.start(), 1).ok();
            MethodEntry {
                name,
                offset: whole.start(),
                end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_methods_in_source_order() {
        let text = "\
_method tree.add(node)\n_endmethod\n$\n\n_private _method tree.rebalance()\n_endmethod\n$\n";
        let entries = outline(text);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["tree.add", "tree.rebalance"]);

        let first = &entries[0];
        assert_eq!(first.offset, 0);
        assert_eq!(first.end, Some(text.find("$").unwrap() - 1));
    }

    #[test]
    fn modifier_is_part_of_the_entry_extent() {
        let text = "_iter _method col.elements()\n_endmethod\n";
        let entries = outline(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].offset, 0);
        assert_eq!(entries[0].name, "col.elements");
    }

    #[test]
    fn unterminated_method_is_listed_without_end() {
        let text = "_method broken.one()\n  body\n";
        let entries = outline(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].end, None);
    }

    #[test]
    fn mid_line_method_keyword_is_not_a_header() {
        let text = "x << _method\n";
        assert!(outline(text).is_empty());
    }

    #[test]
    fn empty_text_has_empty_outline() {
        assert!(outline("").is_empty());
    }
}
