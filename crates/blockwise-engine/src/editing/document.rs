use std::borrow::Cow;

use regex::Regex;
use xi_rope::delta::Builder;
use xi_rope::{Rope, RopeInfo};

use blockwise_syntax::{ScanError, ScanStep, forward_unit, scan_step};

use crate::editing::Span;

/// An editable source buffer.
///
/// The entire document lives in one `xi_rope::Rope`, edited through Deltas
/// so a save writes the buffer bytes verbatim - the engine never regenerates
/// source from a model. Navigation is value-returning: [`forward_unit`]
/// computes a new cursor offset and leaves committing it to the caller,
/// which keeps undo/redo and error presentation entirely on the editing
/// surface.
///
/// [`forward_unit`]: Document::forward_unit
pub struct Document {
    buffer: Rope,
    /// Incremented on every edit, for change detection by the UI.
    version: u64,
}

impl Document {
    /// Creates a document from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self {
            buffer: Rope::from(text),
            version: 0,
        })
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The current text content.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Content bytes, exact round-trip.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Slices the buffer, clamping the span to document bounds.
    pub fn slice(&self, span: Span) -> Cow<'_, str> {
        let len = self.buffer.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        self.buffer.slice_to_cow(start..end)
    }

    /// Computes the cursor offset `repeat` structural units forward of
    /// `cursor`.
    ///
    /// The buffer is not touched; the caller commits the returned offset if
    /// and when it wants to. A missing block terminator surfaces as
    /// [`ScanError::BoundaryNotFound`] for the UI to report.
    pub fn forward_unit(&self, cursor: usize, repeat: usize) -> Result<usize, ScanError> {
        forward_unit(&self.text(), cursor, repeat)
    }

    /// Single structural step, exposing the "nothing recognized here"
    /// sentinel that [`Document::forward_unit`] folds away.
    pub fn scan_step(&self, cursor: usize) -> Result<ScanStep, ScanError> {
        scan_step(&self.text(), cursor)
    }

    /// Replaces `span` with `replacement` through a rope delta.
    pub fn replace(&mut self, span: Span, replacement: &str) {
        let len = self.buffer.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);

        let mut builder: Builder<RopeInfo> = Builder::new(len);
        builder.replace(start..end, Rope::from(replacement));
        self.buffer = builder.build().apply(&self.buffer);
        self.version += 1;
    }

    /// Replaces every match of `pattern` with `replacement`, returning the
    /// number of substitutions made.
    ///
    /// Matches are collected up front and applied through one delta, so
    /// earlier substitutions cannot shift later match offsets.
    pub fn replace_all(&mut self, pattern: &Regex, replacement: &str) -> usize {
        let text = self.text();
        let matches: Vec<Span> = pattern
            .find_iter(&text)
            .map(|m| Span::new(m.start(), m.end()))
            .collect();
        if matches.is_empty() {
            return 0;
        }

        let mut builder: Builder<RopeInfo> = Builder::new(self.buffer.len());
        for span in &matches {
            builder.replace(span.start..span.end, Rope::from(replacement));
        }
        self.buffer = builder.build().apply(&self.buffer);
        self.version += 1;
        matches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn round_trips_bytes() {
        let src = "_method a.b\n_endmethod\n$\n";
        let doc = Document::from_bytes(src.as_bytes()).unwrap();
        assert_eq!(doc.to_bytes(), src.as_bytes());
        assert_eq!(doc.text(), src);
        assert_eq!(doc.len(), src.len());
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(Document::from_bytes(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn navigation_does_not_mutate() {
        let doc = Document::from_bytes(b"_if a _then b _endif rest").unwrap();
        let landed = doc.forward_unit(0, 1).unwrap();
        assert_eq!(landed, 20);
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.text(), "_if a _then b _endif rest");
    }

    #[test]
    fn navigation_surfaces_missing_boundary() {
        let doc = Document::from_bytes(b"_proc never_closed").unwrap();
        assert!(matches!(
            doc.forward_unit(0, 1),
            Err(ScanError::BoundaryNotFound { .. })
        ));
    }

    #[test]
    fn replace_edits_span_and_bumps_version() {
        let mut doc = Document::from_bytes(b"write(old_name)").unwrap();
        doc.replace(Span::new(6, 14), "new");
        assert_eq!(doc.text(), "write(new)");
        assert_eq!(doc.version(), 1);
    }

    #[test]
    fn replace_clamps_out_of_range_spans() {
        let mut doc = Document::from_bytes(b"abc").unwrap();
        doc.replace(Span::new(2, 99), "Z");
        assert_eq!(doc.text(), "abZ");
    }

    #[test]
    fn replace_all_substitutes_every_match() {
        let mut doc = Document::from_bytes(b"go(a) go(b) stop() go(c)").unwrap();
        let pattern = Regex::new(r"\bgo\b").unwrap();
        let replaced = doc.replace_all(&pattern, "run");
        assert_eq!(replaced, 3);
        assert_eq!(doc.text(), "run(a) run(b) stop() run(c)");
        assert_eq!(doc.version(), 1);
    }

    #[test]
    fn replace_all_without_matches_is_free() {
        let mut doc = Document::from_bytes(b"nothing here").unwrap();
        let pattern = Regex::new("absent").unwrap();
        assert_eq!(doc.replace_all(&pattern, "x"), 0);
        assert_eq!(doc.version(), 0);
    }

    #[rstest]
    #[case(Span::new(1, 4), "ell")]
    #[case(Span::new(3, 99), "lo")]
    #[case(Span::new(9, 12), "")]
    fn slice_clamps_to_bounds(#[case] span: Span, #[case] expected: &str) {
        let doc = Document::from_bytes(b"hello").unwrap();
        assert_eq!(doc.slice(span), expected);
    }
}
