use thiserror::Error;

/// Failures raised while scanning forward through source text.
///
/// "Nothing recognized at the cursor" is deliberately *not* an error; the
/// scanner reports it through [`ScanStep::NoUnit`](crate::scanner::ScanStep)
/// and leaves the cursor where it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A forward search ran out of text before finding its terminator:
    /// a closing keyword, a statement marker, or a group closer.
    #[error("no {expected} found after offset {from}")]
    BoundaryNotFound {
        /// Human-readable description of the boundary searched for.
        expected: &'static str,
        /// Offset the failing search started from. Movement performed by
        /// earlier repeats is not rolled back.
        from: usize,
    },

    /// The balanced-group matcher was pointed at something that does not
    /// open a group.
    #[error("offset {at} is not on a quote or bracket opener")]
    NotAnOpener { at: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_message_names_the_terminator() {
        let err = ScanError::BoundaryNotFound {
            expected: "`_endif`",
            from: 12,
        };
        assert_eq!(err.to_string(), "no `_endif` found after offset 12");
    }
}
