//! Read-only analysis over source text: the method outline and fold ranges.
//!
//! Both are consumers of the public pieces of `blockwise-syntax` (the
//! scanner for method extents, the lexer plus keyword-pair table for folds)
//! and neither holds state.

pub mod folds;
pub mod outline;

pub use folds::{FoldRange, fold_ranges};
pub use outline::{MethodEntry, outline};
