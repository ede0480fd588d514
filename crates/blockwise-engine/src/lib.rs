//! # blockwise-engine
//!
//! The editor-support layer around [`blockwise-syntax`]: an editing buffer
//! with value-returning structural navigation, discovery of source files on
//! disk, outline and fold analysis, and the process glue for driving a
//! language runtime session.
//!
//! The split of responsibilities is deliberate. The syntax crate computes
//! offsets and never touches state; this crate owns the mutable things - the
//! rope buffer, the open-buffer registry, the spawned runtime process - and
//! decides when a computed cursor actually gets committed.
//!
//! [`blockwise-syntax`]: blockwise_syntax

pub mod analysis;
pub mod editing;
pub mod io;
pub mod models;
pub mod session;

#[cfg(test)]
pub mod tests;

pub use analysis::{FoldRange, MethodEntry, fold_ranges, outline};
pub use editing::{Buffer, BufferSet, Document, Span};
pub use models::SourceFile;
pub use session::Session;
