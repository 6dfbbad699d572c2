//! Directory traversal and tree line formatting.
//!
//! The builder walks a directory depth-first, listing directories before
//! files and rendering every entry as one line with box-drawing connectors.

mod entry;
mod tree;

pub use entry::{EntryKind, TreeEntry};
pub use tree::{TreeBuildError, TreeOptions, build_tree};
