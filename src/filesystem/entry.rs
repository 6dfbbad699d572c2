use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use derive_more::Display;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Kind of a listed entry, displayed as its marker in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntryKind {
    #[display("[D] ")]
    Directory,
    #[display("[F] ")]
    File,
}

/// A single child of a scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub depth: u32,
}

impl TreeEntry {
    /// Classifies `file_name` inside `parent`, following symlinks.
    ///
    /// Returns `None` for anything that is neither a directory nor a regular
    /// file, including entries whose metadata cannot be read.
    pub fn classify(parent: &Path, file_name: OsString, depth: u32) -> Option<Self> {
        let path = parent.join(&file_name);
        let metadata = fs::metadata(&path).ok()?;
        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            return None;
        };

        Some(Self {
            name: file_name.to_string_lossy().into_owned(),
            path,
            kind,
            depth,
        })
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn render(&self, prefix: &str, is_last: bool) -> String {
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        format!("{prefix}{connector}{}{}", self.kind, self.name)
    }

    /// Prefix handed down to this entry's children.
    pub fn child_prefix(prefix: &str, is_last: bool) -> String {
        let indent = if is_last { SPACE_INDENT } else { PIPE_INDENT };
        format!("{prefix}{indent}")
    }
}
