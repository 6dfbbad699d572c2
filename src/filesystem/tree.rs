use std::{
    ffi::OsString,
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use snafu::{ResultExt, Snafu};
use tracing::{debug, trace, warn};

use crate::ext::PathDisplayExt;
use crate::filesystem::TreeEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeOptions {
    pub include_files: bool,
    /// Number of levels below the root to descend into. `None` is unlimited.
    pub max_depth: Option<u32>,
}

impl TreeOptions {
    fn depth_exhausted(&self, current_depth: u32) -> bool {
        self.max_depth.is_some_and(|max| current_depth >= max)
    }
}

/// Renders the children of `path` and, recursively, their descendants.
///
/// Directories come first, then files when `include_files` is set, each group
/// in codepoint order. A directory that cannot be listed because of missing
/// permissions contributes no lines.
pub fn build_tree(
    path: &Path,
    prefix: &str,
    options: &TreeOptions,
    current_depth: u32,
) -> Result<Vec<String>, TreeBuildError> {
    build_tree_with(&read_sorted_names, path, prefix, options, current_depth)
}

fn build_tree_with<L>(
    list: &L,
    path: &Path,
    prefix: &str,
    options: &TreeOptions,
    current_depth: u32,
) -> Result<Vec<String>, TreeBuildError>
where
    L: Fn(&Path) -> io::Result<Vec<OsString>>,
{
    let mut lines = Vec::new();

    if options.depth_exhausted(current_depth) {
        trace!("Depth limit reached at {}", path.display());
        return Ok(lines);
    }

    let Some(names) = skip_permission_denied(path, list(path))? else {
        return Ok(lines);
    };

    let entries = select_entries(path, names, options, current_depth);
    let last_index = entries.len().saturating_sub(1);

    for (index, entry) in entries.iter().enumerate() {
        let is_last = index == last_index;
        trace!("Rendering {} at depth {}", entry.path.display(), entry.depth);
        lines.push(entry.render(prefix, is_last));

        if entry.is_directory() {
            let child_prefix = TreeEntry::child_prefix(prefix, is_last);
            lines.extend(build_tree_with(
                list,
                &entry.path,
                &child_prefix,
                options,
                current_depth + 1,
            )?);
        }
    }

    Ok(lines)
}

fn read_sorted_names(path: &Path) -> io::Result<Vec<OsString>> {
    debug!("Listing directory {}", path.display());
    let mut names = fs::read_dir(path)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.file_name()),
            Err(err) => {
                warn!("Skipping unreadable entry in {}: {}", path.display(), err);
                None
            }
        })
        .collect::<Vec<_>>();
    names.sort();
    Ok(names)
}

fn skip_permission_denied(
    path: &Path,
    listing: io::Result<Vec<OsString>>,
) -> Result<Option<Vec<OsString>>, TreeBuildError> {
    match listing {
        Ok(names) => Ok(Some(names)),
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            debug!("Permission denied, skipping {}", path.display());
            Ok(None)
        }
        Err(err) => Err(err).context(TreeBuildSnafu {
            path: path.to_path_buf(),
        }),
    }
}

fn select_entries(
    path: &Path,
    names: Vec<OsString>,
    options: &TreeOptions,
    depth: u32,
) -> Vec<TreeEntry> {
    let (mut directories, files): (Vec<_>, Vec<_>) = names
        .into_iter()
        .filter_map(|name| TreeEntry::classify(path, name, depth))
        .partition(TreeEntry::is_directory);

    if options.include_files {
        directories.extend(files);
    }
    directories
}

#[derive(Debug, Snafu)]
#[snafu(display("Failed to list directory {}", path.absolute_display()))]
pub struct TreeBuildError {
    path: PathBuf,
    source: io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use tempfile::TempDir;

    fn make_tree(dirs: &[&str], files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        for dir in dirs {
            fs::create_dir_all(temp_dir.path().join(dir)).expect("Failed to create dir");
        }
        for file in files {
            fs::write(temp_dir.path().join(file), "content").expect("Failed to write file");
        }
        temp_dir
    }

    fn build(root: &Path, include_files: bool, max_depth: Option<u32>) -> Vec<String> {
        let options = TreeOptions {
            include_files,
            max_depth,
        };
        build_tree(root, "", &options, 0).expect("Failed to build tree")
    }

    #[test]
    fn test_directories_are_sorted_alphabetically() {
        let temp_dir = make_tree(&["b", "a"], &[]);

        assert_eq!(
            build(temp_dir.path(), false, None),
            vec!["├── [D] a", "└── [D] b"]
        );
    }

    #[test]
    fn test_files_only_directory_is_empty_without_files_flag() {
        let temp_dir = make_tree(&[], &["one.txt", "two.txt"]);

        assert!(build(temp_dir.path(), false, None).is_empty());
    }

    #[test]
    fn test_files_follow_directories_in_codepoint_order() {
        let temp_dir = make_tree(&["c_dir", "b_dir"], &["a.txt", "Z.txt"]);

        assert_eq!(
            build(temp_dir.path(), true, None),
            vec![
                "├── [D] b_dir",
                "├── [D] c_dir",
                "├── [F] Z.txt",
                "└── [F] a.txt",
            ]
        );
    }

    #[test]
    fn test_nested_prefixes_follow_connectors() {
        let temp_dir = make_tree(&["a/x", "b/y/z"], &["b/y/file.rs"]);

        assert_eq!(
            build(temp_dir.path(), true, None),
            vec![
                "├── [D] a",
                "│   └── [D] x",
                "└── [D] b",
                "    └── [D] y",
                "        ├── [D] z",
                "        └── [F] file.rs",
            ]
        );
    }

    #[rstest]
    #[case(Some(0), vec![])]
    #[case(Some(1), vec!["└── [D] a"])]
    #[case(Some(2), vec!["└── [D] a", "    └── [D] b"])]
    #[case(None, vec!["└── [D] a", "    └── [D] b", "        └── [D] c"])]
    fn test_max_depth_limits_levels(#[case] max_depth: Option<u32>, #[case] expected: Vec<&str>) {
        let temp_dir = make_tree(&["a/b/c"], &[]);

        assert_eq!(build(temp_dir.path(), false, max_depth), expected);
    }

    #[test]
    fn test_current_depth_counts_towards_limit() {
        let temp_dir = make_tree(&["a/b"], &[]);
        let options = TreeOptions {
            include_files: false,
            max_depth: Some(2),
        };

        let lines = build_tree(temp_dir.path(), "", &options, 1).expect("Failed to build tree");

        assert_eq!(lines, vec!["└── [D] a"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing");

        let result = build_tree(&missing, "", &TreeOptions::default(), 0);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to list directory"));
    }

    #[test]
    fn test_permission_denied_listing_is_skipped() {
        let denied = io::Error::new(ErrorKind::PermissionDenied, "denied");

        let result = skip_permission_denied(Path::new("/locked"), Err(denied));

        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_other_listing_errors_propagate() {
        let broken = io::Error::other("broken");

        let result = skip_permission_denied(Path::new("/broken"), Err(broken));

        assert!(result.is_err());
    }

    #[test]
    fn test_unreadable_directory_does_not_abort_traversal() {
        let temp_dir = make_tree(&["a_locked/hidden", "b_open/visible", "c_open"], &[]);
        let locked = temp_dir.path().join("a_locked");
        let list = |path: &Path| {
            if path == locked {
                Err(io::Error::new(ErrorKind::PermissionDenied, "denied"))
            } else {
                read_sorted_names(path)
            }
        };

        let lines = build_tree_with(&list, temp_dir.path(), "", &TreeOptions::default(), 0)
            .expect("Failed to build tree");

        assert_eq!(
            lines,
            vec![
                "├── [D] a_locked",
                "├── [D] b_open",
                "│   └── [D] visible",
                "└── [D] c_open",
            ]
        );
    }

    #[test]
    fn test_unreadable_root_yields_no_lines() {
        let temp_dir = make_tree(&["a", "b"], &[]);
        let list = |_: &Path| -> io::Result<Vec<OsString>> {
            Err(io::Error::new(ErrorKind::PermissionDenied, "denied"))
        };

        let lines = build_tree_with(&list, temp_dir.path(), "", &TreeOptions::default(), 0)
            .expect("Failed to build tree");

        assert!(lines.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_followed() {
        let temp_dir = make_tree(&["real/inner"], &[]);
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("link"))
            .expect("Failed to create symlink");

        assert_eq!(
            build(temp_dir.path(), false, None),
            vec![
                "├── [D] link",
                "│   └── [D] inner",
                "└── [D] real",
                "    └── [D] inner",
            ]
        );
    }
}
