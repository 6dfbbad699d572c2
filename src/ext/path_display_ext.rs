use std::path::{Component, Path, PathBuf};

/// Makes `path` absolute against the current directory and lexically resolves
/// `.` and `..` components. Symlinks are left untouched.
pub fn absolute_path(path: &Path) -> PathBuf {
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(current_dir) => current_dir.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    normalize_path(&absolute_path)
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never climb above the root
                if !components.is_empty()
                    && !matches!(
                        components.last(),
                        Some(Component::RootDir | Component::Prefix(_))
                    )
                {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait PathDisplayExt {
    /// Absolute, normalized form of the path for display.
    fn absolute_display(&self) -> String;

    /// Text after the last separator of the path exactly as given. `.` stays
    /// `.` and a trailing separator leaves an empty name.
    fn basename(&self) -> String;
}

impl PathDisplayExt for Path {
    fn absolute_display(&self) -> String {
        absolute_path(self).display().to_string()
    }

    fn basename(&self) -> String {
        self.to_string_lossy()
            .rsplit(std::path::is_separator)
            .next()
            .unwrap_or_default()
            .to_string()
    }
}
