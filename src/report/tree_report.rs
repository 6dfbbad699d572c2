use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::ext::PathDisplayExt;
use crate::filesystem::{EntryKind, TreeBuildError, TreeOptions, build_tree};

pub const LEGEND: &str = "[D] = Directory, [F] = File";

/// Header followed by the rendered tree, one element per output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeReport {
    lines: Vec<String>,
}

impl TreeReport {
    pub fn build(root: &Path, options: &TreeOptions) -> Result<Self, TreeBuildError> {
        let mut lines = vec![
            format!("Folder structure of: {}", root.absolute_display()),
            LEGEND.to_string(),
            String::new(),
            format!("{}{}", EntryKind::Directory, root.basename()),
        ];
        lines.extend(build_tree(root, "", options, 0)?);
        debug!("Built report with {} lines", lines.len());

        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    /// Writes the rendered report as UTF-8, replacing any existing file.
    pub async fn write(&self, output: &Path) -> Result<(), ReportError> {
        debug!("Writing report to {}", output.absolute_display());
        compio::fs::write(output, self.render().into_bytes())
            .await
            .0
            .context(ReportSnafu {
                path: output.to_path_buf(),
            })
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Failed to write tree to {}", path.absolute_display()))]
pub struct ReportError {
    path: PathBuf,
    source: std::io::Error,
}
