use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::TreeConfig;
use crate::filesystem::TreeOptions;

pub const DEFAULT_OUTPUT_FILE: &str = "tree_output.txt";

/// Settings for one run: command-line flags layered over the config file
/// layered over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub include_files: bool,
    /// Any integer; zero or below renders no levels under the root.
    pub max_depth: Option<i64>,
    pub output: PathBuf,
}

impl RuntimeConfig {
    /// `--files` can only switch file listing on, so `files: true` in the
    /// config file always wins over an absent flag.
    pub fn resolve(cli: Cli, file_config: TreeConfig) -> Self {
        Self {
            root: cli.path,
            include_files: cli.files || file_config.files.unwrap_or(false),
            max_depth: cli.depth.or(file_config.depth),
            output: cli
                .output
                .or(file_config.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        }
    }

    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            include_files: self.include_files,
            max_depth: self
                .max_depth
                .map(|depth| u32::try_from(depth.max(0)).unwrap_or(u32::MAX)),
        }
    }
}
