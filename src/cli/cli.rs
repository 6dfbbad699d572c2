use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Generate an ASCII tree of a folder structure and save it to a text file
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Path to the folder to analyze
    pub path: PathBuf,

    /// Include files in the output
    #[clap(long, short)]
    pub files: bool,

    /// Maximum depth to traverse (default: unlimited)
    #[clap(long, short, allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Output file path (default: tree_output.txt)
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// YAML file with default settings (default: .foldertree.yaml, if present)
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["foldertree", "some/dir"]).expect("Failed to parse");

        assert_eq!(cli.path, PathBuf::from("some/dir"));
        assert!(!cli.files);
        assert_eq!(cli.depth, None);
        assert_eq!(cli.output, None);
        assert_eq!(cli.config, None);
        assert!(matches!(cli.log_level, LogLevel::Warn));
    }

    #[rstest]
    #[case(&["foldertree", "dir", "-f", "-d", "2", "-o", "out.txt"])]
    #[case(&["foldertree", "--files", "--depth", "2", "--output", "out.txt", "dir"])]
    fn test_short_and_long_flags(#[case] args: &[&str]) {
        let cli = Cli::try_parse_from(args).expect("Failed to parse");

        assert_eq!(cli.path, PathBuf::from("dir"));
        assert!(cli.files);
        assert_eq!(cli.depth, Some(2));
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
    }

    #[rstest]
    #[case(&["foldertree", "dir", "-d", "-1"], -1)]
    #[case(&["foldertree", "dir", "--depth", "0"], 0)]
    #[case(&["foldertree", "--depth", "-3", "dir"], -3)]
    fn test_any_integer_depth_is_accepted(#[case] args: &[&str], #[case] expected: i64) {
        let cli = Cli::try_parse_from(args).expect("Failed to parse");

        assert_eq!(cli.depth, Some(expected));
    }

    #[rstest]
    #[case(&["foldertree"])]
    #[case(&["foldertree", "dir", "--depth", "many"])]
    #[case(&["foldertree", "dir", "--log-level", "loud"])]
    fn test_invalid_arguments_are_rejected(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
