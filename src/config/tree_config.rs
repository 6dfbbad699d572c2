use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::ext::PathDisplayExt;

pub const DEFAULT_CONFIG_FILE_NAME: &str = ".foldertree.yaml";

const FILES_KEY: &str = "files";
const DEPTH_KEY: &str = "depth";
const OUTPUT_KEY: &str = "output";

/// Defaults read from a YAML file. Unset keys fall through to the built-in
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeConfig {
    pub files: Option<bool>,
    pub depth: Option<i64>,
    pub output: Option<PathBuf>,
}

impl TreeConfig {
    /// Reads `explicit_path` when given, otherwise the default config file in
    /// the current directory if it exists.
    pub async fn read(explicit_path: Option<&Path>) -> Result<Self, TreeConfigError> {
        match explicit_path {
            Some(path) => Self::from_path(path, true).await,
            None => Self::from_path(Path::new(DEFAULT_CONFIG_FILE_NAME), false).await,
        }
    }

    pub async fn from_path(path: &Path, required: bool) -> Result<Self, TreeConfigError> {
        debug!("Opening config file: {}", path.absolute_display());
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if !required && err.kind() == ErrorKind::NotFound => {
                info!("No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).context(ReadSnafu {
                    file_path: path.absolute_display(),
                });
            }
        };
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.absolute_display(),
        })?;
        contents.as_str().try_into()
    }

    fn from_mapping(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Self, TreeConfigError> {
        let mut config = Self::default();

        for (key, value) in top_level {
            let Some(key) = key.as_str() else {
                warn!("Skipping non-string config key: {:?}", key);
                continue;
            };
            match key {
                FILES_KEY => config.files = Some(parse_bool(key, value)?),
                DEPTH_KEY => config.depth = Some(parse_depth(key, value)?),
                OUTPUT_KEY => config.output = Some(PathBuf::from(parse_string(key, value)?)),
                _ => warn!("Ignoring unknown config key '{}'", key),
            }
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &Yaml) -> Result<bool, TreeConfigError> {
    match value {
        Yaml::Value(Scalar::Boolean(flag)) => Ok(*flag),
        _ => InvalidValueSnafu {
            key,
            expected: "a boolean",
        }
        .fail(),
    }
}

fn parse_depth(key: &str, value: &Yaml) -> Result<i64, TreeConfigError> {
    match value {
        Yaml::Value(Scalar::Integer(depth)) => Ok(*depth),
        _ => InvalidValueSnafu {
            key,
            expected: "an integer",
        }
        .fail(),
    }
}

fn parse_string<'a>(key: &str, value: &'a Yaml) -> Result<&'a str, TreeConfigError> {
    value.as_str().context(InvalidValueSnafu {
        key,
        expected: "a string",
    })
}

impl TryFrom<&str> for TreeConfig {
    type Error = TreeConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            // Empty or comment-only file
            return Ok(Self::default());
        };
        if matches!(document, Yaml::Value(Scalar::Null)) {
            return Ok(Self::default());
        }

        let top_level = document
            .as_mapping()
            .ok_or(TreeConfigError::TopLevelNotMap)?;
        Self::from_mapping(top_level)
    }
}

#[derive(Debug, Snafu)]
pub enum TreeConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Config file is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' should be {}", key, expected))]
    InvalidValue {
        key: String,
        expected: &'static str,
    },
}
