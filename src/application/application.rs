use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::{RuntimeConfig, console};
use crate::cli::Cli;
use crate::config::{TreeConfig, TreeConfigError};
use crate::filesystem::TreeBuildError;
use crate::report::{ReportError, TreeReport};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let file_config = TreeConfig::read(cli.config.as_deref())
            .await
            .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", file_config);

        let runtime_config = RuntimeConfig::resolve(cli, file_config);
        debug!("Resolved runtime config: {:?}", runtime_config);

        match Self::generate(&runtime_config).await {
            Ok(_) => Ok(()),
            Err(err @ ApplicationError::InvalidRootError { .. }) => {
                console::announce_error(&err);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Validates the root, renders its tree and writes it to the output file.
    pub async fn generate(config: &RuntimeConfig) -> Result<TreeReport, ApplicationError> {
        ensure!(
            config.root.is_dir(),
            InvalidRootSnafu {
                path: config.root.display().to_string(),
            }
        );

        console::announce_start(&config.root);
        let report =
            TreeReport::build(&config.root, &config.tree_options()).context(TreeBuildSnafu)?;
        report.write(&config.output).await.context(ReportSnafu)?;
        info!("Tree for {} written", config.root.display());

        console::announce_saved(&config.output, report.line_count());
        Ok(report)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: TreeConfigError },
    #[snafu(display("'{}' is not a valid directory", path))]
    InvalidRootError { path: String },
    #[snafu(display("Failed to build the folder tree"))]
    TreeBuildError { source: TreeBuildError },
    #[snafu(display("Failed to save the folder tree"))]
    ReportError { source: ReportError },
}
