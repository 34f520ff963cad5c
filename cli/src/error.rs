use std::path::PathBuf;

use stride_regression::dataset::AgeGroup;
use stride_regression::error::DatasetError;
use stride_regression::RegressionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("failed to load data: {0}")]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Regression(#[from] RegressionError),

    #[error("no model for {group}: {source}")]
    ModelUnavailable {
        group: AgeGroup,
        source: RegressionError,
    },

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        CliError::Config(Box::new(err))
    }
}

pub type CliResult<T> = Result<T, CliError>;
