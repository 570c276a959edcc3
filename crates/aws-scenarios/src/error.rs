use std::path::PathBuf;

use scenario_operations::OperationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}'")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl CliError {
    /// Advice for the service error behind this failure, if its code is a
    /// well-known one.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Operation(err) => err.service_error()?.suggestion(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
