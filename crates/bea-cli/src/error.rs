use bea::BeaError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Bea(#[from] BeaError),

    #[error("export failed: {0}")]
    Export(#[from] PolarsError),

    #[error("interactive session failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Bea(BeaError::InvalidParameter(_) | BeaError::NotFound(_)) => 2,
            Self::Bea(err) if err.is_cache_failure() => 4,
            Self::Bea(_) => 3,
            Self::Export(_) | Self::Task(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
