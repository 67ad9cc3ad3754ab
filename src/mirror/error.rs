use std::path::PathBuf;

use thiserror::Error;

use crate::encoding::DecodeError;
use crate::extract::ExtractError;
use crate::index::IndexError;
use crate::version::SelectError;

/// Failure of one project's pipeline, classified into a record by the driver
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read cache file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode cache: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure that aborts a batch run
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to write progress: {0}")]
    Progress(#[from] std::io::Error),
}
