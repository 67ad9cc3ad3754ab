use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to read project mirror {path}: {source}")]
    MirrorRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse project mirror {path}: {source}")]
    MirrorParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode project mirror {path}: {source}")]
    MirrorEncode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write project mirror {path}: {source}")]
    MirrorWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
