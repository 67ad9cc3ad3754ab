use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Invalid version '{version}': {message}")]
    Invalid { version: String, message: String },
}

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("No sdist or wheel files found for {project}")]
    MissingFiles { project: String },

    #[error(transparent)]
    Version(#[from] VersionError),
}
