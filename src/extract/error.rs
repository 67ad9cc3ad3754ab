use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No setup.py found in source distribution")]
    MissingSetup,

    #[error("No METADATA found in wheel")]
    MissingManifest,

    #[error("Failed to read tar archive: {0}")]
    TarRead(#[source] std::io::Error),

    #[error("Failed to read zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}
