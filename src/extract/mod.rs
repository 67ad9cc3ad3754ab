//! Dependency-declaration extraction from release artifacts
//!
//! An artifact's container format is decided by filename suffix:
//!
//! - `.whl`: zip, yields the first `*/METADATA`
//! - `.zip`: zip-packed sdist, yields the first `*/setup.py`
//! - anything else: tar (optionally gzip, bzip2 or xz compressed), yields
//!   the first `*/setup.py`
//!
//! # Modules
//!
//! - [`archive`]: Format detection and member lookup
//! - [`compression`]: Magic-byte detection of the tar compression layer
//! - [`error`]: Extraction failures

pub mod archive;
pub mod compression;
pub mod error;

pub use archive::{ArchiveFormat, extract_metadata};
pub use error::ExtractError;

/// Which declaration file was extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    /// Build script of a source distribution
    SetupPy,
    /// Core metadata of a wheel
    Metadata,
}

impl MetadataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKind::SetupPy => "setup.py",
            MetadataKind::Metadata => "metadata",
        }
    }
}
