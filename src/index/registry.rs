//! Traits for the package index and artifact download collaborators

#[cfg(test)]
use mockall::automock;

use crate::index::error::IndexError;
use crate::index::types::ReleaseFile;

/// Trait for listing projects and their release files
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PackageIndex: Send + Sync {
    /// Lists the names of every project known to the index
    async fn list_projects(&self) -> Result<Vec<String>, IndexError>;

    /// Lists the release files published for a project
    ///
    /// # Arguments
    /// * `project` - The project name as listed by the index
    ///
    /// # Returns
    /// * `Ok(Vec<ReleaseFile>)` - Files in index listing order
    /// * `Err(IndexError)` - If the listing cannot be fetched
    async fn project_files(&self, project: &str) -> Result<Vec<ReleaseFile>, IndexError>;
}

/// Trait for downloading release artifacts
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// Downloads the bytes at `url` in a single attempt
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, IndexError>;
}
