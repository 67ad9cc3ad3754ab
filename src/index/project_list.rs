//! Local mirror of the index's project list
//!
//! Listing every project on a large index is slow, so the list can be saved
//! to a JSON array once and reused by later runs.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::encoding::strip_bom;
use crate::index::error::IndexError;
use crate::index::registry::PackageIndex;

pub struct ProjectMirror {
    path: PathBuf,
}

impl ProjectMirror {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved project list
    pub fn load(&self) -> Result<Vec<String>, IndexError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| IndexError::MirrorRead {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(strip_bom(&content)).map_err(|source| IndexError::MirrorParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Fetch the live project list and save it, returning the number of projects
    pub async fn download(&self, index: &dyn PackageIndex) -> Result<usize, IndexError> {
        let projects = index.list_projects().await?;
        let json = serde_json::to_string(&projects).map_err(|source| IndexError::MirrorEncode {
            path: self.path.clone(),
            source,
        })?;

        std::fs::write(&self.path, json).map_err(|source| IndexError::MirrorWrite {
            path: self.path.clone(),
            source,
        })?;

        info!(
            "Saved {} projects to {}",
            projects.len(),
            self.path.display()
        );
        Ok(projects.len())
    }

    /// Project list from the mirror, falling back to the live index
    pub async fn list_projects(&self, index: &dyn PackageIndex) -> Result<Vec<String>, IndexError> {
        match self.load() {
            Ok(projects) => {
                debug!(
                    "Loaded {} projects from {}",
                    projects.len(),
                    self.path.display()
                );
                Ok(projects)
            }
            Err(e) => {
                info!("Project mirror unavailable ({}), listing the index instead", e);
                index.list_projects().await
            }
        }
    }

    /// Projects listed by the live index that the mirror does not contain
    pub async fn new_projects(&self, index: &dyn PackageIndex) -> Result<Vec<String>, IndexError> {
        let mirrored: HashSet<String> = self.load()?.into_iter().collect();
        let live = index.list_projects().await?;

        Ok(live
            .into_iter()
            .filter(|project| !mirrored.contains(project))
            .collect())
    }
}
