//! In-memory package index and artifact fetcher

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use depper::index::{ArtifactFetcher, IndexError, PackageIndex, PackageType, ReleaseFile};

const FILES_HOST: &str = "https://files.example";

pub fn wheel_file(project: &str, version: &str) -> ReleaseFile {
    let filename = format!("{}-{}-py3-none-any.whl", project, version);
    ReleaseFile::new(
        &filename,
        format!("{}/{}", FILES_HOST, filename),
        Some(version),
        PackageType::Wheel,
    )
}

pub fn sdist_file(project: &str, version: &str) -> ReleaseFile {
    let filename = format!("{}-{}.tar.gz", project, version);
    ReleaseFile::new(
        &filename,
        format!("{}/{}", FILES_HOST, filename),
        Some(version),
        PackageType::Sdist,
    )
}

/// Index serving a fixed project list and file listings
#[derive(Default)]
pub struct StaticIndex {
    projects: Vec<String>,
    files: HashMap<String, Vec<ReleaseFile>>,
    file_calls: AtomicUsize,
}

impl StaticIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: &str, files: Vec<ReleaseFile>) -> Self {
        self.projects.push(project.to_string());
        self.files.insert(project.to_string(), files);
        self
    }

    pub fn file_calls(&self) -> usize {
        self.file_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PackageIndex for StaticIndex {
    async fn list_projects(&self) -> Result<Vec<String>, IndexError> {
        Ok(self.projects.clone())
    }

    async fn project_files(&self, project: &str) -> Result<Vec<ReleaseFile>, IndexError> {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(project)
            .cloned()
            .ok_or_else(|| IndexError::NotFound(project.to_string()))
    }
}

/// Fetcher serving artifact bodies by URL
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, file: &ReleaseFile, body: Vec<u8>) -> Self {
        self.bodies.insert(file.url.clone(), body);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtifactFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, IndexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| IndexError::InvalidResponse(format!("no body for {}", url)))
    }
}
