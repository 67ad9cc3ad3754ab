//! PyPI Simple Repository API client
//!
//! Uses the JSON form of the Simple API (PEP 691): the root page lists every
//! project and each project page lists its distribution files.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::config::{DEFAULT_INDEX_URL, PROJECT_FILES_MEMO_CAPACITY, PROJECT_LIST_MEMO_CAPACITY};
use crate::index::error::IndexError;
use crate::index::filename::{normalize_project_name, parse_filename};
use crate::index::memo::Memo;
use crate::index::registry::PackageIndex;
use crate::index::types::ReleaseFile;

const SIMPLE_JSON_CONTENT_TYPE: &str = "application/vnd.pypi.simple.v1+json";

/// PyPI Simple API client
pub struct PypiSimpleIndex {
    client: Client,
    base_url: String,
    projects: Mutex<Memo<(), Vec<String>>>,
    files: Mutex<Memo<String, Vec<ReleaseFile>>>,
}

impl Default for PypiSimpleIndex {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_URL.to_string())
    }
}

impl PypiSimpleIndex {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            projects: Mutex::new(Memo::new(PROJECT_LIST_MEMO_CAPACITY)),
            files: Mutex::new(Memo::new(PROJECT_FILES_MEMO_CAPACITY)),
        }
    }

    fn project_url(&self, project: &str) -> String {
        format!("{}/{}/", self.base_url, normalize_project_name(project))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        project: Option<&str>,
    ) -> Result<T, IndexError> {
        debug!("Fetching index page: {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, SIMPLE_JSON_CONTENT_TYPE)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(IndexError::NotFound(
                project.unwrap_or(url).to_string(),
            ));
        }

        if !response.status().is_success() {
            return Err(IndexError::InvalidResponse(format!(
                "Index returned status {} for {}",
                response.status(),
                url
            )));
        }

        response
            .json()
            .await
            .map_err(|e| IndexError::InvalidResponse(e.to_string()))
    }
}

/// Root page of the Simple API
#[derive(Debug, Deserialize)]
struct ProjectListPage {
    projects: Vec<ProjectEntry>,
}

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    name: String,
}

/// Project page of the Simple API
#[derive(Debug, Deserialize)]
struct ProjectPage {
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    filename: String,
    /// Absolute, or relative to the project page
    url: String,
}

#[async_trait]
impl PackageIndex for PypiSimpleIndex {
    async fn list_projects(&self) -> Result<Vec<String>, IndexError> {
        if let Some(projects) = self.projects.lock().ok().and_then(|mut memo| memo.get(&())) {
            return Ok(projects);
        }

        let url = format!("{}/", self.base_url);
        let page: ProjectListPage = self.get_json(&url, None).await?;
        let projects: Vec<String> = page.projects.into_iter().map(|p| p.name).collect();

        debug!("Index lists {} projects", projects.len());

        if let Ok(mut memo) = self.projects.lock() {
            memo.insert((), projects.clone());
        }
        Ok(projects)
    }

    async fn project_files(&self, project: &str) -> Result<Vec<ReleaseFile>, IndexError> {
        if let Some(files) = self.files.lock().ok().and_then(|mut memo| memo.get(project)) {
            return Ok(files);
        }

        let page_url = self.project_url(project);
        let page: ProjectPage = self.get_json(&page_url, Some(project)).await?;
        let base = Url::parse(&page_url)
            .map_err(|e| IndexError::InvalidResponse(format!("{}: {}", page_url, e)))?;

        let files = page
            .files
            .into_iter()
            .map(|entry| {
                let url = base
                    .join(&entry.url)
                    .map(String::from)
                    .map_err(|e| IndexError::InvalidResponse(format!("{}: {}", entry.url, e)))?;
                let (package_type, version) = parse_filename(project, &entry.filename);
                Ok(ReleaseFile {
                    filename: entry.filename,
                    url,
                    version,
                    package_type,
                })
            })
            .collect::<Result<Vec<_>, IndexError>>()?;

        debug!("Found {} files for project {}", files.len(), project);

        if let Ok(mut memo) = self.files.lock() {
            memo.insert(project.to_string(), files.clone());
        }
        Ok(files)
    }
}
