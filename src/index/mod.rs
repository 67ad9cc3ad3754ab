//! Package index access
//!
//! # Modules
//!
//! - [`registry`]: `PackageIndex` and `ArtifactFetcher` traits
//! - [`pypi`]: PyPI Simple API implementation of `PackageIndex`
//! - [`fetcher`]: HTTP implementation of `ArtifactFetcher`
//! - [`filename`]: Package type and version recovery from distribution filenames
//! - [`memo`]: Bounded cache for repeated index lookups
//! - [`project_list`]: On-disk mirror of the project list
//! - [`types`]: `ReleaseFile` and `PackageType`
//! - [`error`]: Error type for index and download operations

pub mod error;
pub mod fetcher;
pub mod filename;
pub mod memo;
pub mod project_list;
pub mod pypi;
pub mod registry;
pub mod types;

pub use error::IndexError;
pub use fetcher::HttpFetcher;
pub use project_list::ProjectMirror;
pub use pypi::PypiSimpleIndex;
pub use registry::{ArtifactFetcher, PackageIndex};
pub use types::{PackageType, ReleaseFile};
